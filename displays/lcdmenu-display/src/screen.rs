//! In-memory character display
//!
//! Provides a character cell buffer that implements `CharDisplay`. Useful
//! for host-side tests, simulators and mirroring what the panel shows.

use crate::backend::{CharDisplay, DisplayError};
use crate::glyph::{GlyphBitmap, GLYPH_SLOTS};

/// Default number of character rows (20x4 panel)
pub const SCREEN_ROWS: usize = 4;

/// Default number of character columns (20x4 panel)
pub const SCREEN_COLS: usize = 20;

/// Character cell buffer implementing `CharDisplay`
///
/// `COLS` and `ROWS` bound the largest panel the buffer can emulate; the
/// active geometry is set by `begin`. Writes past the end of a row are
/// dropped.
#[derive(Clone)]
pub struct TextScreen<const COLS: usize = SCREEN_COLS, const ROWS: usize = SCREEN_ROWS> {
    /// Character codes per cell
    cells: [[u8; COLS]; ROWS],
    /// Custom glyph slots
    glyphs: [Option<GlyphBitmap>; GLYPH_SLOTS as usize],
    /// Active geometry, set by `begin`
    size: Option<(u8, u8)>,
    /// Cursor position (col, row)
    cursor: (u8, u8),
    backlight: bool,
    /// Number of `clear` calls since creation
    clears: u32,
    /// Whether the screen changed since the last `mark_clean`
    dirty: bool,
}

impl<const COLS: usize, const ROWS: usize> Default for TextScreen<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> TextScreen<COLS, ROWS> {
    /// Create a new blank screen
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            glyphs: [None; GLYPH_SLOTS as usize],
            size: None,
            cursor: (0, 0),
            backlight: false,
            clears: 0,
            dirty: false,
        }
    }

    /// Raw character codes of a row
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        self.cells.get(row).map(|cells| cells.as_slice())
    }

    /// Text of a row without trailing blanks
    ///
    /// Custom glyph codes appear as their control characters
    /// (e.g. `'\u{1}'` for slot 1).
    pub fn row_text(&self, row: usize) -> &str {
        self.row(row)
            .and_then(|cells| core::str::from_utf8(cells).ok())
            .map(str::trim_end)
            .unwrap_or("")
    }

    /// Bitmap stored in a custom glyph slot
    pub fn glyph(&self, id: u8) -> Option<&GlyphBitmap> {
        self.glyphs.get(id as usize).and_then(|g| g.as_ref())
    }

    /// Current cursor position (col, row)
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Check if the backlight is on
    pub fn is_backlight_on(&self) -> bool {
        self.backlight
    }

    /// Check if `begin` has been called
    pub fn is_initialized(&self) -> bool {
        self.size.is_some()
    }

    /// Number of times the screen was cleared
    pub fn clear_count(&self) -> u32 {
        self.clears
    }

    /// Check if screen changed since the last `mark_clean`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after mirroring it elsewhere)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn active_size(&self) -> Result<(u8, u8), DisplayError> {
        self.size.ok_or(DisplayError::NotInitialized)
    }
}

impl<const COLS: usize, const ROWS: usize> CharDisplay for TextScreen<COLS, ROWS> {
    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError> {
        if cols == 0 || rows == 0 || cols as usize > COLS || rows as usize > ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.size = Some((cols, rows));
        self.clear()
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.active_size()?;
        for row in &mut self.cells {
            row.fill(b' ');
        }
        self.cursor = (0, 0);
        self.clears = self.clears.wrapping_add(1);
        self.dirty = true;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        let (cols, rows) = self.active_size()?;
        if col >= cols || row >= rows {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.cursor = (col, row);
        Ok(())
    }

    fn write(&mut self, code: u8) -> Result<(), DisplayError> {
        let (cols, _) = self.active_size()?;
        let (col, row) = self.cursor;
        if col < cols {
            self.cells[row as usize][col as usize] = code;
            self.cursor.0 = col + 1;
            self.dirty = true;
        }
        Ok(())
    }

    fn register_glyph(&mut self, id: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        let slot = self
            .glyphs
            .get_mut(id as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        *slot = Some(*bitmap);
        Ok(())
    }

    fn enable_backlight(&mut self) -> Result<(), DisplayError> {
        self.backlight = true;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        self.size.unwrap_or((COLS as u8, ROWS as u8))
    }
}

#[cfg(feature = "defmt")]
impl<const COLS: usize, const ROWS: usize> defmt::Format for TextScreen<COLS, ROWS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TextScreen[");
        for row in 0..ROWS {
            if row > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", self.row_text(row));
        }
        defmt::write!(f, "]");
    }
}
