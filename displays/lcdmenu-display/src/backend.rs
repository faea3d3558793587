//! Character display trait
//!
//! Defines the interface the menu engine uses to draw on an
//! HD44780-style text display.

use crate::glyph::GlyphBitmap;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates, dimensions or glyph slot
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Character display trait
///
/// Coordinates are in character cells, `(col, row)` with the origin in the
/// top-left corner, matching the LiquidCrystal family of drivers.
pub trait CharDisplay {
    /// Initialize the controller for a panel of `cols` x `rows` characters
    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError>;

    /// Clear the entire display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor to the given cell
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write a single character code at the cursor and advance it
    ///
    /// Codes 0-7 address the custom glyph slots.
    fn write(&mut self, code: u8) -> Result<(), DisplayError>;

    /// Print text at the cursor
    ///
    /// The default implementation writes the text byte by byte.
    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            self.write(byte)?;
        }
        Ok(())
    }

    /// Store a 5x8 bitmap in custom glyph slot `id` (0-7)
    fn register_glyph(&mut self, id: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError>;

    /// Turn the backlight on
    fn enable_backlight(&mut self) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}
