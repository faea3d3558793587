//! Panel configuration
//!
//! Geometry of the character display, button debounce interval and the
//! glyphs used to mark the selection.

use lcdmenu_display::SUBMENU_MARKER;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported panel width (HD44780 DDRAM line length)
pub const MAX_COLS: u8 = 40;

/// Largest supported panel height
pub const MAX_ROWS: u8 = 4;

/// Longest accepted debounce interval
pub const MAX_DEBOUNCE_MS: u16 = 500;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Columns or rows are zero or exceed the controller limits
    InvalidGeometry,
    /// Debounce interval out of range
    InvalidDebounce,
}

/// Character panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Characters per row
    pub cols: u8,
    /// Number of rows
    pub rows: u8,
    /// Button debounce interval (ms)
    pub debounce_ms: u16,
    /// Character drawn in front of a selected action entry
    pub cursor_glyph: u8,
    /// Character drawn in front of a selected submenu entry
    pub submenu_glyph: u8,
}

impl Default for PanelConfig {
    /// 16x2 panel, 10 ms debounce
    fn default() -> Self {
        Self::new(16, 2)
    }
}

impl PanelConfig {
    /// Create a config for a `cols` x `rows` panel with default markers
    pub const fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            debounce_ms: 10,
            cursor_glyph: b'*',
            submenu_glyph: SUBMENU_MARKER,
        }
    }

    /// Set the debounce interval
    pub const fn with_debounce(mut self, debounce_ms: u16) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Set the selection markers
    pub const fn with_markers(mut self, cursor_glyph: u8, submenu_glyph: u8) -> Self {
        self.cursor_glyph = cursor_glyph;
        self.submenu_glyph = submenu_glyph;
        self
    }

    /// Check the configuration against controller limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 || self.cols > MAX_COLS || self.rows > MAX_ROWS {
            return Err(ConfigError::InvalidGeometry);
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::InvalidDebounce);
        }
        Ok(())
    }
}
