//! Custom glyph bitmaps
//!
//! HD44780 controllers have eight CGRAM slots for user-defined 5x8
//! characters. Each row of a bitmap uses the low five bits.

/// One 5x8 custom character
pub type GlyphBitmap = [u8; 8];

/// Number of custom glyph slots on HD44780-compatible controllers
pub const GLYPH_SLOTS: u8 = 8;

/// Slot holding the submenu arrow
pub const SUBMENU_MARKER: u8 = 1;

/// Right-pointing arrow shown in front of a selected submenu entry
pub const ARROW: GlyphBitmap = [
    0b00000, //
    0b00100, //   #
    0b00010, //    #
    0b11111, // #####
    0b11111, // #####
    0b00010, //    #
    0b00100, //   #
    0b00000, //
];

/// Glyphs registered with the display during initialization
pub const CUSTOM_GLYPHS: &[(u8, GlyphBitmap)] = &[(SUBMENU_MARKER, ARROW)];
