//! Character display and button abstractions for lcdmenu
//!
//! This crate provides:
//! - `CharDisplay` trait for HD44780-style character displays
//! - `PushButton` trait and `ButtonSet` for the four navigation buttons
//! - Custom glyph bitmaps used by the menu renderer
//! - `TextScreen`, an in-memory character display
//!
//! # Architecture
//!
//! The navigation engine in `lcdmenu-core` only talks to these traits.
//! Hardware drivers (I2C backpacks, parallel buses, GPIO buttons) live in
//! `lcdmenu-drivers` and implement them for concrete peripherals.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  lcdmenu-core (controller)   │
//! └──────────────────────────────┘
//!          │              │
//!          ▼              ▼
//!   CharDisplay      PushButton      (this crate)
//!          │              │
//!          ▼              ▼
//!   Hd44780I2c     DebouncedButton   (lcdmenu-drivers)
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod glyph;
pub mod input;
pub mod screen;

// Re-export key types
pub use backend::{CharDisplay, DisplayError};
pub use glyph::{GlyphBitmap, ARROW, CUSTOM_GLYPHS, SUBMENU_MARKER};
pub use input::{ButtonSet, NavButton, PushButton};
pub use screen::{TextScreen, SCREEN_COLS, SCREEN_ROWS};
