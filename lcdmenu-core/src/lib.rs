//! Board-agnostic menu navigation for character displays
//!
//! This crate contains the navigation engine that does not depend on
//! specific display or button hardware:
//!
//! - Menu tree model and structural validation
//! - Viewport (scrolling window) calculation
//! - Bounded navigation stack for back-navigation
//! - Continuation protocol for actions that span several poll cycles
//! - The `MenuController` state machine tying them together
//! - Panel configuration types
//!
//! # Example
//!
//! ```
//! use lcdmenu_core::{ButtonSet, Flow, MenuController, MenuEntry, PanelConfig};
//! use lcdmenu_display::{PushButton, TextScreen};
//!
//! struct Idle;
//!
//! impl PushButton for Idle {
//!     fn poll(&mut self) {}
//!     fn was_pressed(&self) -> bool {
//!         false
//!     }
//! }
//!
//! type Ctl = MenuController<'static, TextScreen<16, 2>, Idle>;
//!
//! fn hello(ctl: &mut Ctl) -> Flow<Ctl> {
//!     let _ = ctl.display_mut();
//!     Flow::Done
//! }
//!
//! static MAIN: [MenuEntry<'static, Ctl>; 3] = [
//!     MenuEntry::headline("Demo"),
//!     MenuEntry::action("Hello", hello),
//!     MenuEntry::end(),
//! ];
//!
//! let buttons = ButtonSet::new(Idle, Idle, Idle, Idle);
//! let mut ctl: Ctl = MenuController::new(TextScreen::new(), buttons, PanelConfig::new(16, 2));
//! ctl.init().unwrap();
//! ctl.begin(&MAIN);
//! ctl.navigate();
//! assert_eq!(ctl.display().row_text(1), "*Hello");
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod config;
pub mod continuation;
pub mod controller;
pub mod menu;
pub mod stack;
pub mod viewport;

pub use config::{ConfigError, PanelConfig};
pub use continuation::{Action, ContinuationSlot, Flow, Hook, Resume};
pub use controller::{ControllerState, MenuController};
pub use menu::{max_depth, validate, EntryKind, Menu, MenuEntry, TreeError};
pub use stack::{NavStack, NavigationFrame};
pub use viewport::Viewport;

pub use lcdmenu_display::ButtonSet;
