//! Configuration types
//!
//! Board-agnostic panel settings. Firmware builds usually fill these from
//! a TOML file at build time.

pub mod panel;

pub use panel::*;
