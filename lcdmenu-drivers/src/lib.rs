//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in lcdmenu-display for common hardware, built on `embedded-hal` 1.0:
//!
//! - Character LCDs (HD44780 behind a PCF8574 I2C backpack)
//! - Push buttons (debounced GPIO inputs)

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod input;
pub mod lcd;
