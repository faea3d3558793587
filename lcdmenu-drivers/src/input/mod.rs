//! Button drivers

pub mod button;

pub use button::{Clock, DebouncedButton};
