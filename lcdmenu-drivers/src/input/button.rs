//! Debounced GPIO push button
//!
//! Mechanical switches bounce for a few milliseconds when pressed or
//! released. The button only accepts a new level once the raw input has
//! held it for the debounce interval, then reports a single press on the
//! released-to-pressed edge.

use embedded_hal::digital::InputPin;
use lcdmenu_display::PushButton;

/// Millisecond time source
pub trait Clock {
    /// Current time in milliseconds (wrapping)
    fn now_ms(&self) -> u32;
}

/// Push button on a GPIO input with debouncing and edge detection
pub struct DebouncedButton<P, C> {
    pin: P,
    clock: C,
    /// Time the raw level must hold before it is accepted
    interval_ms: u32,
    /// Pressed reads as a low level (pull-up wiring)
    active_low: bool,
    /// Last sampled level (true = pressed)
    raw: bool,
    /// Debounced level (true = pressed)
    stable: bool,
    /// Time of the last raw level change
    changed_at: u32,
    /// Press edge seen during the last poll
    fell: bool,
}

impl<P: InputPin, C: Clock> DebouncedButton<P, C> {
    /// Create a button wired to ground with a pull-up (pressed = low)
    pub fn new(pin: P, clock: C, interval_ms: u16) -> Self {
        Self::with_polarity(pin, clock, interval_ms, true)
    }

    /// Create a button wired to Vcc with a pull-down (pressed = high)
    pub fn new_active_high(pin: P, clock: C, interval_ms: u16) -> Self {
        Self::with_polarity(pin, clock, interval_ms, false)
    }

    fn with_polarity(pin: P, clock: C, interval_ms: u16, active_low: bool) -> Self {
        let now = clock.now_ms();
        let mut button = Self {
            pin,
            clock,
            interval_ms: interval_ms as u32,
            active_low,
            raw: false,
            stable: false,
            changed_at: now,
            fell: false,
        };
        // A button held at startup must not register as a press
        let level = button.sample();
        button.raw = level;
        button.stable = level;
        button
    }

    /// Debounced level: true while the button is held down
    pub fn is_held(&self) -> bool {
        self.stable
    }

    /// Release the pin and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    /// Read the pin as a pressed/released level
    ///
    /// A failed read keeps the previous level.
    fn sample(&mut self) -> bool {
        let level = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        match level {
            Ok(pressed) => pressed,
            Err(_) => {
                warn!("button read failed");
                self.raw
            }
        }
    }
}

impl<P: InputPin, C: Clock> PushButton for DebouncedButton<P, C> {
    fn poll(&mut self) {
        self.fell = false;

        let now = self.clock.now_ms();
        let level = self.sample();
        if level != self.raw {
            self.raw = level;
            self.changed_at = now;
        }

        if self.raw != self.stable && now.wrapping_sub(self.changed_at) >= self.interval_ms {
            self.stable = self.raw;
            self.fell = self.stable;
        }
    }

    fn was_pressed(&self) -> bool {
        self.fell
    }
}
