//! Push-button input abstraction
//!
//! The menu is driven by four discrete buttons. Each button reports a
//! falling edge (press) once per physical press; debouncing is the job of
//! the implementation.

/// A single debounced push button
pub trait PushButton {
    /// Sample the button and update edge state
    fn poll(&mut self);

    /// Whether a press edge was detected by the most recent `poll`
    fn was_pressed(&self) -> bool;

    /// Poll and report a press edge in one step
    fn pressed(&mut self) -> bool {
        self.poll();
        self.was_pressed()
    }
}

/// Logical navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavButton {
    /// Move the cursor to the next selectable entry
    Next,
    /// Move the cursor to the previous selectable entry
    Prev,
    /// Activate the entry under the cursor
    Select,
    /// Leave the current submenu or abort a running action
    Back,
}

/// The four navigation buttons
pub struct ButtonSet<B> {
    pub next: B,
    pub prev: B,
    pub select: B,
    pub back: B,
}

impl<B: PushButton> ButtonSet<B> {
    /// Create a button set
    pub fn new(next: B, prev: B, select: B, back: B) -> Self {
        Self {
            next,
            prev,
            select,
            back,
        }
    }

    /// Get a button by its role
    pub fn get_mut(&mut self, button: NavButton) -> &mut B {
        match button {
            NavButton::Next => &mut self.next,
            NavButton::Prev => &mut self.prev,
            NavButton::Select => &mut self.select,
            NavButton::Back => &mut self.back,
        }
    }

    /// Poll a button and report whether it was pressed
    pub fn pressed(&mut self, button: NavButton) -> bool {
        self.get_mut(button).pressed()
    }
}
