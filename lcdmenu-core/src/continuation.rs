//! Continuation protocol
//!
//! A menu action may need more than one poll cycle: waiting for further
//! input, animating, talking to a slow device. Instead of blocking, the
//! action returns a [`Flow`] telling the controller whether to call it
//! again on the next cycle, hand over to another action, or finish.
//!
//! The controller keeps at most one running action in a
//! [`ContinuationSlot`]. While the slot is occupied only the back button is
//! processed by the controller itself.

use core::fmt;

/// A menu action, invoked with the controller (or other context) `C`
pub type Action<C> = fn(&mut C) -> Flow<C>;

/// A lifecycle hook, invoked with the controller `C`
pub type Hook<C> = fn(&mut C);

/// What an action wants to happen after it returns
pub enum Flow<C> {
    /// Call the same action again next cycle
    Continue,
    /// Call this action instead from the next cycle on
    Replace(Action<C>),
    /// The action is finished; return to the menu it was started from
    Done,
}

// Manual impls: fn pointers are `Copy` for any `C`, derives would demand `C: Copy`.
impl<C> Clone for Flow<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Flow<C> {}

impl<C> fmt::Debug for Flow<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Continue => f.write_str("Continue"),
            Flow::Replace(_) => f.write_str("Replace(..)"),
            Flow::Done => f.write_str("Done"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<C> defmt::Format for Flow<C> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Flow::Continue => defmt::write!(f, "Continue"),
            Flow::Replace(_) => defmt::write!(f, "Replace(..)"),
            Flow::Done => defmt::write!(f, "Done"),
        }
    }
}

/// Result of applying a [`Flow`] to the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resume {
    /// The same action stays active
    Running,
    /// A different action became active
    Chained,
    /// The slot is now empty
    Completed,
}

/// Holds the currently running action, if any
pub struct ContinuationSlot<C> {
    active: Option<Action<C>>,
}

impl<C> Default for ContinuationSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ContinuationSlot<C> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Make `action` the running continuation
    ///
    /// The action is not invoked here; the controller calls it on the
    /// following poll cycle.
    pub fn start(&mut self, action: Action<C>) {
        self.active = Some(action);
    }

    /// Drop the running continuation without invoking it
    ///
    /// Returns `true` if an action was running.
    pub fn abort(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// The action to invoke this cycle
    pub fn current(&self) -> Option<Action<C>> {
        self.active
    }

    /// Check if an action is running
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Record what the action returned
    pub fn apply(&mut self, flow: Flow<C>) -> Resume {
        match flow {
            Flow::Continue => Resume::Running,
            Flow::Replace(next) => {
                self.active = Some(next);
                Resume::Chained
            }
            Flow::Done => {
                self.active = None;
                Resume::Completed
            }
        }
    }
}
