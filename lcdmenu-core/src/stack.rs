//! Bounded navigation stack
//!
//! Storage is a `heapless::Vec` with compile-time capacity `N`. The usable
//! depth is set at runtime from the shape of the menu tree and never
//! exceeds `N`. Pushing onto a full stack is a no-op: the device loses one
//! level of "back" instead of faulting.

use heapless::Vec;

use crate::menu::Menu;

/// A saved parent menu
pub struct NavigationFrame<'m, C> {
    pub menu: &'m Menu<'m, C>,
}

impl<C> Clone for NavigationFrame<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for NavigationFrame<'_, C> {}

impl<'m, C> NavigationFrame<'m, C> {
    pub fn new(menu: &'m Menu<'m, C>) -> Self {
        Self { menu }
    }
}

/// Fixed-capacity LIFO stack
pub struct NavStack<T, const N: usize> {
    frames: Vec<T, N>,
    /// Runtime capacity, `<= N`
    limit: usize,
}

impl<T, const N: usize> Default for NavStack<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> NavStack<T, N> {
    /// Create a stack using the full storage capacity
    pub const fn new() -> Self {
        Self {
            frames: Vec::new(),
            limit: N,
        }
    }

    /// Create a stack holding at most `limit` frames
    ///
    /// `limit` is clamped to the storage capacity `N`.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            limit: limit.min(N),
        }
    }

    /// Push a frame
    ///
    /// Returns `false` and drops the frame if the stack is full.
    pub fn push(&mut self, frame: T) -> bool {
        if self.frames.len() >= self.limit {
            return false;
        }
        self.frames.push(frame).is_ok()
    }

    /// Remove and return the top frame
    pub fn pop(&mut self) -> Option<T> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.limit
    }

    /// Maximum number of frames this stack accepts
    pub fn capacity(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack: NavStack<u8, 4> = NavStack::new();
        assert!(stack.push(1));
        assert!(stack.push(2));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_push_past_limit_is_dropped() {
        let mut stack: NavStack<u8, 8> = NavStack::with_limit(2);
        assert_eq!(stack.capacity(), 2);
        assert!(stack.push(1));
        assert!(stack.push(2));
        assert!(stack.is_full());
        assert!(!stack.push(3));
        assert_eq!(stack.len(), 2);

        // The dropped frame never comes back
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_limit_clamped_to_storage() {
        let mut stack: NavStack<u8, 2> = NavStack::with_limit(10);
        assert_eq!(stack.capacity(), 2);
        assert!(stack.push(1));
        assert!(stack.push(2));
        assert!(!stack.push(3));
    }

    #[test]
    fn test_zero_limit() {
        let mut stack: NavStack<u8, 4> = NavStack::with_limit(0);
        assert!(!stack.push(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_clear() {
        let mut stack: NavStack<u8, 4> = NavStack::new();
        stack.push(1);
        stack.push(2);
        stack.clear();
        assert!(stack.is_empty());
    }
}
