//! Visible window calculation
//!
//! A menu usually has more entries than the display has rows. The
//! viewport tracks the selected entry and the first visible entry, and
//! scrolls only as far as needed to keep the selection on screen.

use core::ops::Range;

/// Selection and scroll position within one menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Viewport {
    /// Index of the first visible entry
    top: usize,
    /// Index of the selected entry
    current: usize,
    /// Number of entries in the menu
    count: usize,
}

/// Compute the new top-of-window index
///
/// The window keeps its position while `current` is visible, otherwise it
/// moves just far enough to bring `current` onto the first or last row.
pub fn scroll_top(top: usize, current: usize, rows: usize) -> usize {
    let rows = rows.max(1);
    if current < top {
        current
    } else if current - top >= rows {
        current + 1 - rows
    } else {
        top
    }
}

impl Viewport {
    /// Viewport for a freshly shown menu
    ///
    /// The window starts at the top and the selection on `first_selectable`.
    pub fn reset(count: usize, first_selectable: usize) -> Self {
        Self {
            top: 0,
            current: first_selectable,
            count,
        }
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Move the selection
    pub fn select(&mut self, index: usize) {
        self.current = index;
    }

    /// Bring the selection into view and return the visible index range
    pub fn scroll(&mut self, rows: usize) -> Range<usize> {
        self.top = scroll_top(self.top, self.current, rows);
        self.visible(rows)
    }

    /// Indices of the entries currently in the window
    pub fn visible(&self, rows: usize) -> Range<usize> {
        let start = self.top.min(self.count);
        let end = self.count.min(self.top.saturating_add(rows));
        start..end
    }

    /// Row of the selection within the window
    pub fn cursor_row(&self) -> Option<usize> {
        self.current.checked_sub(self.top)
    }

    /// Scroll up one line without moving the selection
    ///
    /// Used to reveal headlines above the first selectable entry. Refuses
    /// if the selection would leave the window.
    pub fn reveal_up(&mut self, rows: usize) -> bool {
        if self.top == 0 || self.current.saturating_sub(self.top - 1) >= rows {
            return false;
        }
        self.top -= 1;
        true
    }

    /// Scroll down one line without moving the selection
    ///
    /// Used to reveal headlines below the last selectable entry. Refuses
    /// if the selection would leave the window or the window is already at
    /// the end.
    pub fn reveal_down(&mut self, rows: usize) -> bool {
        if self.top + rows >= self.count || self.current <= self.top {
            return false;
        }
        self.top += 1;
        true
    }
}
