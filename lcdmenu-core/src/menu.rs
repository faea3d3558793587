//! Menu tree model
//!
//! A menu is a slice of [`MenuEntry`] values. The sequence ends at the end
//! of the slice or at the first sentinel ([`MenuEntry::end`]), whichever
//! comes first, so trees written in the classic sentinel-terminated style
//! work unchanged.
//!
//! Submenus are plain references into other slices. Trees are usually
//! `static` and live for the whole program; the engine never mutates them.
//!
//! ```
//! use lcdmenu_core::{Flow, MenuEntry};
//!
//! fn reboot(_: &mut ()) -> Flow<()> {
//!     Flow::Done
//! }
//!
//! static NETWORK: [MenuEntry<'static, ()>; 2] = [
//!     MenuEntry::action("Reboot", reboot),
//!     MenuEntry::end(),
//! ];
//!
//! static MAIN: [MenuEntry<'static, ()>; 3] = [
//!     MenuEntry::headline("Setup"),
//!     MenuEntry::submenu("Network", &NETWORK),
//!     MenuEntry::end(),
//! ];
//!
//! assert_eq!(lcdmenu_core::max_depth(&MAIN), 2);
//! assert!(lcdmenu_core::validate(&MAIN).is_ok());
//! ```

use core::fmt;

use crate::continuation::Action;

/// A sequence of menu entries
pub type Menu<'m, C> = [MenuEntry<'m, C>];

/// What happens when an entry is selected
pub enum EntryKind<'m, C> {
    /// Title or separator line; shown but never selectable
    Headline,
    /// Start an action
    Action(Action<C>),
    /// Open a nested menu
    Submenu(&'m Menu<'m, C>),
}

impl<C> Clone for EntryKind<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for EntryKind<'_, C> {}

/// One line of a menu
pub struct MenuEntry<'m, C> {
    /// `None` marks the sentinel
    name: Option<&'m str>,
    kind: EntryKind<'m, C>,
}

impl<C> Clone for MenuEntry<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for MenuEntry<'_, C> {}

impl<'m, C> MenuEntry<'m, C> {
    /// A non-selectable title line
    pub const fn headline(name: &'m str) -> Self {
        Self {
            name: Some(name),
            kind: EntryKind::Headline,
        }
    }

    /// An entry that starts `action` when selected
    pub const fn action(name: &'m str, action: Action<C>) -> Self {
        Self {
            name: Some(name),
            kind: EntryKind::Action(action),
        }
    }

    /// An entry that opens `menu` when selected
    pub const fn submenu(name: &'m str, menu: &'m Menu<'m, C>) -> Self {
        Self {
            name: Some(name),
            kind: EntryKind::Submenu(menu),
        }
    }

    /// The end-of-menu sentinel
    pub const fn end() -> Self {
        Self {
            name: None,
            kind: EntryKind::Headline,
        }
    }

    /// Text shown on the display (empty for the sentinel)
    pub fn name(&self) -> &'m str {
        self.name.unwrap_or("")
    }

    pub fn kind(&self) -> EntryKind<'m, C> {
        self.kind
    }

    /// Check if this entry terminates its menu
    pub fn is_sentinel(&self) -> bool {
        self.name.is_none()
    }

    /// Check if this entry has an action or a submenu
    pub fn is_selectable(&self) -> bool {
        !self.is_sentinel() && !matches!(self.kind, EntryKind::Headline)
    }

    /// The action started by this entry
    pub fn action_fn(&self) -> Option<Action<C>> {
        match self.kind {
            EntryKind::Action(action) => Some(action),
            _ => None,
        }
    }

    /// The menu opened by this entry
    pub fn submenu_ref(&self) -> Option<&'m Menu<'m, C>> {
        match self.kind {
            EntryKind::Submenu(menu) => Some(menu),
            _ => None,
        }
    }
}

impl<C> fmt::Debug for MenuEntry<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name, self.kind) {
            (None, _) => f.write_str("End"),
            (Some(name), EntryKind::Headline) => write!(f, "Headline({:?})", name),
            (Some(name), EntryKind::Action(_)) => write!(f, "Action({:?})", name),
            (Some(name), EntryKind::Submenu(menu)) => {
                write!(f, "Submenu({:?}, {} entries)", name, len(menu))
            }
        }
    }
}

/// Structural problems found by [`validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TreeError {
    /// A menu has no entries before its sentinel
    EmptyMenu {
        /// Nesting level of the menu (1 = root)
        depth: usize,
    },
    /// A menu has entries but none of them can be selected
    NoSelectableEntry {
        /// Nesting level of the menu (1 = root)
        depth: usize,
    },
}

/// Number of entries before the sentinel
pub fn len<C>(menu: &Menu<'_, C>) -> usize {
    menu.iter()
        .position(MenuEntry::is_sentinel)
        .unwrap_or(menu.len())
}

/// The entries of a menu, without the sentinel and anything after it
pub fn entries<'a, 'm, C>(menu: &'a Menu<'m, C>) -> &'a Menu<'m, C> {
    &menu[..len(menu)]
}

/// Index of the first selectable entry
pub fn first_selectable<C>(menu: &Menu<'_, C>) -> Option<usize> {
    entries(menu).iter().position(MenuEntry::is_selectable)
}

/// Index of the last selectable entry
pub fn last_selectable<C>(menu: &Menu<'_, C>) -> Option<usize> {
    entries(menu).iter().rposition(MenuEntry::is_selectable)
}

/// Index of the nearest selectable entry after `from`
pub fn next_selectable<C>(menu: &Menu<'_, C>, from: usize) -> Option<usize> {
    let entries = entries(menu);
    let start = from.checked_add(1)?;
    entries
        .get(start..)?
        .iter()
        .position(MenuEntry::is_selectable)
        .map(|offset| start + offset)
}

/// Index of the nearest selectable entry before `from`
pub fn prev_selectable<C>(menu: &Menu<'_, C>, from: usize) -> Option<usize> {
    let entries = entries(menu);
    let end = from.min(entries.len());
    entries[..end].iter().rposition(MenuEntry::is_selectable)
}

/// Maximum nesting depth of a tree
///
/// A menu without submenus has depth 1. An empty menu still counts as one
/// level.
pub fn max_depth<C>(menu: &Menu<'_, C>) -> usize {
    entries(menu)
        .iter()
        .filter_map(MenuEntry::submenu_ref)
        .map(max_depth)
        .max()
        .unwrap_or(0)
        + 1
}

/// Check a tree for structural problems
///
/// Every menu, nested ones included, must contain at least one selectable
/// entry. The controller itself never validates; call this once while
/// bringing the device up.
pub fn validate<C>(menu: &Menu<'_, C>) -> Result<(), TreeError> {
    validate_at(menu, 1)
}

fn validate_at<C>(menu: &Menu<'_, C>, depth: usize) -> Result<(), TreeError> {
    let entries = entries(menu);
    if entries.is_empty() {
        return Err(TreeError::EmptyMenu { depth });
    }
    if !entries.iter().any(MenuEntry::is_selectable) {
        return Err(TreeError::NoSelectableEntry { depth });
    }
    for submenu in entries.iter().filter_map(MenuEntry::submenu_ref) {
        validate_at(submenu, depth + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continuation::Flow;
    use proptest::prelude::*;

    fn noop(_: &mut ()) -> Flow<()> {
        Flow::Done
    }

    static LEAF: [MenuEntry<'static, ()>; 2] = [MenuEntry::action("Leaf", noop), MenuEntry::end()];

    static MIDDLE: [MenuEntry<'static, ()>; 3] = [
        MenuEntry::headline("Middle"),
        MenuEntry::submenu("Leaf", &LEAF),
        MenuEntry::end(),
    ];

    static ROOT: [MenuEntry<'static, ()>; 5] = [
        MenuEntry::headline("Status"),
        MenuEntry::action("Run", noop),
        MenuEntry::submenu("Settings", &MIDDLE),
        MenuEntry::submenu("About", &LEAF),
        MenuEntry::end(),
    ];

    static ONLY_HEADLINES: [MenuEntry<'static, ()>; 2] =
        [MenuEntry::headline("Nothing here"), MenuEntry::end()];

    static BROKEN_CHILD: [MenuEntry<'static, ()>; 3] = [
        MenuEntry::action("Run", noop),
        MenuEntry::submenu("Empty", &[]),
        MenuEntry::end(),
    ];

    #[test]
    fn test_sentinel_and_selectable() {
        assert!(MenuEntry::<()>::end().is_sentinel());
        assert!(!MenuEntry::<()>::end().is_selectable());
        assert!(!ROOT[0].is_selectable());
        assert!(ROOT[1].is_selectable());
        assert!(ROOT[2].is_selectable());
        assert!(ROOT[1].action_fn().is_some());
        assert!(ROOT[2].submenu_ref().is_some());
        assert!(ROOT[0].action_fn().is_none() && ROOT[0].submenu_ref().is_none());
    }

    #[test]
    fn test_len_stops_at_sentinel() {
        assert_eq!(len(&ROOT), 4);
        let unterminated = [MenuEntry::<()>::headline("a"), MenuEntry::action("b", noop)];
        assert_eq!(len(&unterminated), 2);
        let early_end = [
            MenuEntry::<()>::action("a", noop),
            MenuEntry::end(),
            MenuEntry::action("hidden", noop),
        ];
        assert_eq!(len(&early_end), 1);
        assert_eq!(last_selectable(&early_end), Some(0));
    }

    #[test]
    fn test_selectable_bounds() {
        assert_eq!(first_selectable(&ROOT), Some(1));
        assert_eq!(last_selectable(&ROOT), Some(3));
        assert_eq!(first_selectable(&ONLY_HEADLINES), None);
    }

    #[test]
    fn test_next_prev_skip_headlines() {
        let menu = [
            MenuEntry::<()>::action("a", noop),
            MenuEntry::headline("--"),
            MenuEntry::action("b", noop),
            MenuEntry::headline("trailing"),
            MenuEntry::end(),
        ];
        assert_eq!(next_selectable(&menu, 0), Some(2));
        assert_eq!(next_selectable(&menu, 2), None);
        assert_eq!(prev_selectable(&menu, 2), Some(0));
        assert_eq!(prev_selectable(&menu, 0), None);
    }

    #[test]
    fn test_max_depth() {
        assert_eq!(max_depth(&LEAF), 1);
        assert_eq!(max_depth(&MIDDLE), 2);
        assert_eq!(max_depth(&ROOT), 3);
        assert_eq!(max_depth::<()>(&[]), 1);
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(&ROOT), Ok(()));
        assert_eq!(validate::<()>(&[]), Err(TreeError::EmptyMenu { depth: 1 }));
        assert_eq!(
            validate(&ONLY_HEADLINES),
            Err(TreeError::NoSelectableEntry { depth: 1 })
        );
        assert_eq!(
            validate(&BROKEN_CHILD),
            Err(TreeError::EmptyMenu { depth: 2 })
        );
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", ROOT[0]), "Headline(\"Status\")");
        assert_eq!(format!("{:?}", ROOT[3]), "Submenu(\"About\", 1 entries)");
        assert_eq!(format!("{:?}", ROOT[4]), "End");
    }

    fn build(layout: &[bool]) -> Vec<MenuEntry<'static, ()>> {
        layout
            .iter()
            .map(|&selectable| {
                if selectable {
                    MenuEntry::action("item", noop)
                } else {
                    MenuEntry::headline("title")
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_next_never_passes_last_selectable(
            layout in proptest::collection::vec(any::<bool>(), 0..24),
            from in 0usize..24,
        ) {
            let menu = build(&layout);
            if let Some(next) = next_selectable(&menu, from) {
                prop_assert!(next > from);
                prop_assert!(menu[next].is_selectable());
                prop_assert!(Some(next) <= last_selectable(&menu));
                prop_assert!(menu[from + 1..next].iter().all(|e| !e.is_selectable()));
            } else {
                prop_assert!(menu.iter().skip(from + 1).all(|e| !e.is_selectable()));
            }
        }

        #[test]
        fn prop_prev_never_passes_first_selectable(
            layout in proptest::collection::vec(any::<bool>(), 0..24),
            from in 0usize..24,
        ) {
            let menu = build(&layout);
            match prev_selectable(&menu, from) {
                Some(prev) => {
                    prop_assert!(prev < from);
                    prop_assert!(menu[prev].is_selectable());
                    prop_assert!(Some(prev) >= first_selectable(&menu));
                }
                None => {
                    let end = from.min(menu.len());
                    prop_assert!(menu[..end].iter().all(|e| !e.is_selectable()));
                }
            }
        }
    }
}
