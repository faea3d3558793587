//! Navigation controller
//!
//! Ties the menu tree, viewport, navigation stack and continuation slot
//! to a character display and four buttons.
//!
//! The controller is driven by calling [`MenuController::navigate`] from
//! the main loop. Each call samples the buttons, performs at most one
//! transition and returns without blocking:
//!
//! 1. Back aborts a running action and returns to the parent menu.
//! 2. A running action is resumed; nothing else happens that cycle.
//! 3. Next / previous move the cursor over selectable entries.
//! 4. Select opens a submenu or starts an action on the next cycle.

use core::ptr;

use lcdmenu_display::{ButtonSet, CharDisplay, DisplayError, NavButton, PushButton, CUSTOM_GLYPHS};

use crate::config::PanelConfig;
use crate::continuation::{Action, ContinuationSlot, Hook, Resume};
use crate::menu::{self, EntryKind, Menu, MenuEntry};
use crate::stack::{NavStack, NavigationFrame};
use crate::viewport::Viewport;

/// Default navigation stack storage (maximum supported tree depth)
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// `begin` has not been called with a usable tree
    NotStarted,
    /// Showing a menu, waiting for input
    Idle,
    /// An action is running as a continuation
    Running,
}

/// Menu navigation state machine
///
/// - `D`: character display
/// - `B`: push button type used for all four buttons
/// - `S`: application context handed to actions through the controller
/// - `N`: storage for the navigation stack; trees deeper than `N` lose
///   their deepest back-navigation levels
///
/// Actions and hooks receive `&mut MenuController`, so menu trees are
/// typed over the concrete controller:
///
/// ```ignore
/// type Ctl = MenuController<'static, Lcd, Button, AppState>;
/// static MAIN: [MenuEntry<'static, Ctl>; 2] = [MenuEntry::action("Go", go), MenuEntry::end()];
/// ```
pub struct MenuController<'m, D, B, S = (), const N: usize = DEFAULT_MAX_DEPTH> {
    display: D,
    buttons: ButtonSet<B>,
    config: PanelConfig,
    context: S,

    /// Menu currently shown
    menu: Option<&'m Menu<'m, Self>>,
    viewport: Viewport,
    stack: NavStack<NavigationFrame<'m, Self>, N>,
    slot: ContinuationSlot<Self>,

    on_enter: Option<Hook<Self>>,
    on_exit: Option<Hook<Self>>,

    started: bool,
}

impl<'m, D, B, S, const N: usize> MenuController<'m, D, B, S, N>
where
    D: CharDisplay,
    B: PushButton,
{
    /// Create a controller with a default application context
    pub fn new(display: D, buttons: ButtonSet<B>, config: PanelConfig) -> Self
    where
        S: Default,
    {
        Self::with_context(display, buttons, config, S::default())
    }

    /// Create a controller owning `context`
    pub fn with_context(display: D, buttons: ButtonSet<B>, config: PanelConfig, context: S) -> Self {
        Self {
            display,
            buttons,
            config,
            context,
            menu: None,
            viewport: Viewport::default(),
            stack: NavStack::with_limit(0),
            slot: ContinuationSlot::new(),
            on_enter: None,
            on_exit: None,
            started: false,
        }
    }

    /// Prepare the display: geometry, custom glyphs, backlight
    ///
    /// Call once before [`begin`](Self::begin).
    pub fn init(&mut self) -> Result<(), DisplayError> {
        debug!("menu init {}x{}", self.config.cols, self.config.rows);
        self.display.begin(self.config.cols, self.config.rows)?;
        for (id, bitmap) in CUSTOM_GLYPHS {
            self.display.register_glyph(*id, bitmap)?;
        }
        self.display.clear()?;
        self.display.enable_backlight()
    }

    /// Start navigating `tree` and show its root
    ///
    /// The navigation stack is sized to the depth of the tree. An empty
    /// tree leaves the controller untouched.
    pub fn begin(&mut self, tree: &'m Menu<'m, Self>) {
        if menu::len(tree) == 0 {
            warn!("menu begin: empty tree ignored");
            return;
        }

        let depth = menu::max_depth(tree);
        if depth > N {
            warn!("menu depth {} exceeds stack storage {}", depth, N);
        }
        self.stack = NavStack::with_limit(depth);
        self.slot = ContinuationSlot::new();
        debug!("menu begin: depth {}", depth);

        self.menu = None;
        self.show_menu(tree);
        self.started = true;
    }

    /// Poll the buttons and advance the state machine by one step
    ///
    /// Does nothing before [`begin`](Self::begin).
    pub fn navigate(&mut self) {
        if !self.started {
            return;
        }

        if self.buttons.pressed(NavButton::Back) {
            self.back();
            return;
        }

        if let Some(action) = self.slot.current() {
            self.resume(action);
            return;
        }

        if self.buttons.pressed(NavButton::Next) {
            self.select_next();
            return;
        }

        if self.buttons.pressed(NavButton::Prev) {
            self.select_prev();
            return;
        }

        if self.buttons.pressed(NavButton::Select) {
            self.select();
        }
    }

    /// Redraw the current menu
    ///
    /// Useful after an action drew its own screen and wants the menu back
    /// without finishing. Does nothing before [`begin`](Self::begin).
    pub fn refresh(&mut self) {
        if self.started {
            self.render();
        }
    }

    /// Call `hook` every time select is pressed, before the selection is
    /// acted on
    pub fn on_enter_menu(&mut self, hook: Hook<Self>) {
        self.on_enter = Some(hook);
    }

    /// Call `hook` every time back is pressed, before a running action is
    /// aborted and the parent menu restored
    pub fn on_exit_menu(&mut self, hook: Hook<Self>) {
        self.on_exit = Some(hook);
    }

    // ---- Direct button access for running actions ----

    pub fn is_next_pressed(&mut self) -> bool {
        self.buttons.pressed(NavButton::Next)
    }

    pub fn is_prev_pressed(&mut self) -> bool {
        self.buttons.pressed(NavButton::Prev)
    }

    pub fn is_select_pressed(&mut self) -> bool {
        self.buttons.pressed(NavButton::Select)
    }

    pub fn is_back_pressed(&mut self) -> bool {
        self.buttons.pressed(NavButton::Back)
    }

    // ---- Accessors ----

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Display access for actions drawing their own screens
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn buttons_mut(&mut self) -> &mut ButtonSet<B> {
        &mut self.buttons
    }

    pub fn context(&self) -> &S {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut S {
        &mut self.context
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn current_menu(&self) -> Option<&'m Menu<'m, Self>> {
        self.menu
    }

    /// Number of saved parent menus
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Maximum number of saved parent menus for the current tree
    pub fn stack_capacity(&self) -> usize {
        self.stack.capacity()
    }

    /// Check if an action is running
    pub fn is_running(&self) -> bool {
        self.slot.is_active()
    }

    pub fn state(&self) -> ControllerState {
        if !self.started {
            ControllerState::NotStarted
        } else if self.slot.is_active() {
            ControllerState::Running
        } else {
            ControllerState::Idle
        }
    }

    // ---- Transitions ----

    fn back(&mut self) {
        if self.slot.abort() {
            debug!("back: action aborted");
        }
        if let Some(hook) = self.on_exit {
            hook(self);
        }
        match self.stack.pop() {
            Some(frame) => {
                trace!("back: pop, depth {}", self.stack.len());
                self.show_menu(frame.menu);
            }
            None => trace!("back: stack empty"),
        }
    }

    fn resume(&mut self, action: Action<Self>) {
        let flow = action(self);
        match self.slot.apply(flow) {
            Resume::Running => {}
            Resume::Chained => debug!("action chained"),
            Resume::Completed => {
                debug!("action done");
                if let Some(frame) = self.stack.pop() {
                    self.show_menu(frame.menu);
                }
            }
        }
    }

    fn select_next(&mut self) {
        let Some(menu) = self.menu else { return };
        let rows = self.rows();
        match menu::next_selectable(menu, self.viewport.current()) {
            Some(next) => self.viewport.select(next),
            None => {
                // Already on the last selectable entry; show trailing headlines
                if !self.viewport.reveal_down(rows) {
                    return;
                }
            }
        }
        trace!("next: {}", self.viewport.current());
        self.render();
    }

    fn select_prev(&mut self) {
        let Some(menu) = self.menu else { return };
        let rows = self.rows();
        match menu::prev_selectable(menu, self.viewport.current()) {
            Some(prev) => self.viewport.select(prev),
            None => {
                // Already on the first selectable entry; show leading headlines
                if !self.viewport.reveal_up(rows) {
                    return;
                }
            }
        }
        trace!("prev: {}", self.viewport.current());
        self.render();
    }

    fn select(&mut self) {
        let Some(menu) = self.menu else { return };
        let Some(entry) = menu::entries(menu).get(self.viewport.current()) else {
            return;
        };

        if let Some(hook) = self.on_enter {
            hook(self);
        }

        if !self.stack.push(NavigationFrame::new(menu)) {
            warn!("navigation stack full, back level dropped");
        }

        match entry.kind() {
            EntryKind::Action(action) => {
                debug!("select: start action");
                self.slot.start(action);
            }
            EntryKind::Submenu(submenu) => {
                debug!("select: open submenu, depth {}", self.stack.len());
                self.show_menu(submenu);
            }
            EntryKind::Headline => {}
        }
    }

    /// Make `menu` current and draw it
    ///
    /// Selection and scroll position reset only when the menu changes
    /// identity; showing the same menu again keeps them.
    fn show_menu(&mut self, menu: &'m Menu<'m, Self>) {
        let same = self.menu.is_some_and(|shown| ptr::eq(shown, menu));
        if !same {
            self.menu = Some(menu);
            let first = menu::first_selectable(menu).unwrap_or(0);
            self.viewport = Viewport::reset(menu::len(menu), first);
        }
        self.render();
    }

    fn rows(&self) -> usize {
        self.config.rows as usize
    }

    fn render(&mut self) {
        if let Err(_e) = self.draw() {
            warn!("menu render failed: {}", _e);
        }
    }

    fn draw(&mut self) -> Result<(), DisplayError> {
        let Some(menu) = self.menu else {
            return Ok(());
        };
        let visible = self.viewport.scroll(self.rows());
        let current = self.viewport.current();
        let start = visible.start;

        self.display.clear()?;
        for (index, entry) in menu::entries(menu)[visible].iter().enumerate() {
            let index = start + index;
            self.display.set_cursor(0, (index - start) as u8)?;
            if let Some(marker) = self.marker(entry, index == current) {
                self.display.write(marker)?;
            }
            self.display.print(entry.name())?;
        }
        Ok(())
    }

    /// Leading character of a row: cursor glyph, expand glyph, blank for
    /// other selectable rows, nothing for headlines
    fn marker(&self, entry: &MenuEntry<'m, Self>, selected: bool) -> Option<u8> {
        if !entry.is_selectable() {
            return None;
        }
        if !selected {
            return Some(b' ');
        }
        match entry.kind() {
            EntryKind::Submenu(_) => Some(self.config.submenu_glyph),
            _ => Some(self.config.cursor_glyph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continuation::Flow;
    use lcdmenu_display::{TextScreen, SUBMENU_MARKER};

    /// Button that reports a press on the poll after `queue`
    #[derive(Default)]
    struct MockButton {
        queued: bool,
        fell: bool,
        polls: u32,
    }

    impl PushButton for MockButton {
        fn poll(&mut self) {
            self.polls += 1;
            self.fell = core::mem::take(&mut self.queued);
        }

        fn was_pressed(&self) -> bool {
            self.fell
        }
    }

    #[derive(Default)]
    struct Counters {
        forever: u32,
        twice: u32,
        chain_first: u32,
        chain_second: u32,
        enters: u32,
        exits: u32,
        seen_select: u32,
    }

    type Ctl = MenuController<'static, TextScreen<16, 2>, MockButton, Counters, 4>;

    fn run_forever(ctl: &mut Ctl) -> Flow<Ctl> {
        ctl.context_mut().forever += 1;
        Flow::Continue
    }

    fn run_twice(ctl: &mut Ctl) -> Flow<Ctl> {
        let c = ctl.context_mut();
        c.twice += 1;
        if c.twice >= 2 {
            Flow::Done
        } else {
            Flow::Continue
        }
    }

    fn chain_first(ctl: &mut Ctl) -> Flow<Ctl> {
        ctl.context_mut().chain_first += 1;
        Flow::Replace(chain_second)
    }

    fn chain_second(ctl: &mut Ctl) -> Flow<Ctl> {
        ctl.context_mut().chain_second += 1;
        Flow::Done
    }

    fn wait_for_select(ctl: &mut Ctl) -> Flow<Ctl> {
        if ctl.is_select_pressed() {
            ctl.context_mut().seen_select += 1;
            Flow::Done
        } else {
            Flow::Continue
        }
    }

    fn count_enter(ctl: &mut Ctl) {
        ctl.context_mut().enters += 1;
    }

    fn count_exit(ctl: &mut Ctl) {
        ctl.context_mut().exits += 1;
    }

    static LEVEL3: [MenuEntry<'static, Ctl>; 2] = [MenuEntry::action("Deep", run_forever), MenuEntry::end()];

    static LEVEL2: [MenuEntry<'static, Ctl>; 2] = [MenuEntry::submenu("Level 3", &LEVEL3), MenuEntry::end()];

    static SETTINGS: [MenuEntry<'static, Ctl>; 5] = [
        MenuEntry::action("Twice", run_twice),
        MenuEntry::action("Chain", chain_first),
        MenuEntry::action("Wait", wait_for_select),
        MenuEntry::submenu("Level 2", &LEVEL2),
        MenuEntry::end(),
    ];

    static MAIN: [MenuEntry<'static, Ctl>; 4] = [
        MenuEntry::headline("Status"),
        MenuEntry::action("Run", run_forever),
        MenuEntry::submenu("Settings", &SETTINGS),
        MenuEntry::end(),
    ];

    static SECTIONS: [MenuEntry<'static, Ctl>; 6] = [
        MenuEntry::headline("Top"),
        MenuEntry::action("A", run_forever),
        MenuEntry::headline("Middle"),
        MenuEntry::action("B", run_forever),
        MenuEntry::headline("Bottom"),
        MenuEntry::end(),
    ];

    static EMPTY: [MenuEntry<'static, Ctl>; 1] = [MenuEntry::end()];

    fn controller() -> Ctl {
        let buttons = ButtonSet::new(
            MockButton::default(),
            MockButton::default(),
            MockButton::default(),
            MockButton::default(),
        );
        let mut ctl: Ctl = MenuController::new(TextScreen::new(), buttons, PanelConfig::new(16, 2));
        ctl.init().unwrap();
        ctl
    }

    fn started() -> Ctl {
        let mut ctl = controller();
        ctl.begin(&MAIN);
        ctl
    }

    fn press(ctl: &mut Ctl, button: NavButton) {
        ctl.buttons_mut().get_mut(button).queued = true;
        ctl.navigate();
    }

    fn rows(ctl: &Ctl) -> (&str, &str) {
        (ctl.display().row_text(0), ctl.display().row_text(1))
    }

    fn is_current(ctl: &Ctl, menu: &'static Menu<'static, Ctl>) -> bool {
        ctl.current_menu().is_some_and(|m| ptr::eq(m, menu))
    }

    #[test]
    fn test_init_prepares_display() {
        let ctl = controller();
        assert!(ctl.display().is_initialized());
        assert!(ctl.display().is_backlight_on());
        assert!(ctl.display().glyph(SUBMENU_MARKER).is_some());
        assert_eq!(ctl.state(), ControllerState::NotStarted);
    }

    #[test]
    fn test_navigate_before_begin_is_noop() {
        let mut ctl = controller();
        let clears = ctl.display().clear_count();
        for button in [NavButton::Next, NavButton::Select, NavButton::Back] {
            press(&mut ctl, button);
        }
        ctl.refresh();
        assert_eq!(ctl.display().clear_count(), clears);
        assert_eq!(ctl.state(), ControllerState::NotStarted);
        assert!(ctl.current_menu().is_none());
        // Buttons are not even sampled
        assert_eq!(ctl.buttons_mut().next.polls, 0);
    }

    #[test]
    fn test_begin_with_empty_tree_is_noop() {
        let mut ctl = controller();
        ctl.begin(&EMPTY);
        assert_eq!(ctl.state(), ControllerState::NotStarted);
        ctl.begin(&[]);
        assert_eq!(ctl.state(), ControllerState::NotStarted);
    }

    #[test]
    fn test_begin_shows_first_selectable() {
        let ctl = started();
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(rows(&ctl), ("Status", "*Run"));
        assert_eq!(ctl.viewport().current(), 1);
        assert_eq!(ctl.viewport().top(), 0);
        assert_eq!(ctl.stack_capacity(), 4);
    }

    #[test]
    fn test_end_to_end_scroll_and_back() {
        let mut ctl = started();

        press(&mut ctl, NavButton::Next);
        assert_eq!(ctl.viewport().current(), 2);
        assert_eq!(ctl.viewport().top(), 1);
        assert_eq!(rows(&ctl), (" Run", "\u{1}Settings"));

        // Nothing to go back to
        let clears = ctl.display().clear_count();
        press(&mut ctl, NavButton::Back);
        assert_eq!(rows(&ctl), (" Run", "\u{1}Settings"));
        assert_eq!(ctl.display().clear_count(), clears);
        assert_eq!(ctl.stack_depth(), 0);
    }

    #[test]
    fn test_selection_clamps_at_both_ends() {
        let mut ctl = started();
        for _ in 0..5 {
            press(&mut ctl, NavButton::Next);
            assert_eq!(ctl.viewport().current(), 2);
        }
        for _ in 0..5 {
            press(&mut ctl, NavButton::Prev);
            assert_eq!(ctl.viewport().current(), 1);
        }
    }

    #[test]
    fn test_prev_at_first_entry_reveals_headline() {
        let mut ctl = started();
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Prev);
        assert_eq!(ctl.viewport().current(), 1);
        assert_eq!(ctl.viewport().top(), 1);
        assert_eq!(rows(&ctl), ("*Run", " Settings"));

        press(&mut ctl, NavButton::Prev);
        assert_eq!(ctl.viewport().current(), 1);
        assert_eq!(ctl.viewport().top(), 0);
        assert_eq!(rows(&ctl), ("Status", "*Run"));
    }

    #[test]
    fn test_next_skips_headlines_and_clamps() {
        let mut ctl = controller();
        ctl.begin(&SECTIONS);
        assert_eq!(ctl.viewport().current(), 1);

        press(&mut ctl, NavButton::Next);
        assert_eq!(ctl.viewport().current(), 3);
        assert_eq!(rows(&ctl), ("Middle", "*B"));

        // Past the last selectable entry: cursor stays, trailing headline scrolls in
        press(&mut ctl, NavButton::Next);
        assert_eq!(ctl.viewport().current(), 3);
        assert_eq!(rows(&ctl), ("*B", "Bottom"));

        press(&mut ctl, NavButton::Next);
        assert_eq!(ctl.viewport().current(), 3);
        assert_eq!(ctl.viewport().top(), 3);

        press(&mut ctl, NavButton::Prev);
        assert_eq!(ctl.viewport().current(), 1);
        assert_eq!(rows(&ctl), ("*A", "Middle"));
    }

    #[test]
    fn test_submenu_enter_and_back() {
        let mut ctl = started();
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);

        assert!(is_current(&ctl, &SETTINGS));
        assert_eq!(ctl.stack_depth(), 1);
        assert_eq!(ctl.viewport().current(), 0);
        assert_eq!(rows(&ctl), ("*Twice", " Chain"));

        press(&mut ctl, NavButton::Back);
        assert!(is_current(&ctl, &MAIN));
        assert_eq!(ctl.stack_depth(), 0);
        // Returning to a different menu resets selection and window
        assert_eq!(ctl.viewport().current(), 1);
        assert_eq!(rows(&ctl), ("Status", "*Run"));
    }

    #[test]
    fn test_select_defers_action_to_next_cycle() {
        let mut ctl = started();
        press(&mut ctl, NavButton::Select);

        assert_eq!(ctl.state(), ControllerState::Running);
        assert_eq!(ctl.context().forever, 0);
        assert_eq!(ctl.stack_depth(), 1);

        ctl.navigate();
        assert_eq!(ctl.context().forever, 1);
    }

    #[test]
    fn test_continue_is_idempotent() {
        let mut ctl = started();
        press(&mut ctl, NavButton::Select);
        let viewport = *ctl.viewport();

        for n in 1..=10 {
            // Next/select are ignored while running
            press(&mut ctl, NavButton::Next);
            assert_eq!(ctl.context().forever, n);
        }
        assert_eq!(ctl.state(), ControllerState::Running);
        assert!(is_current(&ctl, &MAIN));
        assert_eq!(*ctl.viewport(), viewport);
        assert_eq!(ctl.stack_depth(), 1);
    }

    #[test]
    fn test_done_pops_and_restores_menu() {
        let mut ctl = started();
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);
        press(&mut ctl, NavButton::Select);
        assert_eq!(ctl.stack_depth(), 2);
        assert!(ctl.is_running());

        ctl.navigate();
        assert_eq!(ctl.context().twice, 1);
        assert!(ctl.is_running());

        ctl.navigate();
        assert_eq!(ctl.context().twice, 2);
        assert!(!ctl.is_running());
        assert_eq!(ctl.stack_depth(), 1);
        assert!(is_current(&ctl, &SETTINGS));
        // Same menu identity: selection kept
        assert_eq!(ctl.viewport().current(), 0);
        assert_eq!(rows(&ctl), ("*Twice", " Chain"));
    }

    #[test]
    fn test_replace_chains_without_input() {
        let mut ctl = started();
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);

        ctl.navigate();
        assert_eq!(ctl.context().chain_first, 1);
        assert_eq!(ctl.context().chain_second, 0);
        assert!(ctl.is_running());

        ctl.navigate();
        assert_eq!(ctl.context().chain_first, 1);
        assert_eq!(ctl.context().chain_second, 1);
        assert!(!ctl.is_running());
        assert!(is_current(&ctl, &SETTINGS));
        assert_eq!(ctl.viewport().current(), 1);
    }

    #[test]
    fn test_action_reads_buttons_itself() {
        let mut ctl = started();
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);
        assert!(ctl.is_running());

        ctl.navigate();
        assert_eq!(ctl.context().seen_select, 0);

        press(&mut ctl, NavButton::Select);
        assert_eq!(ctl.context().seen_select, 1);
        assert!(!ctl.is_running());
    }

    #[test]
    fn test_back_aborts_running_action() {
        let mut ctl = started();
        ctl.on_exit_menu(count_exit);
        press(&mut ctl, NavButton::Select);
        ctl.navigate();
        assert_eq!(ctl.context().forever, 1);

        press(&mut ctl, NavButton::Back);
        assert_eq!(ctl.context().forever, 1, "aborted action must not run");
        assert_eq!(ctl.context().exits, 1);
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert_eq!(ctl.stack_depth(), 0);
        assert_eq!(rows(&ctl), ("Status", "*Run"));

        ctl.navigate();
        assert_eq!(ctl.context().forever, 1);
    }

    #[test]
    fn test_back_pops_exactly_one_frame() {
        let mut ctl = started();
        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);
        press(&mut ctl, NavButton::Select);
        assert_eq!(ctl.stack_depth(), 2);

        press(&mut ctl, NavButton::Back);
        assert!(!ctl.is_running());
        assert_eq!(ctl.stack_depth(), 1);
        assert!(is_current(&ctl, &SETTINGS));
    }

    #[test]
    fn test_hooks() {
        let mut ctl = started();
        ctl.on_enter_menu(count_enter);
        ctl.on_exit_menu(count_exit);

        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);
        assert_eq!(ctl.context().enters, 1);
        assert_eq!(ctl.context().exits, 0);

        press(&mut ctl, NavButton::Back);
        assert_eq!(ctl.context().exits, 1);

        // Back on the root still notifies
        press(&mut ctl, NavButton::Back);
        assert_eq!(ctl.context().exits, 2);
    }

    #[test]
    fn test_stack_depth_bound() {
        let mut ctl = started();
        // MAIN -> SETTINGS -> LEVEL2 -> LEVEL3 -> action: depth 4
        assert_eq!(ctl.stack_capacity(), 4);

        press(&mut ctl, NavButton::Next);
        press(&mut ctl, NavButton::Select);
        for _ in 0..3 {
            press(&mut ctl, NavButton::Next);
        }
        press(&mut ctl, NavButton::Select);
        press(&mut ctl, NavButton::Select);
        assert!(is_current(&ctl, &LEVEL3));
        assert_eq!(ctl.stack_depth(), 3);

        press(&mut ctl, NavButton::Select);
        assert!(ctl.is_running());
        assert_eq!(ctl.stack_depth(), 4);

        let mut pops = 0;
        while ctl.stack_depth() > 0 {
            press(&mut ctl, NavButton::Back);
            pops += 1;
        }
        assert_eq!(pops, 4);
        assert!(is_current(&ctl, &MAIN));
    }

    #[test]
    fn test_push_beyond_storage_is_dropped() {
        type Shallow = MenuController<'static, TextScreen<16, 2>, MockButton, (), 1>;

        fn idle(_: &mut Shallow) -> Flow<Shallow> {
            Flow::Continue
        }

        static INNER: [MenuEntry<'static, Shallow>; 2] = [MenuEntry::action("Inner", idle), MenuEntry::end()];
        static OUTER: [MenuEntry<'static, Shallow>; 2] = [MenuEntry::submenu("Outer", &INNER), MenuEntry::end()];

        let buttons = ButtonSet::new(
            MockButton::default(),
            MockButton::default(),
            MockButton::default(),
            MockButton::default(),
        );
        let mut ctl: Shallow = MenuController::new(TextScreen::new(), buttons, PanelConfig::new(16, 2));
        ctl.init().unwrap();
        ctl.begin(&OUTER);
        assert_eq!(ctl.stack_capacity(), 1);

        ctl.buttons_mut().select.queued = true;
        ctl.navigate();
        assert!(ctl.current_menu().is_some_and(|m| ptr::eq(m, &INNER)));
        assert_eq!(ctl.stack_depth(), 1);

        // Second push does not fit; the action still starts
        ctl.buttons_mut().select.queued = true;
        ctl.navigate();
        assert!(ctl.is_running());
        assert_eq!(ctl.stack_depth(), 1);

        // Back aborts and returns to the only saved level
        ctl.buttons_mut().back.queued = true;
        ctl.navigate();
        assert!(ctl.current_menu().is_some_and(|m| ptr::eq(m, &OUTER)));
        assert_eq!(ctl.stack_depth(), 0);
    }

    #[test]
    fn test_render_errors_are_swallowed() {
        let buttons = ButtonSet::new(
            MockButton::default(),
            MockButton::default(),
            MockButton::default(),
            MockButton::default(),
        );
        // Display never initialized: every draw fails
        let mut ctl: Ctl = MenuController::new(TextScreen::new(), buttons, PanelConfig::new(16, 2));
        ctl.begin(&MAIN);
        assert_eq!(ctl.state(), ControllerState::Idle);
        press(&mut ctl, NavButton::Next);
        assert_eq!(ctl.viewport().current(), 2);
    }
}
