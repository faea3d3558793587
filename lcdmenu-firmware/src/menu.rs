//! Demo menu tree and its actions
//!
//! ```text
//! lcdmenu demo
//!   LED      > Toggle, Blink
//!   Counter  > Count, Reset
//!   Display  > Backlight on, Backlight off
//!   About
//! ```

use core::fmt::Write;

use defmt::{debug, info, warn};
use embassy_rp::gpio::Output;
use heapless::String;
use lcdmenu_core::{Flow, MenuEntry};
use lcdmenu_display::{CharDisplay, DisplayError};

use crate::Ctl;

/// Blink half-periods per blink run
const BLINK_TOGGLES: u8 = 6;

/// Ticks between LED toggles while blinking
const BLINK_TICKS: u16 = 50;

/// State shared with the menu actions
pub struct AppState {
    led: Output<'static>,
    counter: i32,
    toggles_left: u8,
    ticks: u16,
}

impl AppState {
    pub fn new(led: Output<'static>) -> Self {
        Self {
            led,
            counter: 0,
            toggles_left: 0,
            ticks: 0,
        }
    }
}

pub static MAIN: [MenuEntry<'static, Ctl>; 6] = [
    MenuEntry::headline("lcdmenu demo"),
    MenuEntry::submenu("LED", &LED),
    MenuEntry::submenu("Counter", &COUNTER),
    MenuEntry::submenu("Display", &DISPLAY),
    MenuEntry::action("About", about),
    MenuEntry::end(),
];

static LED: [MenuEntry<'static, Ctl>; 4] = [
    MenuEntry::headline("LED"),
    MenuEntry::action("Toggle", toggle_led),
    MenuEntry::action("Blink", start_blink),
    MenuEntry::end(),
];

static COUNTER: [MenuEntry<'static, Ctl>; 4] = [
    MenuEntry::headline("Counter"),
    MenuEntry::action("Count", start_count),
    MenuEntry::action("Reset", reset_count),
    MenuEntry::end(),
];

static DISPLAY: [MenuEntry<'static, Ctl>; 5] = [
    MenuEntry::headline("Display"),
    MenuEntry::action("Backlight on", backlight_on),
    MenuEntry::action("Backlight off", backlight_off),
    MenuEntry::headline("(back to exit)"),
    MenuEntry::end(),
];

/// Select hook
pub fn on_select(ctl: &mut Ctl) {
    debug!("select at depth {}", ctl.stack_depth());
}

/// Back hook
pub fn on_back(ctl: &mut Ctl) {
    debug!("back at depth {}", ctl.stack_depth());
}

fn toggle_led(ctl: &mut Ctl) -> Flow<Ctl> {
    ctl.context_mut().led.toggle();
    info!("LED toggled");
    Flow::Done
}

fn start_blink(ctl: &mut Ctl) -> Flow<Ctl> {
    let state = ctl.context_mut();
    state.toggles_left = BLINK_TOGGLES;
    state.ticks = 0;
    show(ctl, "Blinking...", "back: stop");
    Flow::Replace(blink_step)
}

fn blink_step(ctl: &mut Ctl) -> Flow<Ctl> {
    let state = ctl.context_mut();
    state.ticks += 1;
    if state.ticks < BLINK_TICKS {
        return Flow::Continue;
    }
    state.ticks = 0;
    state.led.toggle();
    state.toggles_left = state.toggles_left.saturating_sub(1);
    if state.toggles_left == 0 {
        info!("blink finished");
        Flow::Done
    } else {
        Flow::Continue
    }
}

fn start_count(ctl: &mut Ctl) -> Flow<Ctl> {
    show_count(ctl);
    Flow::Replace(count_step)
}

/// Next/prev change the counter, select confirms
fn count_step(ctl: &mut Ctl) -> Flow<Ctl> {
    if ctl.is_select_pressed() {
        info!("counter set to {}", ctl.context().counter);
        return Flow::Done;
    }

    let delta = if ctl.is_next_pressed() {
        1
    } else if ctl.is_prev_pressed() {
        -1
    } else {
        return Flow::Continue;
    };
    let state = ctl.context_mut();
    state.counter = state.counter.saturating_add(delta);
    show_count(ctl);
    Flow::Continue
}

fn reset_count(ctl: &mut Ctl) -> Flow<Ctl> {
    ctl.context_mut().counter = 0;
    info!("counter reset");
    Flow::Done
}

fn backlight_on(ctl: &mut Ctl) -> Flow<Ctl> {
    if let Err(e) = ctl.display_mut().enable_backlight() {
        warn!("backlight on failed: {}", e);
    }
    Flow::Done
}

fn backlight_off(ctl: &mut Ctl) -> Flow<Ctl> {
    if let Err(e) = ctl.display_mut().disable_backlight() {
        warn!("backlight off failed: {}", e);
    }
    Flow::Done
}

fn about(ctl: &mut Ctl) -> Flow<Ctl> {
    show(ctl, "lcdmenu", env!("CARGO_PKG_VERSION"));
    Flow::Replace(about_wait)
}

fn about_wait(ctl: &mut Ctl) -> Flow<Ctl> {
    if ctl.is_select_pressed() {
        Flow::Done
    } else {
        Flow::Continue
    }
}

fn show_count(ctl: &mut Ctl) {
    let mut line: String<20> = String::new();
    // Cannot overflow: "Value: " plus at most 11 digits
    let _ = write!(line, "Value: {}", ctl.context().counter);
    show(ctl, "next+ prev-", &line);
}

/// Replace the menu with two lines of text
fn show(ctl: &mut Ctl, top: &str, bottom: &str) {
    if let Err(e) = draw(ctl.display_mut(), top, bottom) {
        warn!("screen draw failed: {}", e);
    }
}

fn draw<D: CharDisplay>(lcd: &mut D, top: &str, bottom: &str) -> Result<(), DisplayError> {
    lcd.clear()?;
    lcd.set_cursor(0, 0)?;
    lcd.print(top)?;
    lcd.set_cursor(0, 1)?;
    lcd.print(bottom)
}
