//! lcdmenu - Four-button LCD menu demo firmware
//!
//! Drives an HD44780 character LCD over a PCF8574 I2C backpack and four
//! push buttons from an RP2040. The menu engine is polled from a fixed
//! ticker; actions started from the menu run one step per tick.
//!
//! Wiring (Raspberry Pi Pico):
//! - LCD backpack: SDA GPIO4, SCL GPIO5 (I2C0)
//! - Buttons to ground: next GPIO10, prev GPIO11, select GPIO12, back GPIO13
//! - On-board LED: GPIO25

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use lcdmenu_core::{ButtonSet, MenuController};
use lcdmenu_drivers::input::{Clock, DebouncedButton};
use lcdmenu_drivers::lcd::Hd44780I2c;

mod menu;
mod panel;

use menu::AppState;

/// LCD on the I2C0 backpack
pub type Lcd = Hd44780I2c<I2c<'static, I2C0, Blocking>, Delay>;

/// Debounced button on a pulled-up GPIO
pub type Button = DebouncedButton<Input<'static>, UptimeClock>;

/// The menu controller as wired on this board
pub type Ctl = MenuController<'static, Lcd, Button, AppState>;

/// Millisecond clock backed by the embassy time driver
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("lcdmenu firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    if let Err(e) = panel::PANEL.validate() {
        error!("Panel config rejected: {}", e);
    }
    if let Err(e) = lcdmenu_core::validate(&menu::MAIN) {
        warn!("Menu tree problem: {}", e);
    }

    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let lcd = Hd44780I2c::new(bus, Delay, panel::LCD_ADDRESS);
    info!("LCD on I2C0 at {:#x}", panel::LCD_ADDRESS);

    let debounce = panel::DEBOUNCE_MS;
    let buttons = ButtonSet::new(
        DebouncedButton::new(Input::new(p.PIN_10, Pull::Up), UptimeClock, debounce),
        DebouncedButton::new(Input::new(p.PIN_11, Pull::Up), UptimeClock, debounce),
        DebouncedButton::new(Input::new(p.PIN_12, Pull::Up), UptimeClock, debounce),
        DebouncedButton::new(Input::new(p.PIN_13, Pull::Up), UptimeClock, debounce),
    );

    let state = AppState::new(Output::new(p.PIN_25, Level::Low));

    let mut ctl: Ctl = MenuController::with_context(lcd, buttons, panel::PANEL, state);
    if let Err(e) = ctl.init() {
        error!("LCD init failed: {}", e);
    }
    ctl.on_enter_menu(menu::on_select);
    ctl.on_exit_menu(menu::on_back);
    ctl.begin(&menu::MAIN);
    info!("Menu started, stack depth limit {}", ctl.stack_capacity());

    let mut ticker = Ticker::every(Duration::from_millis(panel::POLL_MS));
    loop {
        ctl.navigate();
        ticker.next().await;
    }
}
