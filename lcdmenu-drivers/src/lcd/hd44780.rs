//! HD44780 character LCD behind a PCF8574 I2C backpack
//!
//! The common "LCD1602/2004 + I2C adapter" modules wire the PCF8574 port
//! expander to the LCD in 4-bit mode:
//!
//! | PCF8574 | P0 | P1 | P2 | P3        | P4-P7  |
//! |---------|----|----|----|-----------|--------|
//! | LCD     | RS | RW | EN | Backlight | D4-D7  |
//!
//! Every byte is sent as two nibbles, each latched by pulsing EN. RW is
//! tied low (write only).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use lcdmenu_display::glyph::GLYPH_SLOTS;
use lcdmenu_display::{CharDisplay, DisplayError, GlyphBitmap};

/// Default 7-bit address of PCF8574 backpacks (A0-A2 pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// HD44780 instruction set
pub mod cmd {
    /// Clear display, cursor home
    pub const CLEAR: u8 = 0x01;
    /// Cursor home
    pub const HOME: u8 = 0x02;
    /// Entry mode set
    pub const ENTRY_MODE: u8 = 0x04;
    /// Display on/off control
    pub const DISPLAY_CONTROL: u8 = 0x08;
    /// Function set
    pub const FUNCTION_SET: u8 = 0x20;
    /// Set CGRAM address
    pub const SET_CGRAM: u8 = 0x40;
    /// Set DDRAM address
    pub const SET_DDRAM: u8 = 0x80;

    /// Entry mode: increment, no shift
    pub const ENTRY_LEFT: u8 = 0x02;
    /// Display control: display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x04;
    /// Function set: two-line mode
    pub const TWO_LINE: u8 = 0x08;
}

/// PCF8574 pin assignments
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// DDRAM start address of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 driver over a PCF8574 I2C expander
pub struct Hd44780I2c<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    /// Backlight bit OR-ed into every expander write
    backlight: u8,
    /// Panel geometry, set by `begin`
    size: Option<(u8, u8)>,
}

impl<I2C: I2c, D: DelayNs> Hd44780I2c<I2C, D> {
    /// Create a new driver
    ///
    /// # Arguments
    /// - `i2c`: I2C bus the backpack is attached to
    /// - `delay`: Delay provider for controller timing
    /// - `address`: 7-bit address of the PCF8574 (usually 0x27 or 0x3F)
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: 0,
            size: None,
        }
    }

    /// Release the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Turn the backlight off
    pub fn disable_backlight(&mut self) -> Result<(), DisplayError> {
        self.backlight = 0;
        self.expander_write(0)
    }

    /// Send an instruction byte
    pub fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write4((value & 0xF0) | mode)?;
        self.write4(((value << 4) & 0xF0) | mode)
    }

    fn write4(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.expander_write(bits)?;
        self.pulse_enable(bits)
    }

    fn pulse_enable(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.expander_write(bits | pin::EN)?;
        // Enable pulse must be >450ns
        self.delay.delay_us(1);
        self.expander_write(bits & !pin::EN)?;
        // Commands need >37us to settle
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[bits | self.backlight])
            .map_err(|_| DisplayError::Communication)
    }

    fn require_size(&self) -> Result<(u8, u8), DisplayError> {
        self.size.ok_or(DisplayError::NotInitialized)
    }
}

impl<I2C: I2c, D: DelayNs> CharDisplay for Hd44780I2c<I2C, D> {
    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError> {
        if cols == 0 || rows == 0 || rows as usize > ROW_OFFSETS.len() || cols > 40 {
            return Err(DisplayError::InvalidCoordinates);
        }

        // Wait for Vcc to rise above 2.7V
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(10);

        // Reset into 8-bit mode three times, then switch to 4-bit
        // (HD44780 datasheet, figure 24)
        self.write4(0x30)?;
        self.delay.delay_us(4500);
        self.write4(0x30)?;
        self.delay.delay_us(4500);
        self.write4(0x30)?;
        self.delay.delay_us(150);
        self.write4(0x20)?;

        let lines = if rows > 1 { cmd::TWO_LINE } else { 0 };
        self.command(cmd::FUNCTION_SET | lines)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.size = Some((cols, rows));
        self.clear()?;
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_LEFT)?;
        self.command(cmd::HOME)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.require_size()?;
        self.command(cmd::CLEAR)?;
        // Clear takes 1.52ms
        self.delay.delay_us(2000);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        let (cols, rows) = self.require_size()?;
        if col >= cols || row >= rows {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.command(cmd::SET_DDRAM | (col + ROW_OFFSETS[row as usize]))
    }

    fn write(&mut self, code: u8) -> Result<(), DisplayError> {
        self.require_size()?;
        self.send(code, pin::RS)
    }

    fn register_glyph(&mut self, id: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        if id >= GLYPH_SLOTS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.require_size()?;
        self.command(cmd::SET_CGRAM | (id << 3))?;
        for row in bitmap {
            self.send(row & 0x1F, pin::RS)?;
        }
        Ok(())
    }

    fn enable_backlight(&mut self) -> Result<(), DisplayError> {
        self.backlight = pin::BACKLIGHT;
        self.expander_write(0)
    }

    fn dimensions(&self) -> (u8, u8) {
        self.size.unwrap_or((16, 2))
    }
}
