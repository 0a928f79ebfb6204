//! 16x2 character LCD (HD44780) behind a PCF8574 I2C backpack
//!
//! The backpack exposes the controller in 4-bit mode:
//!
//! ```text
//! P7..P4  D7..D4
//! P3      backlight
//! P2      E (enable)
//! P1      RW (always write)
//! P0      RS (0 = command, 1 = data)
//! ```
//!
//! Every byte is sent as two nibbles, each latched by an enable pulse.

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;
use flood_gate_core::screen::{Line, Screen, LCD_COLS};

/// Default address of PCF8574 backpacks (A0=A1=A2=high)
pub const PCF8574_ADDR: u8 = 0x27;

const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const REGISTER_SELECT: u8 = 0x01;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the first column of each line
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// HD44780 character LCD behind a PCF8574 I2C backpack
pub struct Lcd<I> {
    i2c: I,
    addr: u8,
}

impl<I: I2c> Lcd<I> {
    /// Wraps the bus; call [`Self::init`] before drawing
    pub fn new(i2c: I, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Power-on initialization into 4-bit, two-line mode
    pub async fn init(&mut self) -> Result<(), I::Error> {
        // controller needs >40ms after Vcc rises
        Timer::after(Duration::from_millis(50)).await;

        // three 8-bit "function set" writes resync the nibble phase
        self.write_nibble(0x30, false).await?;
        Timer::after(Duration::from_micros(4_500)).await;
        self.write_nibble(0x30, false).await?;
        Timer::after(Duration::from_micros(4_500)).await;
        self.write_nibble(0x30, false).await?;
        Timer::after(Duration::from_micros(150)).await;
        self.write_nibble(0x20, false).await?;

        self.command(CMD_FUNCTION_4BIT_2LINE).await?;
        self.command(CMD_DISPLAY_ON).await?;
        self.clear().await?;
        self.command(CMD_ENTRY_MODE_INCREMENT).await
    }

    /// Blanks both lines and homes the cursor
    pub async fn clear(&mut self) -> Result<(), I::Error> {
        self.command(CMD_CLEAR).await?;
        Timer::after(Duration::from_millis(2)).await;
        Ok(())
    }

    /// Draws a full frame, overwriting both lines (no clear, so no flicker)
    pub async fn show(&mut self, screen: &Screen) -> Result<(), I::Error> {
        self.write_line(0, &screen.top).await?;
        self.write_line(1, &screen.bottom).await
    }

    async fn write_line(&mut self, row: usize, line: &Line) -> Result<(), I::Error> {
        self.command(CMD_SET_DDRAM | ROW_OFFSETS[row]).await?;
        let text = line.as_bytes();
        for col in 0..LCD_COLS {
            self.data(text.get(col).copied().unwrap_or(b' ')).await?;
        }
        Ok(())
    }

    async fn command(&mut self, cmd: u8) -> Result<(), I::Error> {
        self.send(cmd, false).await?;
        // most instructions take 37us
        Timer::after(Duration::from_micros(50)).await;
        Ok(())
    }

    async fn data(&mut self, code: u8) -> Result<(), I::Error> {
        self.send(code, true).await
    }

    async fn send(&mut self, byte: u8, data: bool) -> Result<(), I::Error> {
        self.write_nibble(byte & 0xF0, data).await?;
        self.write_nibble((byte << 4) & 0xF0, data).await
    }

    async fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), I::Error> {
        let rs = if data { REGISTER_SELECT } else { 0 };
        let bits = nibble | rs | BACKLIGHT;
        // at 100kHz each I2C byte takes ~90us, well above the 450ns enable pulse
        self.i2c.write(self.addr, &[bits | ENABLE]).await?;
        self.i2c.write(self.addr, &[bits]).await
    }
}
