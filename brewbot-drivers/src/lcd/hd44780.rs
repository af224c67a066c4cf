//! HD44780 character LCD driver
//!
//! Drives a 16x2 HD44780-compatible LCD in 4-bit mode over six GPIO pins
//! (RS, E, D4-D7). Writes go straight to the controller; there is no
//! frame buffer, so `flush` is a no-op.

use brewbot_display::{DisplayBackend, DisplayError};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Display dimensions
const COLS: u8 = 16;
const ROWS: u8 = 2;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

/// HD44780 commands
#[allow(dead_code)]
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Flags
    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;
    pub const TWO_LINES: u8 = 0x08;
    pub const FONT_5X8: u8 = 0x00;
}

/// Pins of a 4-bit HD44780 interface
pub struct Hd44780Pins<P> {
    pub rs: P,
    pub enable: P,
    /// D4, D5, D6, D7
    pub data: [P; 4],
}

/// HD44780 LCD in 4-bit mode
pub struct Hd44780<P, D> {
    pins: Hd44780Pins<P>,
    delay: D,
    initialized: bool,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Create a driver; call [`Hd44780::init`] before drawing
    pub fn new(pins: Hd44780Pins<P>, delay: D) -> Self {
        Self {
            pins,
            delay,
            initialized: false,
        }
    }

    /// Run the 4-bit initialization sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on settle time
        self.delay.delay_ms(50);
        self.pins.rs.set_low().map_err(|_| DisplayError::Communication)?;
        self.pins
            .enable
            .set_low()
            .map_err(|_| DisplayError::Communication)?;

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x03)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02)?;

        self.command(cmd::FUNCTION_SET | cmd::TWO_LINES | cmd::FONT_5X8)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.clear_display()?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_INCREMENT)?;

        self.initialized = true;
        Ok(())
    }

    fn clear_display(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR_DISPLAY)?;
        // Clear takes 1.52 ms
        self.delay.delay_us(2_000);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_DDRAM_ADDR | (ROW_OFFSETS[row as usize] + col))
    }

    fn command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.send(byte, false)
    }

    fn send(&mut self, byte: u8, data: bool) -> Result<(), DisplayError> {
        let rs = if data {
            self.pins.rs.set_high()
        } else {
            self.pins.rs.set_low()
        };
        rs.map_err(|_| DisplayError::Communication)?;

        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        for (bit, pin) in self.pins.data.iter_mut().enumerate() {
            let result = if nibble & (1 << bit) != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            };
            result.map_err(|_| DisplayError::Communication)?;
        }
        self.pulse_enable()
    }

    fn pulse_enable(&mut self) -> Result<(), DisplayError> {
        self.pins
            .enable
            .set_high()
            .map_err(|_| DisplayError::Communication)?;
        // Enable pulse must be >450 ns
        self.delay.delay_us(1);
        self.pins
            .enable
            .set_low()
            .map_err(|_| DisplayError::Communication)?;
        // Commands need >37 us to settle
        self.delay.delay_us(100);
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> DisplayBackend for Hd44780<P, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.clear_display()
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::InvalidCoordinates);
        }

        self.set_cursor(row, col)?;
        for c in text.chars().take((COLS - col) as usize) {
            let byte = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            };
            self.send(byte, true)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS, ROWS)
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}
