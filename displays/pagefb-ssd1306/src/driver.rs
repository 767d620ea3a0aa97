//! Controller driver
//!
//! Page addressing mode only: the RAM write pointer is set with a page
//! command plus two column nibble commands and advances one column per data
//! byte, never wrapping into the next page.

use pagefb_core::PageDevice;
use pagefb_hal::DisplayPort;

use crate::config::DisplayConfig;

/// Command bytes
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_NORMAL: u8 = 0xA0;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_INC: u8 = 0xC0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const CHARGE_PUMP_ENABLE: u8 = 0x14;
}

/// Length of the configuration command stream
pub const INIT_LEN: usize = 23;

/// Configuration commands sent after reset
pub fn init_sequence(config: &DisplayConfig) -> [u8; INIT_LEN] {
    [
        cmd::DISPLAY_OFF,
        cmd::SET_CLOCK_DIV,
        0x80,
        cmd::SET_MUX_RATIO,
        config.mux_ratio(),
        cmd::SET_DISPLAY_OFFSET,
        0x00,
        cmd::SET_CHARGE_PUMP,
        cmd::CHARGE_PUMP_ENABLE,
        cmd::SET_START_LINE,
        if config.inverted { cmd::SET_INVERSE } else { cmd::SET_NORMAL },
        cmd::RESUME_RAM,
        if config.flip_horizontal { cmd::SET_SEG_REMAP } else { cmd::SET_SEG_NORMAL },
        if config.flip_vertical { cmd::SET_COM_SCAN_DEC } else { cmd::SET_COM_SCAN_INC },
        cmd::SET_COM_PINS,
        config.com_pins,
        cmd::SET_CONTRAST,
        config.contrast,
        cmd::SET_PRECHARGE,
        0xF1,
        cmd::SET_VCOM_DETECT,
        0x40,
        cmd::DISPLAY_ON,
    ]
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Transport failure
    Port(E),
    /// Cursor outside display RAM
    InvalidCoordinates,
    /// Panel geometry does not fit the controller
    InvalidConfig,
    /// Data would run past the end of the page row
    BufferOverflow,
}

/// SSD1306 / SH1106 driver
pub struct Ssd1306<P> {
    port: P,
    config: DisplayConfig,
    /// Visible column the next data byte lands in
    column: usize,
}

impl<P: DisplayPort> Ssd1306<P> {
    /// Create a driver; nothing is sent until [`init`](Self::init)
    pub fn new(port: P, config: DisplayConfig) -> Self {
        Self {
            port,
            config,
            column: 0,
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Release the port
    pub fn release(self) -> P {
        self.port
    }

    /// Reset the controller and send the configuration sequence
    ///
    /// Nothing is sent when the configuration is out of range.
    pub fn init(&mut self) -> Result<(), DisplayError<P::Error>> {
        self.check_config()?;
        self.port.reset().map_err(DisplayError::Port)?;
        self.command(&init_sequence(&self.config))?;
        self.column = 0;
        debug!(
            "display init: {}x{} offset {}",
            self.config.width,
            self.config.height,
            self.config.column_offset
        );
        Ok(())
    }

    fn check_config(&self) -> Result<(), DisplayError<P::Error>> {
        if !self.config.is_valid() {
            debug!("config rejected: {}x{}", self.config.width, self.config.height);
            return Err(DisplayError::InvalidConfig);
        }
        Ok(())
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), DisplayError<P::Error>> {
        self.port.write_command(bytes).map_err(DisplayError::Port)
    }

    /// Position the RAM write pointer
    ///
    /// `column` may equal the width (an empty write position at the row
    /// end); the page must be inside the panel.
    pub fn set_cursor(&mut self, column: usize, page: usize) -> Result<(), DisplayError<P::Error>> {
        self.check_config()?;
        if column > usize::from(self.config.width) || page >= self.config.pages() {
            debug!("cursor rejected: column {} page {}", column, page);
            return Err(DisplayError::InvalidCoordinates);
        }
        let ram_column = column + usize::from(self.config.column_offset);
        self.command(&[
            cmd::SET_PAGE_ADDR | page as u8,
            cmd::SET_HIGH_COLUMN | (ram_column >> 4) as u8,
            cmd::SET_LOW_COLUMN | (ram_column & 0x0F) as u8,
        ])?;
        self.column = column;
        Ok(())
    }

    /// Write column bytes at the cursor
    pub fn write_buffer(&mut self, data: &[u8]) -> Result<(), DisplayError<P::Error>> {
        let end = self.column + data.len();
        if end > usize::from(self.config.width) {
            return Err(DisplayError::BufferOverflow);
        }
        self.port.write_data(data).map_err(DisplayError::Port)?;
        self.column = end;
        Ok(())
    }

    /// Swap lit and unlit pixels in hardware
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError<P::Error>> {
        self.command(&[if inverted { cmd::SET_INVERSE } else { cmd::SET_NORMAL }])
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError<P::Error>> {
        self.command(&[cmd::SET_CONTRAST, contrast])?;
        self.config.contrast = contrast;
        Ok(())
    }

    /// Turn the panel on or off; RAM content is kept
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError<P::Error>> {
        self.command(&[if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF }])
    }
}

impl<P: DisplayPort> PageDevice for Ssd1306<P> {
    type Error = DisplayError<P::Error>;

    fn set_cursor(&mut self, column: usize, page: usize) -> Result<(), Self::Error> {
        Ssd1306::set_cursor(self, column, page)
    }

    fn write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        Ssd1306::write_buffer(self, data)
    }
}
