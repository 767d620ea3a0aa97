//! Panel configuration
//!
//! Module variants differ in RAM geometry, COM pin wiring and mounting
//! orientation; everything else in the init sequence is shared.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// COM pins: alternative configuration, no left/right remap (64-row panels)
pub const COM_PINS_ALTERNATIVE: u8 = 0x12;

/// COM pins: sequential configuration (32-row panels)
pub const COM_PINS_SEQUENTIAL: u8 = 0x02;

/// RAM columns of the widest supported controller (SH1106)
pub const MAX_RAM_COLUMNS: u32 = 132;

/// Rows addressable by the multiplexer
pub const MAX_HEIGHT: u16 = 64;

/// Controller and panel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Visible columns
    pub width: u16,
    /// Visible rows, a multiple of 8
    pub height: u16,
    /// First visible RAM column (2 on SH1106 modules)
    pub column_offset: u8,
    /// Contrast (0-255)
    pub contrast: u8,
    /// Mirror columns (segment remap)
    pub flip_horizontal: bool,
    /// Mirror rows (COM scan direction)
    pub flip_vertical: bool,
    /// COM pins hardware configuration byte
    pub com_pins: u8,
    /// Start with inverted pixels
    pub inverted: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::ssd1306_128x64()
    }
}

impl DisplayConfig {
    /// 0.96" 128x64 SSD1306 module
    pub const fn ssd1306_128x64() -> Self {
        Self {
            width: 128,
            height: 64,
            column_offset: 0,
            contrast: 0x70,
            flip_horizontal: true,
            flip_vertical: true,
            com_pins: COM_PINS_ALTERNATIVE,
            inverted: false,
        }
    }

    /// 1.3" 128x64 SH1106 module
    pub const fn sh1106_128x64() -> Self {
        Self {
            column_offset: 2,
            contrast: 0xCF,
            ..Self::ssd1306_128x64()
        }
    }

    /// 0.91" 128x32 SSD1306 module
    pub const fn ssd1306_128x32() -> Self {
        Self {
            height: 32,
            com_pins: COM_PINS_SEQUENTIAL,
            ..Self::ssd1306_128x64()
        }
    }

    /// Number of 8-row pages, at most 8
    pub const fn pages(&self) -> usize {
        let pages = self.height as usize / 8;
        if pages > 8 {
            8
        } else {
            pages
        }
    }

    /// Whether the geometry fits the controller RAM
    ///
    /// The height must be a whole number of pages within the multiplexer
    /// range and every visible column, offset included, must exist in RAM.
    pub const fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.height % 8 == 0
            && self.height <= MAX_HEIGHT
            && self.width as u32 + self.column_offset as u32 <= MAX_RAM_COLUMNS
    }

    /// Multiplex ratio command argument (rows - 1)
    pub const fn mux_ratio(&self) -> u8 {
        match self.height {
            0 => 0,
            h if h > 64 => 63,
            h => (h - 1) as u8,
        }
    }
}
