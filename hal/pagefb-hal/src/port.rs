//! Display port abstraction
//!
//! A display port is the capability a controller driver talks through:
//! a hardware reset line and two write channels, one for controller
//! commands and one for pixel data. Both channels are blocking and keep
//! their relative ordering.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Mode, SpiDevice, MODE_0};

/// Length of each phase of the reset pulse in microseconds
pub const RESET_PULSE_US: u32 = 1_000;

/// Bus mode the controllers expect
pub const SPI_MODE: Mode = MODE_0;

/// Safe default clock for the bus the [`SpiDevice`] is built on
pub const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Command/data transport to a display controller
pub trait DisplayPort {
    /// Transport error type
    type Error;

    /// Hardware-reset the controller
    ///
    /// Idempotent and blocking; the controller loses its configuration.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Send controller command bytes
    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Send pixel data bytes
    fn write_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// SPI port errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError<B, P> {
    /// Bus transfer failed
    Bus(B),
    /// Data/command or reset line could not be driven
    Pin(P),
}

/// Four-wire SPI port
///
/// The data/command line selects the channel (low = command, high = data)
/// and the reset line is pulsed high-low-high on [`DisplayPort::reset`].
/// Both lines are expected to come from the same GPIO driver.
pub struct SpiPort<SPI, DC, RST, D> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: D,
}

impl<SPI, DC, RST, D> SpiPort<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin<Error = DC::Error>,
    D: DelayNs,
{
    /// Create a port; the SPI device must already run in [`SPI_MODE`]
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: D) -> Self {
        Self { spi, dc, rst, delay }
    }

    /// Park both control lines high
    pub fn open(&mut self) -> Result<(), PortError<SPI::Error, DC::Error>> {
        debug!("spi port open");
        self.dc.set_high().map_err(PortError::Pin)?;
        self.rst.set_high().map_err(PortError::Pin)
    }

    /// Release the underlying bus, pins and delay
    pub fn release(self) -> (SPI, DC, RST, D) {
        (self.spi, self.dc, self.rst, self.delay)
    }
}

impl<SPI, DC, RST, D> DisplayPort for SpiPort<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin<Error = DC::Error>,
    D: DelayNs,
{
    type Error = PortError<SPI::Error, DC::Error>;

    fn reset(&mut self) -> Result<(), Self::Error> {
        trace!("reset pulse");
        for high in [true, false, true] {
            self.rst.set_state(high.into()).map_err(PortError::Pin)?;
            self.delay.delay_us(RESET_PULSE_US);
        }
        Ok(())
    }

    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(PortError::Pin)?;
        self.spi.write(bytes).map_err(PortError::Bus)
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(PortError::Pin)?;
        self.spi.write(bytes).map_err(PortError::Bus)
    }
}
