//! I2C display port
//!
//! I2C display modules have no data/command line; every transfer starts
//! with a control byte instead (`0x00` for commands, `0x40` for data).

use embedded_hal::i2c::I2c;

use crate::port::DisplayPort;

/// Default 7-bit address of SSD1306/SH1106 modules (0x3D when SA0 is high)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte announcing a command stream
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing a data stream
pub const CONTROL_DATA: u8 = 0x40;

/// Largest payload sent in a single I2C transaction
pub const MAX_CHUNK: usize = 32;

/// I2C display port
///
/// Payloads are split into transactions of at most [`MAX_CHUNK`] bytes,
/// each prefixed with the control byte. The controller keeps auto-advancing
/// its column pointer across transactions.
pub struct I2cPort<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cPort<I2C> {
    /// Create a port at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a port at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_stream(&mut self, control: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
        let mut frame = [0u8; MAX_CHUNK + 1];
        frame[0] = control;
        for chunk in bytes.chunks(MAX_CHUNK) {
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &frame[..=chunk.len()])?;
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplayPort for I2cPort<I2C> {
    type Error = I2C::Error;

    /// I2C modules have no reset line; nothing to do
    fn reset(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.write_stream(CONTROL_COMMAND, bytes)
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.write_stream(CONTROL_DATA, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use heapless::Vec;

    #[derive(Default)]
    struct MockI2c {
        /// (address, control byte, payload length)
        writes: Vec<(u8, u8, usize), 16>,
        nak: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
            if self.nak {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(data) = op {
                    self.writes
                        .push((address, data[0], data.len() - 1))
                        .map_err(|_| ErrorKind::Overrun)?;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_command_prefix() {
        let mut port = I2cPort::new(MockI2c::default());
        port.write_command(&[0xAE, 0xAF]).unwrap();

        let bus = port.release();
        assert_eq!(bus.writes.as_slice(), &[(DEFAULT_ADDRESS, CONTROL_COMMAND, 2)]);
    }

    #[test]
    fn test_data_is_chunked() {
        let mut port = I2cPort::with_address(MockI2c::default(), 0x3D);
        port.write_data(&[0x55; 128]).unwrap();

        let bus = port.release();
        assert_eq!(bus.writes.len(), 4);
        assert!(bus
            .writes
            .iter()
            .all(|&w| w == (0x3D, CONTROL_DATA, MAX_CHUNK)));
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut port = I2cPort::new(MockI2c {
            nak: true,
            ..MockI2c::default()
        });
        assert_eq!(port.write_command(&[0xAE]), Err(ErrorKind::Other));
    }

    #[test]
    fn test_reset_is_noop() {
        let mut port = I2cPort::new(MockI2c::default());
        port.reset().unwrap();
        assert!(port.release().writes.is_empty());
    }
}
