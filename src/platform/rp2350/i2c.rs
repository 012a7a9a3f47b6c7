//! RP2350 I2C implementation
//!
//! This module provides blocking I2C support for RP2350 using the `rp235x-hal` crate.

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use embedded_hal::blocking::i2c::{Read, Write, WriteRead};
use rp235x_hal::i2c::I2C;

/// RP2350 I2C implementation
///
/// Wraps the `rp235x-hal` I2C peripheral to implement the `I2cInterface` trait.
///
/// # Note
///
/// The bus frequency is fixed during peripheral creation (`I2C::i2c0`/`i2c1`);
/// the frequency in `config` is informational only.
pub struct Rp2350I2c<T, P>
where
    T: rp235x_hal::i2c::I2cDevice,
    P: rp235x_hal::i2c::ValidI2cPinout<T>,
{
    i2c: I2C<T, P>,
    _config: I2cConfig,
}

impl<T, P> Rp2350I2c<T, P>
where
    T: rp235x_hal::i2c::I2cDevice,
    P: rp235x_hal::i2c::ValidI2cPinout<T>,
{
    /// Create a new RP2350 I2C instance
    ///
    /// # Arguments
    ///
    /// * `i2c` - The HAL I2C peripheral (already configured)
    /// * `config` - I2C configuration (frequency is informational)
    pub fn new(i2c: I2C<T, P>, config: I2cConfig) -> Self {
        Self {
            i2c,
            _config: config,
        }
    }
}

impl<T, P> I2cInterface for Rp2350I2c<T, P>
where
    T: rp235x_hal::i2c::I2cDevice,
    P: rp235x_hal::i2c::ValidI2cPinout<T>,
{
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.i2c.write(addr, data).map_err(map_hal_error)
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.i2c.read(addr, buffer).map_err(map_hal_error)
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.i2c
            .write_read(addr, write_data, read_buffer)
            .map_err(map_hal_error)
    }

    fn set_frequency(&mut self, _frequency: u32) -> Result<()> {
        // Frequency is set during peripheral creation; runtime changes would
        // require tearing down and re-creating the peripheral.
        Ok(())
    }
}

/// Map HAL I2C errors to platform I2C errors
fn map_hal_error(error: rp235x_hal::i2c::Error) -> PlatformError {
    use rp235x_hal::i2c::Error;

    match error {
        Error::Abort(_) => PlatformError::I2c(I2cError::Nack),
        Error::InvalidReadBufferLength | Error::InvalidWriteBufferLength => {
            PlatformError::I2c(I2cError::BusError)
        }
        Error::AddressOutOfRange(_) | Error::AddressReserved(_) => {
            PlatformError::I2c(I2cError::InvalidAddress)
        }
    }
}
