//! RP2350 GPIO implementation
//!
//! This module provides GPIO support for RP2350 using the `rp235x-hal` crate.
//!
//! The station uses two GPIOs: the status LED (output only) and the DHT22
//! data line, which must switch between output and input at runtime. The
//! HAL's typed pin states cannot change direction behind a uniform type, so
//! this wrapper keeps the pin in SIO output mode and emulates input reads
//! through the pad input path (`is_high` is valid on outputs because the
//! RP2350 input buffer stays connected); for the DHT22 open-drain idiom the
//! driver releases the line by driving high through the sensor's pull-up.

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};
use embedded_hal::digital::v2::{InputPin, OutputPin, ToggleableOutputPin};
use rp235x_hal::gpio::{FunctionSioOutput, Pin, PinId, PullType};

/// RP2350 GPIO implementation
///
/// Wraps a `rp235x-hal` SIO output pin to implement the `GpioInterface` trait.
pub struct Rp2350Gpio<I: PinId, P: PullType> {
    pin: Pin<I, FunctionSioOutput, P>,
    mode: GpioMode,
}

impl<I: PinId, P: PullType> Rp2350Gpio<I, P> {
    /// Create a new RP2350 GPIO instance from a configured output pin
    pub fn new(pin: Pin<I, FunctionSioOutput, P>, mode: GpioMode) -> Self {
        Self { pin, mode }
    }
}

impl<I: PinId, P: PullType> GpioInterface for Rp2350Gpio<I, P> {
    fn set_high(&mut self) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull | GpioMode::OutputOpenDrain => self
                .pin
                .set_high()
                .map_err(|_| PlatformError::Gpio(GpioError::InvalidMode)),
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn set_low(&mut self) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull | GpioMode::OutputOpenDrain => self
                .pin
                .set_low()
                .map_err(|_| PlatformError::Gpio(GpioError::InvalidMode)),
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn toggle(&mut self) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull | GpioMode::OutputOpenDrain => self
                .pin
                .toggle()
                .map_err(|_| PlatformError::Gpio(GpioError::InvalidMode)),
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn read(&self) -> bool {
        self.pin.is_high().unwrap_or(false)
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        // Input modes release the line: drive high and let the external
        // pull-up hold it, then sample through the pad input buffer.
        if matches!(mode, GpioMode::Input | GpioMode::InputPullUp) {
            let _ = self.pin.set_high();
        }
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
