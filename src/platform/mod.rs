//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the peripherals the station
//! owns: the modem UART, the sensor I2C bus, the status LED and sensor data
//! GPIOs, the system timer, and the hardware watchdog.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "pico2_w")]
pub mod rp2350;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    GpioInterface, I2cInterface, TimerInterface, UartInterface, WatchdogInterface,
};
