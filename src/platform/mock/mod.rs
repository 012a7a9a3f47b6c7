//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! The mocks record every transaction (UART bytes written, I2C register
//! accesses, watchdog feeds) so tests can assert on the exact traffic the
//! drivers generate, and allow pre-programming received data and injected
//! faults.

pub mod gpio;
pub mod i2c;
pub mod timer;
pub mod uart;
pub mod watchdog;

pub use gpio::MockGpio;
pub use i2c::{I2cTransaction, MockI2c};
pub use timer::MockTimer;
pub use uart::MockUart;
pub use watchdog::MockWatchdog;
