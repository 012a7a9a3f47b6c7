//! UART interface trait
//!
//! This module defines the UART communication interface that platform implementations must provide.

use crate::platform::Result;

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// Data bits (typically 8)
    pub data_bits: u8,
    /// Parity mode
    pub parity: UartParity,
    /// Stop bits
    pub stop_bits: UartStopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            data_bits: 8,
            parity: UartParity::None,
            stop_bits: UartStopBits::One,
        }
    }
}

impl UartConfig {
    /// Configuration for SIM800-class modems (9600 8N1 factory default)
    pub fn modem_default() -> Self {
        Self {
            baud_rate: 9600,
            ..Self::default()
        }
    }
}

/// UART parity modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartParity {
    /// No parity
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// UART stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartStopBits {
    /// One stop bit
    One,
    /// Two stop bits
    Two,
}

/// UART interface trait
///
/// Platform implementations must provide this interface for UART communication.
///
/// # Safety Invariants
///
/// - UART peripheral must be initialized before use
/// - Only one owner per UART peripheral instance
/// - No concurrent access to the same UART from multiple contexts
pub trait UartInterface {
    /// Write data to the UART
    ///
    /// Blocks until the entire buffer has been handed to the peripheral.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the write fails.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read available data from the UART without blocking
    ///
    /// Returns the number of bytes read (0 if nothing is pending).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the read fails.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Set the baud rate
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart(UartError::InvalidBaudRate)` if the
    /// platform cannot reconfigure the peripheral at runtime.
    fn set_baud_rate(&mut self, baud: u32) -> Result<()>;

    /// Check whether received data is pending
    fn available(&self) -> bool;

    /// Block until all queued transmit data has left the peripheral
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the flush fails.
    fn flush(&mut self) -> Result<()>;
}
