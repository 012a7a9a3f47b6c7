//! Mock I2C implementation for testing

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use core::cell::RefCell;
use std::collections::BTreeMap;
use std::vec::Vec;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Register read (write_read with a one-byte register address)
    RegisterRead { addr: u8, reg: u8, len: usize },
}

/// Mock I2C implementation
///
/// Models a register-addressed slave: tests program per-register response
/// bytes with `set_register_data`, and every transaction is recorded for
/// verification. Individual registers can be marked as failing to exercise
/// driver fault paths (e.g. the BME280 humidity-calibration probe).
#[derive(Debug)]
pub struct MockI2c {
    config: I2cConfig,
    transactions: RefCell<Vec<I2cTransaction>>,
    registers: BTreeMap<u8, Vec<u8>>,
    failing_regs: Vec<u8>,
    fail_all: bool,
}

impl MockI2c {
    /// Create a new mock I2C
    pub fn new(config: I2cConfig) -> Self {
        Self {
            config,
            transactions: RefCell::new(Vec::new()),
            registers: BTreeMap::new(),
            failing_regs: Vec::new(),
            fail_all: false,
        }
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<I2cTransaction> {
        self.transactions.borrow().clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.borrow_mut().clear();
    }

    /// Program the bytes returned when `reg` is read
    pub fn set_register_data(&mut self, reg: u8, data: &[u8]) {
        self.registers.insert(reg, data.to_vec());
    }

    /// Make reads of `reg` NACK (for fault-path tests)
    pub fn fail_register(&mut self, reg: u8) {
        self.failing_regs.push(reg);
    }

    /// Make every transaction fail (sensor absent / bus dead)
    pub fn set_fail_all(&mut self, fail: bool) {
        self.fail_all = fail;
    }

    /// Get current frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        if self.fail_all {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        self.transactions.borrow_mut().push(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn read(&mut self, _addr: u8, buffer: &mut [u8]) -> Result<()> {
        if self.fail_all {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        buffer.fill(0);
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        if self.fail_all {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        let reg = *write_data.first().unwrap_or(&0);
        self.transactions
            .borrow_mut()
            .push(I2cTransaction::RegisterRead {
                addr,
                reg,
                len: read_buffer.len(),
            });

        if self.failing_regs.contains(&reg) {
            return Err(PlatformError::I2c(I2cError::Nack));
        }

        read_buffer.fill(0);
        if let Some(data) = self.registers.get(&reg) {
            let to_read = core::cmp::min(read_buffer.len(), data.len());
            read_buffer[..to_read].copy_from_slice(&data[..to_read]);
        }
        Ok(())
    }

    fn set_frequency(&mut self, frequency: u32) -> Result<()> {
        self.config.frequency = frequency;
        Ok(())
    }
}
