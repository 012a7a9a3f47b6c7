//! BMP280/BME280 Register Definitions
//!
//! Based on the Bosch BMP280 (BST-BMP280-DS001) and BME280
//! (BST-BME280-DS002) datasheets.

#![allow(dead_code)]

// ============================================================================
// I2C Address
// ============================================================================

/// Default I2C address when SDO is pulled low
pub const BME280_ADDR: u8 = 0x76;

/// Alternate I2C address when SDO is pulled high
pub const BME280_ADDR_ALT: u8 = 0x77;

// ============================================================================
// Calibration registers
// ============================================================================

/// Start of the 24-byte temperature/pressure calibration block
/// (dig_T1..dig_T3, dig_P1..dig_P9 as little-endian 16-bit pairs)
pub const CALIB_TP_START: u8 = 0x88;

/// Length of the temperature/pressure calibration block
pub const CALIB_TP_LEN: usize = 24;

/// First humidity calibration byte (dig_H1); present on BME280 only
pub const CALIB_H1: u8 = 0xA1;

/// Start of the packed humidity calibration block (dig_H2..dig_H6)
pub const CALIB_H2_START: u8 = 0xE1;

/// Length of the packed humidity calibration block
pub const CALIB_H_LEN: usize = 7;

// ============================================================================
// Control and configuration registers
// ============================================================================

/// Humidity oversampling control (must be written before CTRL_MEAS)
pub const CTRL_HUM: u8 = 0xF2;

/// Pressure/temperature oversampling and power mode
pub const CTRL_MEAS: u8 = 0xF4;

/// Standby time and IIR filter configuration
pub const CONFIG: u8 = 0xF5;

/// Humidity oversampling x1
pub const CTRL_HUM_OSRS_X1: u8 = 0x01;

/// Humidity oversampling disabled
pub const CTRL_HUM_SKIP: u8 = 0x00;

/// Temperature x1, pressure x1, normal mode
pub const CTRL_MEAS_NORMAL: u8 = 0x27;

/// 1000 ms standby, filter off
pub const CONFIG_STANDBY_1000MS: u8 = 0xA0;

// ============================================================================
// Measurement registers
// ============================================================================

/// Start of the burst measurement block
/// (press_msb..press_xlsb, temp_msb..temp_xlsb, hum_msb..hum_lsb)
pub const DATA_START: u8 = 0xF7;

/// Burst length without the humidity channel (BMP280)
pub const DATA_LEN_TP: usize = 6;

/// Burst length with the humidity channel (BME280)
pub const DATA_LEN_TPH: usize = 8;
