//! Device drivers
//!
//! This module contains device drivers that use platform abstraction traits,
//! keeping them hardware-independent and testable against the mock platform.
//!
//! ## Modules
//!
//! - `bme280`: BMP280/BME280 barometric sensor driver (I2C)
//! - `dht22`: DHT22 temperature/humidity probe driver (single-wire GPIO)
//! - `traits`: Device trait definitions (ClimateSensor, PressureSensor)

pub mod bme280;
pub mod dht22;
pub mod traits;
