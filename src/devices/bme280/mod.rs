//! BMP280/BME280 barometric sensor driver
//!
//! Driver for the Bosch BMP280/BME280 family over the `I2cInterface`
//! abstraction. The two parts share the temperature/pressure path; the
//! BME280 additionally carries a humidity channel, detected at init time by
//! probing the humidity calibration registers. A BMP280 (or an unreadable
//! humidity block) simply leaves the driver without the humidity
//! capability - it is not an error.
//!
//! All measurement paths go through one burst read of the data registers,
//! so the three channels of a reading always come from the same sampling
//! instant.

use crate::devices::traits::{CompensatedReading, PressureSensor, SensorError};
use crate::platform::I2cInterface;

pub mod calibration;
pub mod registers;

pub use calibration::{Calibration, HumidityCalibration, TFine};

/// One raw burst sample, straight from the data registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// 20-bit raw temperature code
    pub adc_t: u32,
    /// 20-bit raw pressure code
    pub adc_p: u32,
    /// 16-bit raw humidity code, present on humidity-capable parts
    pub adc_h: Option<u16>,
}

/// BMP280/BME280 driver
///
/// Construction does not touch the bus; `init` reads the calibration
/// blocks and configures the sensor, and may be retried after a failure
/// (the supervisor re-attempts it every cycle until it succeeds).
pub struct Bme280Driver<I2C: I2cInterface> {
    i2c: I2C,
    address: u8,
    calibration: Option<Calibration>,
}

impl<I2C: I2cInterface> Bme280Driver<I2C> {
    /// Create a driver for the default I2C address (0x76)
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, registers::BME280_ADDR)
    }

    /// Create a driver for a specific I2C address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            calibration: None,
        }
    }

    /// Read calibration and configure the sensor
    ///
    /// Reads the 24-byte temperature/pressure block, probes the humidity
    /// calibration registers (failure clears the humidity capability
    /// instead of failing init), then programs oversampling and standby
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns a bus error if the mandatory calibration block or a
    /// configuration write fails; the driver stays uninitialized.
    pub fn init(&mut self) -> Result<(), SensorError> {
        let mut tp_block = [0u8; registers::CALIB_TP_LEN];
        self.i2c
            .write_read(self.address, &[registers::CALIB_TP_START], &mut tp_block)?;
        let mut calibration = Calibration::parse(&tp_block);

        calibration.humidity = match self.read_humidity_calibration() {
            Ok(hum) => Some(hum),
            Err(_) => {
                crate::log_info!("bme280: no humidity calibration, running as BMP280");
                None
            }
        };

        let osrs_h = if calibration.is_humidity_capable() {
            registers::CTRL_HUM_OSRS_X1
        } else {
            registers::CTRL_HUM_SKIP
        };
        self.i2c
            .write(self.address, &[registers::CTRL_HUM, osrs_h])?;
        self.i2c
            .write(self.address, &[registers::CTRL_MEAS, registers::CTRL_MEAS_NORMAL])?;
        self.i2c
            .write(self.address, &[registers::CONFIG, registers::CONFIG_STANDBY_1000MS])?;

        self.calibration = Some(calibration);
        crate::log_info!(
            "bme280: initialized, humidity capable: {}",
            calibration.is_humidity_capable()
        );
        Ok(())
    }

    fn read_humidity_calibration(&mut self) -> Result<HumidityCalibration, SensorError> {
        let mut h1 = [0u8; 1];
        self.i2c
            .write_read(self.address, &[registers::CALIB_H1], &mut h1)?;
        let mut block = [0u8; registers::CALIB_H_LEN];
        self.i2c
            .write_read(self.address, &[registers::CALIB_H2_START], &mut block)?;
        Ok(HumidityCalibration::parse(h1[0], &block))
    }

    /// Whether `init` has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.calibration.is_some()
    }

    /// Whether the sensor carries a humidity channel
    ///
    /// Meaningful only after a successful `init`.
    pub fn is_humidity_capable(&self) -> bool {
        self.calibration
            .map(|c| c.is_humidity_capable())
            .unwrap_or(false)
    }

    /// Parsed calibration coefficients, if initialized
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    /// Perform one burst read of the raw data registers
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` before a successful `init`, or a bus error.
    pub fn read_raw(&mut self) -> Result<RawSample, SensorError> {
        let calibration = self.calibration.ok_or(SensorError::NotInitialized)?;

        if calibration.is_humidity_capable() {
            let mut data = [0u8; registers::DATA_LEN_TPH];
            self.i2c
                .write_read(self.address, &[registers::DATA_START], &mut data)?;
            Ok(RawSample {
                adc_p: unpack_20bit(data[0], data[1], data[2]),
                adc_t: unpack_20bit(data[3], data[4], data[5]),
                adc_h: Some(u16::from_be_bytes([data[6], data[7]])),
            })
        } else {
            let mut data = [0u8; registers::DATA_LEN_TP];
            self.i2c
                .write_read(self.address, &[registers::DATA_START], &mut data)?;
            Ok(RawSample {
                adc_p: unpack_20bit(data[0], data[1], data[2]),
                adc_t: unpack_20bit(data[3], data[4], data[5]),
                adc_h: None,
            })
        }
    }

    /// Read and compensate all channels from one burst sample
    ///
    /// Temperature is always compensated first; its `t_fine` feeds the
    /// pressure and (when capable) humidity formulas of the same sample.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` before a successful `init`, or a bus error.
    pub fn read_all(&mut self) -> Result<CompensatedReading, SensorError> {
        let raw = self.read_raw()?;
        let calibration = self.calibration.ok_or(SensorError::NotInitialized)?;

        let (temperature_c, t_fine) = calibration.compensate_temperature(raw.adc_t);
        let pressure_hpa = calibration.compensate_pressure(raw.adc_p, t_fine);
        let humidity_pct = match (calibration.humidity, raw.adc_h) {
            (Some(hum), Some(adc_h)) => Some(hum.compensate(adc_h, t_fine)),
            _ => None,
        };

        Ok(CompensatedReading {
            temperature_c,
            pressure_hpa,
            humidity_pct,
        })
    }

    /// Read the humidity channel alone
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedCapability` when the sensor has no humidity
    /// channel, `NotInitialized` before init, or a bus error.
    pub fn read_humidity(&mut self) -> Result<f32, SensorError> {
        let calibration = self.calibration.ok_or(SensorError::NotInitialized)?;
        if !calibration.is_humidity_capable() {
            return Err(SensorError::UnsupportedCapability);
        }
        self.read_all()?
            .humidity_pct
            .ok_or(SensorError::UnsupportedCapability)
    }
}

impl<I2C: I2cInterface> PressureSensor for Bme280Driver<I2C> {
    fn init(&mut self) -> Result<(), SensorError> {
        Bme280Driver::init(self)
    }

    fn is_initialized(&self) -> bool {
        Bme280Driver::is_initialized(self)
    }

    fn sample(&mut self) -> Result<CompensatedReading, SensorError> {
        self.read_all()
    }
}

/// Assemble a 20-bit ADC code from msb/lsb/xlsb registers
fn unpack_20bit(msb: u8, lsb: u8, xlsb: u8) -> u32 {
    (msb as u32) << 12 | (lsb as u32) << 4 | (xlsb as u32) >> 4
}
