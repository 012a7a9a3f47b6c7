//! Device trait definitions
//!
//! Device-independent interfaces between the sensor drivers and the
//! acquisition loop, so the loop can be exercised against mock sensors on
//! the host.

use crate::platform::PlatformError;
use core::fmt;

/// Sensor-level errors
///
/// Wraps bus faults and adds the protocol-level failures a sensor read can
/// hit. The acquisition loop treats every variant the same way - log, skip
/// the tick, keep the prior value - except that drivers, not the loop,
/// decide what is retriable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Underlying bus operation failed
    Bus(PlatformError),
    /// Sensor did not respond within the protocol window
    Timeout,
    /// Frame arrived but its checksum did not match
    ChecksumMismatch,
    /// Driver used before a successful `init`
    NotInitialized,
    /// Humidity requested from a sensor without a humidity channel
    UnsupportedCapability,
}

impl From<PlatformError> for SensorError {
    fn from(e: PlatformError) -> Self {
        SensorError::Bus(e)
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Bus(e) => write!(f, "bus error: {}", e),
            SensorError::Timeout => write!(f, "sensor timeout"),
            SensorError::ChecksumMismatch => write!(f, "checksum mismatch"),
            SensorError::NotInitialized => write!(f, "sensor not initialized"),
            SensorError::UnsupportedCapability => write!(f, "capability not supported"),
        }
    }
}

/// One temperature/humidity measurement from the climate probe
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Air temperature in degrees Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
}

/// One compensated measurement from the barometric sensor
///
/// `humidity_pct` is present iff the sensor reported the humidity
/// calibration block at init (BME280 vs BMP280).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedReading {
    /// Onboard temperature in degrees Celsius
    pub temperature_c: f32,
    /// Barometric pressure in hectopascal
    pub pressure_hpa: f32,
    /// Relative humidity in percent, if the sensor has a humidity channel
    pub humidity_pct: Option<f32>,
}

/// Primary temperature/humidity probe (DHT22 class)
pub trait ClimateSensor {
    /// Trigger one measurement and return the decoded reading
    ///
    /// # Errors
    ///
    /// Returns a `SensorError` when the probe does not answer, the frame
    /// is corrupt, or the data line fails.
    fn measure(&mut self) -> Result<ClimateReading, SensorError>;
}

/// Barometric pressure sensor with onboard temperature (BMP280/BME280 class)
///
/// Initialization is separate from construction so the supervisor can keep
/// retrying a sensor that was absent or wedged at boot.
pub trait PressureSensor {
    /// Read calibration and configure the sensor
    ///
    /// # Errors
    ///
    /// Returns a `SensorError` when the bus fails; the sensor stays
    /// uninitialized and `init` may be called again.
    fn init(&mut self) -> Result<(), SensorError>;

    /// Whether `init` has completed successfully
    fn is_initialized(&self) -> bool;

    /// Perform one burst read and return the compensated reading
    ///
    /// # Errors
    ///
    /// Returns a `SensorError` when the bus fails or the driver has not
    /// been initialized.
    fn sample(&mut self) -> Result<CompensatedReading, SensorError>;
}
