//! Outbound telemetry payload
//!
//! Assembles the JSON object the backend expects. Every field is
//! string-typed on the wire, and the fields this station has no sensor for
//! (uv, wind, rain, battery, position) are permanent placeholder constants.
//! Unmeasured values serialize as "0" - the backend's convention - while
//! presence is tracked internally with `Option`s.

use core::fmt;
use core::fmt::Write as _;
use heapless::String;

/// Payload buffer capacity
pub const PAYLOAD_CAPACITY: usize = 512;

/// Placeholder for the fields this station never measures
const PLACEHOLDER: &str = "0";

/// Measured value formatted as the wire's string-typed decimal, "0" if absent
struct Metric(Option<f32>);

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.2}", value),
            None => f.write_str(PLACEHOLDER),
        }
    }
}

/// One weather report, ready for serialization
#[derive(Debug, Clone, Copy)]
pub struct WeatherReport<'a> {
    /// Device identifier from provisioning
    pub device_id: &'a str,
    /// Air temperature in degrees Celsius
    pub temperature_c: Option<f32>,
    /// Relative humidity in percent
    pub humidity_pct: Option<f32>,
    /// Barometric pressure in hectopascal
    pub pressure_hpa: Option<f32>,
}

impl<'a> WeatherReport<'a> {
    /// Serialize the report into the backend's JSON object
    pub fn to_json(&self) -> String<PAYLOAD_CAPACITY> {
        let mut json: String<PAYLOAD_CAPACITY> = String::new();
        let _ = write!(
            json,
            r#"{{"iddevice":"{}","temp":"{}","hum":"{}","pres":"{}","uv":"{}","altitude":"{}","rain":"{}","windf":"{}","winds":"{}","batt_level":"{}","lat":"{}","lon":"{}","number":"{}"}}"#,
            self.device_id,
            Metric(self.temperature_c),
            Metric(self.humidity_pct),
            Metric(self.pressure_hpa),
            PLACEHOLDER,
            PLACEHOLDER,
            PLACEHOLDER,
            PLACEHOLDER,
            PLACEHOLDER,
            PLACEHOLDER,
            PLACEHOLDER,
            PLACEHOLDER,
            PLACEHOLDER,
        );
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_report_serialization() {
        let report = WeatherReport {
            device_id: "CCBA",
            temperature_c: Some(25.08),
            humidity_pct: Some(65.2),
            pressure_hpa: Some(1006.53),
        };
        assert_eq!(
            report.to_json().as_str(),
            r#"{"iddevice":"CCBA","temp":"25.08","hum":"65.20","pres":"1006.53","uv":"0","altitude":"0","rain":"0","windf":"0","winds":"0","batt_level":"0","lat":"0","lon":"0","number":"0"}"#
        );
    }

    #[test]
    fn test_unmeasured_fields_serialize_as_zero() {
        let report = WeatherReport {
            device_id: "CCBA",
            temperature_c: None,
            humidity_pct: None,
            pressure_hpa: None,
        };
        let json = report.to_json();
        assert!(json.contains(r#""temp":"0""#));
        assert!(json.contains(r#""hum":"0""#));
        assert!(json.contains(r#""pres":"0""#));
    }

    #[test]
    fn test_all_backend_fields_present() {
        let report = WeatherReport {
            device_id: "X",
            temperature_c: None,
            humidity_pct: None,
            pressure_hpa: None,
        };
        let json = report.to_json();
        for key in [
            "iddevice",
            "temp",
            "hum",
            "pres",
            "uv",
            "altitude",
            "rain",
            "windf",
            "winds",
            "batt_level",
            "lat",
            "lon",
            "number",
        ] {
            assert!(json.contains(key), "missing key {}", key);
        }
    }
}
