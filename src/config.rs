//! Station configuration
//!
//! Typed configuration block for one weather station. Provisioning values
//! (device id, APN, endpoint) default to compile-time environment variables
//! injected by `build.rs`; timing values default to the deployed station's
//! constants.

use heapless::String;

/// Maximum device identifier length
pub const MAX_DEVICE_ID_LEN: usize = 16;

/// Maximum APN length
pub const MAX_APN_LEN: usize = 48;

/// Maximum endpoint URL length
pub const MAX_URL_LEN: usize = 128;

/// Maximum clock seed length ("yy/MM/dd,HH:mm:ss+zz")
pub const MAX_CLOCK_SEED_LEN: usize = 24;

/// Station configuration
#[derive(Debug, Clone)]
pub struct StationConfig {
    /// Device identifier reported in every payload
    pub device_id: String<MAX_DEVICE_ID_LEN>,
    /// Cellular APN for the GPRS bearer
    pub apn: String<MAX_APN_LEN>,
    /// HTTP endpoint receiving the weather reports
    pub url: String<MAX_URL_LEN>,
    /// RTC seed written to the modem at boot
    pub clock_seed: String<MAX_CLOCK_SEED_LEN>,
    /// Sensor sampling ticks per acquisition cycle
    pub sample_ticks: u32,
    /// Pause between sampling ticks, in milliseconds
    pub tick_interval_ms: u32,
    /// Pause between full acquisition/transmission cycles, in seconds
    pub cycle_interval_s: u32,
    /// Hardware watchdog timeout, in milliseconds
    pub watchdog_timeout_ms: u32,
}

impl StationConfig {
    /// Build the configuration from compile-time provisioning defaults
    ///
    /// Values longer than the field capacity are truncated; the defaults
    /// baked in by `build.rs` always fit.
    pub fn from_build_env() -> Self {
        Self {
            device_id: truncated(env!("STATION_DEVICE_ID")),
            apn: truncated(env!("STATION_APN")),
            url: truncated(env!("STATION_URL")),
            clock_seed: truncated(env!("STATION_CLOCK_SEED")),
            sample_ticks: 20,
            tick_interval_ms: 1_000,
            cycle_interval_s: 50,
            watchdog_timeout_ms: 8_000,
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_env_defaults() {
        let config = StationConfig::default();
        assert!(!config.device_id.is_empty());
        assert!(!config.url.is_empty());
        assert_eq!(config.sample_ticks, 20);
        assert_eq!(config.tick_interval_ms, 1_000);
        assert_eq!(config.cycle_interval_s, 50);
    }

    #[test]
    fn test_truncation() {
        let s: String<4> = truncated("abcdefgh");
        assert_eq!(s.as_str(), "abcd");
    }
}
