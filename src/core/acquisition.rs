//! Sensor acquisition loop
//!
//! Runs a fixed number of sampling ticks against the two sensors and
//! accumulates the first successful reading of each quantity into an
//! [`AggregatedState`]. A tick never retries and never blocks on a failed
//! sensor: a read either lands or the tick moves on, and after the
//! configured tick count the state is handed to transmission no matter how
//! much of it is still unmeasured.
//!
//! The barometric sensor doubles as a fallback source: its onboard
//! temperature (and humidity, when the part has that channel) stands in
//! for the climate probe's values whenever the probe has not delivered.

use crate::devices::traits::{ClimateSensor, PressureSensor};
use crate::platform::{traits::TimerInterface, Result};

/// Readings accumulated across one acquisition cycle
///
/// `None` means "not yet measured" - distinct from a measured zero. The
/// state lives for exactly one outer cycle: created (or reset) before the
/// ticks run, consumed at transmission time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AggregatedState {
    /// Air temperature from the climate probe (or fallback)
    pub temperature_c: Option<f32>,
    /// Relative humidity from the climate probe (or fallback)
    pub humidity_pct: Option<f32>,
    /// Barometric pressure
    pub pressure_hpa: Option<f32>,
    /// Onboard temperature of the barometric sensor
    pub secondary_temperature_c: Option<f32>,
    /// Onboard humidity of the barometric sensor, when it has the channel
    pub secondary_humidity_pct: Option<f32>,
}

impl AggregatedState {
    /// Fresh state with every field unmeasured
    pub const fn new() -> Self {
        Self {
            temperature_c: None,
            humidity_pct: None,
            pressure_hpa: None,
            secondary_temperature_c: None,
            secondary_humidity_pct: None,
        }
    }

    /// Clear all readings for the next cycle
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Substitute secondary-sensor values for missing primary readings
///
/// The fallback rule the deployed station relies on: when the climate
/// probe has not produced a temperature or humidity yet, the barometric
/// sensor's onboard values are used instead. Runs at the end of every
/// tick, so a later climate reading can no longer displace an applied
/// fallback within the same cycle.
pub fn apply_secondary_fallback(state: &mut AggregatedState) {
    if state.temperature_c.is_none() {
        state.temperature_c = state.secondary_temperature_c;
    }
    if state.humidity_pct.is_none() {
        state.humidity_pct = state.secondary_humidity_pct;
    }
}

/// Fixed-tick acquisition loop
#[derive(Debug, Clone, Copy)]
pub struct AcquisitionLoop {
    sample_ticks: u32,
    tick_interval_ms: u32,
}

impl AcquisitionLoop {
    /// Create a loop with the given tick count and spacing
    pub fn new(sample_ticks: u32, tick_interval_ms: u32) -> Self {
        Self {
            sample_ticks,
            tick_interval_ms,
        }
    }

    /// Run one full cycle of sampling ticks
    ///
    /// Sensor failures are logged and absorbed; only a failure of the
    /// pacing timer escapes, because the cycle cannot keep its shape
    /// without it.
    pub fn run_cycle<C, P, T>(
        &self,
        climate: &mut C,
        pressure: &mut P,
        timer: &mut T,
        state: &mut AggregatedState,
    ) -> Result<()>
    where
        C: ClimateSensor,
        P: PressureSensor,
        T: TimerInterface,
    {
        for _ in 0..self.sample_ticks {
            self.run_tick(climate, pressure, state);
            timer.delay_ms(self.tick_interval_ms)?;
        }
        Ok(())
    }

    /// One sampling tick: at most one attempt per sensor, then fallback
    fn run_tick<C, P>(&self, climate: &mut C, pressure: &mut P, state: &mut AggregatedState)
    where
        C: ClimateSensor,
        P: PressureSensor,
    {
        if state.humidity_pct.is_none() {
            match climate.measure() {
                Ok(reading) => {
                    state.temperature_c = Some(reading.temperature_c);
                    state.humidity_pct = Some(reading.humidity_pct);
                }
                Err(e) => crate::log_warn!("acquisition: climate probe read failed: {}", e),
            }
        }

        if state.pressure_hpa.is_none() {
            match pressure.sample() {
                Ok(reading) => {
                    state.pressure_hpa = Some(reading.pressure_hpa);
                    state.secondary_temperature_c = Some(reading.temperature_c);
                    state.secondary_humidity_pct = reading.humidity_pct;
                }
                Err(e) => crate::log_warn!("acquisition: pressure sensor read failed: {}", e),
            }
        }

        apply_secondary_fallback(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // `use super::*` pulls in the platform `Result` alias; the test doubles
    // implement traits whose signatures use the std two-arg `Result`.
    use core::result::Result;
    use crate::devices::traits::{ClimateReading, CompensatedReading, SensorError};
    use crate::platform::mock::MockTimer;

    /// Climate probe test double: a scripted sequence of outcomes
    struct ScriptedClimate {
        attempts: u32,
        outcome: Result<ClimateReading, SensorError>,
    }

    impl ScriptedClimate {
        fn failing() -> Self {
            Self {
                attempts: 0,
                outcome: Err(SensorError::Timeout),
            }
        }

        fn reading(temperature_c: f32, humidity_pct: f32) -> Self {
            Self {
                attempts: 0,
                outcome: Ok(ClimateReading {
                    temperature_c,
                    humidity_pct,
                }),
            }
        }
    }

    impl ClimateSensor for ScriptedClimate {
        fn measure(&mut self) -> Result<ClimateReading, SensorError> {
            self.attempts += 1;
            self.outcome
        }
    }

    /// Pressure sensor test double
    struct ScriptedPressure {
        attempts: u32,
        outcome: Result<CompensatedReading, SensorError>,
    }

    impl ScriptedPressure {
        fn failing() -> Self {
            Self {
                attempts: 0,
                outcome: Err(SensorError::Bus(crate::platform::PlatformError::I2c(
                    crate::platform::error::I2cError::Nack,
                ))),
            }
        }

        fn reading(temperature_c: f32, pressure_hpa: f32, humidity_pct: Option<f32>) -> Self {
            Self {
                attempts: 0,
                outcome: Ok(CompensatedReading {
                    temperature_c,
                    pressure_hpa,
                    humidity_pct,
                }),
            }
        }
    }

    impl PressureSensor for ScriptedPressure {
        fn init(&mut self) -> Result<(), SensorError> {
            Ok(())
        }

        fn is_initialized(&self) -> bool {
            true
        }

        fn sample(&mut self) -> Result<CompensatedReading, SensorError> {
            self.attempts += 1;
            self.outcome
        }
    }

    #[test]
    fn test_runs_exactly_configured_ticks_when_all_reads_fail() {
        let mut climate = ScriptedClimate::failing();
        let mut pressure = ScriptedPressure::failing();
        let mut timer = MockTimer::new();
        let mut state = AggregatedState::new();

        let acquisition = AcquisitionLoop::new(20, 1_000);
        acquisition
            .run_cycle(&mut climate, &mut pressure, &mut timer, &mut state)
            .unwrap();

        assert_eq!(climate.attempts, 20);
        assert_eq!(pressure.attempts, 20);
        // One interval per tick, no extra retries
        assert_eq!(timer.elapsed_ms(), 20_000);
        // The sentinel state is still handed on unconditionally
        assert_eq!(state, AggregatedState::new());
    }

    #[test]
    fn test_successful_reads_stop_further_attempts() {
        let mut climate = ScriptedClimate::reading(27.3, 65.2);
        let mut pressure = ScriptedPressure::reading(26.8, 1006.5, None);
        let mut timer = MockTimer::new();
        let mut state = AggregatedState::new();

        AcquisitionLoop::new(20, 1_000)
            .run_cycle(&mut climate, &mut pressure, &mut timer, &mut state)
            .unwrap();

        assert_eq!(climate.attempts, 1);
        assert_eq!(pressure.attempts, 1);
        assert_eq!(state.temperature_c, Some(27.3));
        assert_eq!(state.humidity_pct, Some(65.2));
        assert_eq!(state.pressure_hpa, Some(1006.5));
    }

    #[test]
    fn test_fallback_fills_from_secondary_sensor() {
        let mut climate = ScriptedClimate::failing();
        let mut pressure = ScriptedPressure::reading(26.8, 1006.5, Some(48.0));
        let mut timer = MockTimer::new();
        let mut state = AggregatedState::new();

        AcquisitionLoop::new(5, 100)
            .run_cycle(&mut climate, &mut pressure, &mut timer, &mut state)
            .unwrap();

        assert_eq!(state.temperature_c, Some(26.8));
        assert_eq!(state.humidity_pct, Some(48.0));
        assert_eq!(state.secondary_temperature_c, Some(26.8));
        // Once the fallback landed, the climate probe is no longer polled
        assert!(climate.attempts < 5);
    }

    #[test]
    fn test_fallback_without_humidity_channel_leaves_humidity_unset() {
        let mut climate = ScriptedClimate::failing();
        let mut pressure = ScriptedPressure::reading(26.8, 1006.5, None);
        let mut timer = MockTimer::new();
        let mut state = AggregatedState::new();

        AcquisitionLoop::new(3, 100)
            .run_cycle(&mut climate, &mut pressure, &mut timer, &mut state)
            .unwrap();

        assert_eq!(state.temperature_c, Some(26.8));
        assert_eq!(state.humidity_pct, None);
        // Probe keeps being attempted every tick while humidity is unset
        assert_eq!(climate.attempts, 3);
    }

    #[test]
    fn test_timer_failure_escapes() {
        let mut climate = ScriptedClimate::failing();
        let mut pressure = ScriptedPressure::failing();
        let mut timer = MockTimer::new();
        timer.set_fail_delays(true);
        let mut state = AggregatedState::new();

        let result =
            AcquisitionLoop::new(3, 100).run_cycle(&mut climate, &mut pressure, &mut timer, &mut state);
        assert!(result.is_err());
    }

    #[test]
    fn test_state_reset() {
        let mut state = AggregatedState {
            temperature_c: Some(1.0),
            humidity_pct: Some(2.0),
            pressure_hpa: Some(3.0),
            secondary_temperature_c: Some(4.0),
            secondary_humidity_pct: Some(5.0),
        };
        state.reset();
        assert_eq!(state, AggregatedState::new());
    }
}
