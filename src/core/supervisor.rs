//! Watchdog supervisor
//!
//! The outermost control flow of the station. Each iteration re-attempts
//! sensor bring-up if needed, runs one acquisition cycle, posts the
//! aggregated reading, resets the state, sleeps out the inter-cycle pause
//! and feeds the hardware watchdog.
//!
//! Fault policy: sensor and modem failures are absorbed where they occur -
//! a cycle may transmit sentinel values or skip its transmission, but the
//! cadence continues. Only failures of the timing/watchdog layer itself
//! are fatal; for those the supervisor requests an immediate restart
//! through the watchdog, the embedded counterpart of rebooting on an
//! unhandled exception. Nothing is persisted across that restart.

use crate::communication::sim800::Sim800Driver;
use crate::communication::telemetry::WeatherReport;
use crate::config::StationConfig;
use crate::core::acquisition::{AcquisitionLoop, AggregatedState};
use crate::core::scheduler;
use crate::devices::traits::{ClimateSensor, PressureSensor};
use crate::platform::{
    traits::{GpioInterface, TimerInterface, UartInterface, WatchdogInterface},
    PlatformError,
};
use core::fmt;

/// A fault no inner guard could absorb
///
/// Carries the platform error that escaped; the only recovery is the
/// restart the supervisor has already requested by the time this value is
/// observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FatalFault(pub PlatformError);

impl fmt::Display for FatalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fatal fault: {}", self.0)
    }
}

/// Whether an error is beyond the reach of the inner guards
fn is_fatal(error: &PlatformError) -> bool {
    matches!(
        error,
        PlatformError::Timer(_) | PlatformError::Watchdog(_)
    )
}

/// Station supervisor
///
/// Owns every peripheral and driver of the station; the hardware entry
/// point builds one of these and calls [`Supervisor::start`] followed by
/// [`Supervisor::run`].
pub struct Supervisor<C, P, U, MT, T, W, L>
where
    C: ClimateSensor,
    P: PressureSensor,
    U: UartInterface,
    MT: TimerInterface,
    T: TimerInterface,
    W: WatchdogInterface,
    L: GpioInterface,
{
    climate: C,
    pressure: P,
    modem: Sim800Driver<U, MT>,
    timer: T,
    watchdog: W,
    led: L,
    config: StationConfig,
    acquisition: AcquisitionLoop,
    state: AggregatedState,
}

impl<C, P, U, MT, T, W, L> Supervisor<C, P, U, MT, T, W, L>
where
    C: ClimateSensor,
    P: PressureSensor,
    U: UartInterface,
    MT: TimerInterface,
    T: TimerInterface,
    W: WatchdogInterface,
    L: GpioInterface,
{
    /// Assemble a supervisor from its parts
    pub fn new(
        climate: C,
        pressure: P,
        modem: Sim800Driver<U, MT>,
        timer: T,
        watchdog: W,
        led: L,
        config: StationConfig,
    ) -> Self {
        let acquisition = AcquisitionLoop::new(config.sample_ticks, config.tick_interval_ms);
        Self {
            climate,
            pressure,
            modem,
            timer,
            watchdog,
            led,
            config,
            acquisition,
            state: AggregatedState::new(),
        }
    }

    /// Arm the watchdog and configure the modem
    ///
    /// # Errors
    ///
    /// Returns a `FatalFault` when the watchdog cannot be armed or the
    /// modem serial link is dead at boot; there is no degraded mode
    /// without either.
    pub fn start(&mut self) -> Result<(), FatalFault> {
        self.watchdog
            .start(self.config.watchdog_timeout_ms)
            .map_err(FatalFault)?;
        let _ = self.led.set_high();
        self.modem
            .configure(&self.config.clock_seed)
            .map_err(FatalFault)?;
        crate::log_info!("supervisor: station up, id {}", self.config.device_id.as_str());
        Ok(())
    }

    /// Run one full acquisition/transmission cycle
    ///
    /// # Errors
    ///
    /// Returns a `FatalFault` only for timing/watchdog failures;
    /// everything else is logged and absorbed.
    pub fn run_once(&mut self) -> Result<(), FatalFault> {
        if !self.pressure.is_initialized() {
            if let Err(e) = self.pressure.init() {
                crate::log_warn!("supervisor: pressure sensor init failed: {}", e);
            }
        }

        let _ = self.led.set_high();
        self.acquisition
            .run_cycle(
                &mut self.climate,
                &mut self.pressure,
                &mut self.timer,
                &mut self.state,
            )
            .map_err(FatalFault)?;
        let _ = self.led.set_low();

        if let Err(e) = self.transmit() {
            if is_fatal(&e) {
                return Err(FatalFault(e));
            }
            crate::log_error!("supervisor: transmission failed: {}", e);
        }

        self.state.reset();
        let _ = self.led.set_high();

        self.timer
            .delay_s(self.config.cycle_interval_s)
            .map_err(FatalFault)?;
        self.watchdog.feed().map_err(FatalFault)?;
        Ok(())
    }

    /// Align to the transmission slot and post the aggregated reading
    fn transmit(&mut self) -> crate::platform::Result<()> {
        scheduler::wait_for_slot(&mut self.modem, &mut self.timer)?;

        let report = WeatherReport {
            device_id: self.config.device_id.as_str(),
            temperature_c: self.state.temperature_c,
            humidity_pct: self.state.humidity_pct,
            pressure_hpa: self.state.pressure_hpa,
        };
        let body = report.to_json();

        self.modem.initialize_session(&self.config.apn)?;
        self.modem.send_http_post(&self.config.url, &body)
    }

    /// Run cycles until a fatal fault, then restart the device
    ///
    /// On hardware the watchdog-requested restart preempts the return;
    /// the returned fault is observable only where `restart` is a no-op
    /// (mock platform).
    pub fn run(&mut self) -> FatalFault {
        loop {
            if let Err(fault) = self.run_once() {
                crate::log_error!("supervisor: {}, restarting device", fault);
                self.watchdog.restart();
                return fault;
            }
        }
    }

    /// Aggregated readings of the in-flight cycle (test observability)
    pub fn state(&self) -> &AggregatedState {
        &self.state
    }

    /// The modem driver (test observability)
    pub fn modem_mut(&mut self) -> &mut Sim800Driver<U, MT> {
        &mut self.modem
    }

    /// The watchdog (test observability)
    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::traits::{ClimateReading, CompensatedReading, SensorError};
    use crate::platform::mock::{MockGpio, MockTimer, MockUart, MockWatchdog};
    use crate::platform::traits::UartConfig;

    struct HealthyClimate;

    impl ClimateSensor for HealthyClimate {
        fn measure(&mut self) -> Result<ClimateReading, SensorError> {
            Ok(ClimateReading {
                temperature_c: 27.3,
                humidity_pct: 65.2,
            })
        }
    }

    /// Pressure double whose init fails a configurable number of times
    struct FlakyPressure {
        init_attempts: u32,
        init_failures_left: u32,
        initialized: bool,
    }

    impl FlakyPressure {
        fn new(init_failures: u32) -> Self {
            Self {
                init_attempts: 0,
                init_failures_left: init_failures,
                initialized: false,
            }
        }
    }

    impl PressureSensor for FlakyPressure {
        fn init(&mut self) -> Result<(), SensorError> {
            self.init_attempts += 1;
            if self.init_failures_left > 0 {
                self.init_failures_left -= 1;
                return Err(SensorError::Timeout);
            }
            self.initialized = true;
            Ok(())
        }

        fn is_initialized(&self) -> bool {
            self.initialized
        }

        fn sample(&mut self) -> Result<CompensatedReading, SensorError> {
            if !self.initialized {
                return Err(SensorError::NotInitialized);
            }
            Ok(CompensatedReading {
                temperature_c: 26.8,
                pressure_hpa: 1006.5,
                humidity_pct: None,
            })
        }
    }

    fn test_config() -> StationConfig {
        let mut config = StationConfig::default();
        // Short cycles keep the virtual clock small
        config.sample_ticks = 3;
        config.tick_interval_ms = 10;
        config.cycle_interval_s = 1;
        config
    }

    fn supervisor(
        pressure: FlakyPressure,
    ) -> Supervisor<HealthyClimate, FlakyPressure, MockUart, MockTimer, MockTimer, MockWatchdog, MockGpio>
    {
        Supervisor::new(
            HealthyClimate,
            pressure,
            Sim800Driver::new(MockUart::new(UartConfig::modem_default()), MockTimer::new()),
            MockTimer::new(),
            MockWatchdog::new(),
            MockGpio::new_output(),
            test_config(),
        )
    }

    #[test]
    fn test_cycle_posts_report_and_feeds_watchdog() {
        let mut sup = supervisor(FlakyPressure::new(0));
        sup.start().unwrap();
        sup.run_once().unwrap();

        let tx = sup.modem_mut().uart_mut().tx_text();
        assert!(tx.contains("ATE0\r"));
        assert!(tx.contains("AT+HTTPACTION=1\r"));
        assert!(tx.contains(r#""iddevice":"CCBA""#));
        // Readings from both sensors made it into the payload
        assert!(tx.contains(r#""temp":"27.30""#));
        assert!(tx.contains(r#""pres":"1006.50""#));

        assert_eq!(sup.watchdog().feed_count(), 1);
        // State was consumed and reset for the next cycle
        assert_eq!(*sup.state(), AggregatedState::new());
    }

    #[test]
    fn test_pressure_init_retried_across_cycles() {
        let mut sup = supervisor(FlakyPressure::new(1));
        sup.start().unwrap();

        sup.run_once().unwrap();
        assert_eq!(sup.pressure.init_attempts, 1);
        assert!(!sup.pressure.is_initialized());

        sup.run_once().unwrap();
        assert_eq!(sup.pressure.init_attempts, 2);
        assert!(sup.pressure.is_initialized());
    }

    #[test]
    fn test_modem_failure_does_not_break_the_cadence() {
        let mut sup = supervisor(FlakyPressure::new(0));
        sup.start().unwrap();
        sup.modem_mut().uart_mut().set_fail_writes(true);

        // Transmission is lost, the cycle is not
        sup.run_once().unwrap();
        assert_eq!(sup.watchdog().feed_count(), 1);
        assert_eq!(*sup.state(), AggregatedState::new());
    }

    #[test]
    fn test_timer_fault_is_fatal_and_requests_restart() {
        let mut sup = supervisor(FlakyPressure::new(0));
        sup.start().unwrap();
        sup.timer.set_fail_delays(true);

        let fault = sup.run(); // returns because the mock restart is a no-op
        assert!(matches!(fault.0, PlatformError::Timer(_)));
        assert!(sup.watchdog().restart_requested());
    }

    #[test]
    fn test_watchdog_feed_failure_is_fatal() {
        let mut sup = supervisor(FlakyPressure::new(0));
        sup.start().unwrap();
        sup.watchdog.set_fail_feeds(true);

        let fault = sup.run();
        assert!(matches!(fault.0, PlatformError::Watchdog(_)));
        assert!(sup.watchdog().restart_requested());
    }
}
