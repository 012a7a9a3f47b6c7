//! RP2350 Watchdog implementation
//!
//! This module provides hardware watchdog support using the `rp235x-hal` crate.

use crate::platform::{
    error::{PlatformError, WatchdogError},
    traits::WatchdogInterface,
    Result,
};
use rp235x_hal::fugit::ExtU32;
use rp235x_hal::Watchdog;

/// Maximum timeout the RP2350 watchdog counter can represent (~8.3 s at 1 MHz tick)
const MAX_TIMEOUT_MS: u32 = 8_300;

/// RP2350 Watchdog implementation
///
/// Wraps the `rp235x-hal` watchdog to implement the `WatchdogInterface` trait.
pub struct Rp2350Watchdog {
    watchdog: Watchdog,
    started: bool,
}

impl Rp2350Watchdog {
    /// Create a new RP2350 Watchdog instance
    ///
    /// # Arguments
    ///
    /// * `watchdog` - The HAL watchdog (tick generation already enabled
    ///   during clock init)
    pub fn new(watchdog: Watchdog) -> Self {
        Self {
            watchdog,
            started: false,
        }
    }
}

impl WatchdogInterface for Rp2350Watchdog {
    fn start(&mut self, timeout_ms: u32) -> Result<()> {
        if timeout_ms == 0 || timeout_ms > MAX_TIMEOUT_MS {
            return Err(PlatformError::Watchdog(WatchdogError::StartFailed));
        }
        self.watchdog.start(timeout_ms.millis());
        self.started = true;
        Ok(())
    }

    fn feed(&mut self) -> Result<()> {
        if !self.started {
            return Err(PlatformError::Watchdog(WatchdogError::FeedFailed));
        }
        self.watchdog.feed();
        Ok(())
    }

    fn restart(&mut self) {
        cortex_m::peripheral::SCB::sys_reset();
    }
}
