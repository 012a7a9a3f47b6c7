//! Watchdog interface trait
//!
//! This module defines the hardware watchdog interface that platform implementations must provide.

use crate::platform::Result;

/// Watchdog interface trait
///
/// The watchdog is the firmware's recovery mechanism of last resort: the
/// supervisor loop feeds it once per cycle, and any lockup between feeds
/// ends in a hardware reset. There is no way to stop a started watchdog.
///
/// # Safety Invariants
///
/// - `start` must be called before the first `feed`
/// - Only one watchdog instance per device
pub trait WatchdogInterface {
    /// Arm the watchdog with the given timeout
    ///
    /// After this call the device resets unless `feed` is invoked at
    /// least once per `timeout_ms` window.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Watchdog(WatchdogError::StartFailed)` if
    /// the timeout is out of range for the hardware.
    fn start(&mut self, timeout_ms: u32) -> Result<()>;

    /// Reset the watchdog countdown
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Watchdog(WatchdogError::FeedFailed)` if
    /// the watchdog is not running.
    fn feed(&mut self) -> Result<()>;

    /// Request an immediate device restart
    ///
    /// On hardware this does not return: the watchdog forces a full chip
    /// reset with no diagnostic state preserved. Mock implementations
    /// record the request and return so the supervisor's fatal path can
    /// be exercised in host tests.
    fn restart(&mut self);
}
