//! Mock Watchdog implementation for testing

use crate::platform::{
    error::{PlatformError, WatchdogError},
    traits::WatchdogInterface,
    Result,
};

/// Mock Watchdog implementation
///
/// Records starts, feeds and restart requests so supervisor tests can
/// assert on the recovery behavior without resetting the host.
#[derive(Debug, Default)]
pub struct MockWatchdog {
    timeout_ms: Option<u32>,
    feed_count: u32,
    restart_requested: bool,
    fail_feeds: bool,
}

impl MockWatchdog {
    /// Create a new mock watchdog (not started)
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeout the watchdog was armed with, if started
    pub fn timeout_ms(&self) -> Option<u32> {
        self.timeout_ms
    }

    /// Number of feeds since start
    pub fn feed_count(&self) -> u32 {
        self.feed_count
    }

    /// Whether a restart was requested
    pub fn restart_requested(&self) -> bool {
        self.restart_requested
    }

    /// Make all subsequent feeds fail (for fatal-fault tests)
    pub fn set_fail_feeds(&mut self, fail: bool) {
        self.fail_feeds = fail;
    }
}

impl WatchdogInterface for MockWatchdog {
    fn start(&mut self, timeout_ms: u32) -> Result<()> {
        if timeout_ms == 0 {
            return Err(PlatformError::Watchdog(WatchdogError::StartFailed));
        }
        self.timeout_ms = Some(timeout_ms);
        Ok(())
    }

    fn feed(&mut self) -> Result<()> {
        if self.fail_feeds || self.timeout_ms.is_none() {
            return Err(PlatformError::Watchdog(WatchdogError::FeedFailed));
        }
        self.feed_count += 1;
        Ok(())
    }

    fn restart(&mut self) {
        self.restart_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_watchdog_feed_requires_start() {
        let mut wdt = MockWatchdog::new();
        assert!(wdt.feed().is_err());

        wdt.start(500_000).unwrap();
        wdt.feed().unwrap();
        wdt.feed().unwrap();
        assert_eq!(wdt.feed_count(), 2);
        assert_eq!(wdt.timeout_ms(), Some(500_000));
    }

    #[test]
    fn test_mock_watchdog_restart_flag() {
        let mut wdt = MockWatchdog::new();
        assert!(!wdt.restart_requested());
        wdt.restart();
        assert!(wdt.restart_requested());
    }

    #[test]
    fn test_mock_watchdog_zero_timeout_rejected() {
        let mut wdt = MockWatchdog::new();
        assert!(wdt.start(0).is_err());
    }
}
