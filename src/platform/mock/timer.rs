//! Mock Timer implementation for testing

use crate::platform::{
    error::{PlatformError, TimerError},
    traits::TimerInterface,
    Result,
};

/// Mock Timer implementation
///
/// Simulated time: delays advance the clock instantly, so acquisition
/// cycles and schedule alignment run in microseconds of wall time while
/// tests can still assert on the virtual durations slept.
#[derive(Debug)]
pub struct MockTimer {
    now_us: u64,
    fail_delays: bool,
}

impl MockTimer {
    /// Create a new mock timer
    pub fn new() -> Self {
        Self {
            now_us: 0,
            fail_delays: false,
        }
    }

    /// Make all subsequent delays fail (for fatal-fault tests)
    pub fn set_fail_delays(&mut self, fail: bool) {
        self.fail_delays = fail;
    }

    /// Total virtual time slept, in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.now_us / 1000
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        if self.fail_delays {
            return Err(PlatformError::Timer(TimerError::InvalidDuration));
        }
        self.now_us = self.now_us.wrapping_add(us as u64);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_timer_delay_us() {
        let mut timer = MockTimer::new();
        assert_eq!(timer.now_us(), 0);

        timer.delay_us(1000).unwrap();
        assert_eq!(timer.now_us(), 1000);

        timer.delay_us(500).unwrap();
        assert_eq!(timer.now_us(), 1500);
    }

    #[test]
    fn test_mock_timer_delay_ms_and_s() {
        let mut timer = MockTimer::new();
        timer.delay_ms(1).unwrap();
        assert_eq!(timer.now_us(), 1000);

        timer.delay_s(2).unwrap();
        assert_eq!(timer.now_ms(), 2001);
    }

    #[test]
    fn test_mock_timer_failing_delays() {
        let mut timer = MockTimer::new();
        timer.set_fail_delays(true);
        assert!(timer.delay_ms(10).is_err());
        assert_eq!(timer.now_us(), 0);
    }
}
