//! Clock-aligned transmission scheduling
//!
//! Transmissions land near 5-minute wall-clock marks so the backend sees a
//! regular grid regardless of how long acquisition took. The modem's RTC is
//! the only clock the station has; when it cannot be parsed the cycle
//! transmits unaligned rather than stall.

use crate::communication::sim800::Sim800Driver;
use crate::platform::{
    traits::{TimerInterface, UartInterface},
    Result,
};

/// Grid spacing in minutes
const SLOT_MINUTES: u32 = 5;

/// Seconds to sleep to reach the next 5-minute boundary
///
/// A remainder of zero means the slot is already open (no wait), otherwise
/// the wait runs to the next boundary, corrected by the seconds already
/// elapsed in the current minute.
pub fn alignment_delay_secs(minutes: u8, seconds: u8) -> u32 {
    let remainder = minutes as u32 % SLOT_MINUTES;
    if remainder == 0 {
        return 0;
    }
    (SLOT_MINUTES - remainder) * 60 - seconds as u32
}

/// Block until the next transmission slot
///
/// Queries the modem clock and sleeps out the alignment delay. An
/// unparseable clock response logs a warning and returns immediately - the
/// transmission proceeds unaligned for this cycle.
///
/// # Errors
///
/// Returns a platform error when the serial link or the timer fails.
pub fn wait_for_slot<U, MT, T>(modem: &mut Sim800Driver<U, MT>, timer: &mut T) -> Result<()>
where
    U: UartInterface,
    MT: TimerInterface,
    T: TimerInterface,
{
    match modem.query_clock()? {
        Some(stamp) => {
            let delay_s = alignment_delay_secs(stamp.minutes, stamp.seconds);
            if delay_s > 0 {
                crate::log_info!("scheduler: {}s to the next 5-minute slot", delay_s);
                timer.delay_s(delay_s)?;
            }
            Ok(())
        }
        None => {
            crate::log_warn!("scheduler: clock unavailable, transmitting unaligned");
            Ok(())
        }
    }
}
