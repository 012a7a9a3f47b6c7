//! SIM800 AT-command session driver
//!
//! Drives a SIM800-class cellular modem over the `UartInterface`
//! abstraction. Each exchange is a blocking write-then-drain: the command
//! goes out terminated by a carriage return, then the input channel is
//! polled until the settling window elapses and whatever text accumulated
//! is returned. The protocol is not response-verified - an empty or
//! partial response is indistinguishable from a timeout and neither is an
//! error. That mirrors the module's field behavior: the device keeps its
//! cadence whether or not the network cooperates, and the watchdog covers
//! the rest.

use core::fmt::Write as _;
use heapless::String;

use crate::platform::{
    traits::{TimerInterface, UartInterface},
    Result,
};

/// Response accumulator capacity; SIM800 URC lines are short
pub const RESPONSE_CAPACITY: usize = 256;

/// Command line capacity (bounded by the URL parameter)
const COMMAND_CAPACITY: usize = 160;

/// Pause between UART polls while draining a response
const POLL_INTERVAL_MS: u32 = 50;

/// Default settling window for one command exchange, in seconds
const DEFAULT_TIMEOUT_S: u32 = 1;

/// HTTPDATA write window announced to the modem, in milliseconds
const HTTP_DATA_TIMEOUT_MS: u32 = 10_000;

/// Minute and second fields of the modem's real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockStamp {
    pub minutes: u8,
    pub seconds: u8,
}

/// SIM800 session driver
///
/// Owns the modem UART and a timer handle for settling delays.
pub struct Sim800Driver<U: UartInterface, T: TimerInterface> {
    uart: U,
    timer: T,
}

impl<U: UartInterface, T: TimerInterface> Sim800Driver<U, T> {
    /// Create a new SIM800 driver
    pub fn new(uart: U, timer: T) -> Self {
        Self { uart, timer }
    }

    /// Get mutable reference to the UART interface
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Send one AT command and drain the response
    ///
    /// Writes `command` terminated by `\r`, then polls the UART for up to
    /// `timeout_s` seconds. Returns whatever text accumulated; a silent
    /// modem yields an empty string, not an error. Text beyond the buffer
    /// capacity is dropped.
    ///
    /// # Errors
    ///
    /// Returns a platform error only when the serial link itself fails.
    pub fn send_command(
        &mut self,
        command: &str,
        timeout_s: u32,
    ) -> Result<String<RESPONSE_CAPACITY>> {
        self.uart.write(command.as_bytes())?;
        self.uart.write(b"\r")?;

        let mut response: String<RESPONSE_CAPACITY> = String::new();
        let deadline_ms = timeout_s.saturating_mul(1000);
        let mut elapsed_ms = 0u32;
        while elapsed_ms < deadline_ms {
            let mut buf = [0u8; 32];
            let count = self.uart.read(&mut buf)?;
            if count == 0 {
                self.timer.delay_ms(POLL_INTERVAL_MS)?;
                elapsed_ms += POLL_INTERVAL_MS;
                continue;
            }
            for &byte in &buf[..count] {
                let _ = response.push(byte as char);
            }
        }

        crate::log_debug!("modem: {} -> {} bytes", command, response.len());
        Ok(response)
    }

    /// One-time modem setup at boot: echo off, RTC seed
    ///
    /// The seeded clock only needs to be self-consistent - the scheduler
    /// aligns on its minute/second fields, not on absolute time.
    ///
    /// # Errors
    ///
    /// Returns a platform error when the serial link fails.
    pub fn configure(&mut self, clock_seed: &str) -> Result<()> {
        self.send_command("ATE0", DEFAULT_TIMEOUT_S)?;
        let mut cmd: String<COMMAND_CAPACITY> = String::new();
        let _ = write!(cmd, "AT+CCLK=\"{}\"", clock_seed);
        self.send_command(&cmd, DEFAULT_TIMEOUT_S)?;
        Ok(())
    }

    /// Open the GPRS bearer and HTTP context
    ///
    /// Fixed sequence with the settling delays the module needs between
    /// bearer operations. Success is assumed, not parsed from responses.
    ///
    /// # Errors
    ///
    /// Returns a platform error when the serial link fails.
    pub fn initialize_session(&mut self, apn: &str) -> Result<()> {
        self.send_command("AT+SAPBR=3,1,\"CONTYPE\",\"GPRS\"", DEFAULT_TIMEOUT_S)?;
        self.timer.delay_s(2)?;

        let mut cmd: String<COMMAND_CAPACITY> = String::new();
        let _ = write!(cmd, "AT+SAPBR=3,1,\"APN\",\"{}\"", apn);
        self.send_command(&cmd, DEFAULT_TIMEOUT_S)?;

        self.send_command("AT+SAPBR=1,1", DEFAULT_TIMEOUT_S)?;
        self.timer.delay_s(2)?;

        self.send_command("AT+HTTPINIT", DEFAULT_TIMEOUT_S)?;
        self.send_command("AT+HTTPPARA=\"CID\",1", DEFAULT_TIMEOUT_S)?;
        Ok(())
    }

    /// Post one JSON body and tear the bearer back down
    ///
    /// No HTTP status code is inspected; the exchange reports success
    /// whenever the serial writes went through.
    ///
    /// # Errors
    ///
    /// Returns a platform error when the serial link fails.
    pub fn send_http_post(&mut self, url: &str, body: &str) -> Result<()> {
        let mut cmd: String<COMMAND_CAPACITY> = String::new();
        let _ = write!(cmd, "AT+HTTPPARA=\"URL\",\"{}\"", url);
        self.send_command(&cmd, DEFAULT_TIMEOUT_S)?;

        self.send_command(
            "AT+HTTPPARA=\"CONTENT\",\"application/json\"",
            DEFAULT_TIMEOUT_S,
        )?;
        self.timer.delay_s(2)?;

        cmd.clear();
        let _ = write!(cmd, "AT+HTTPDATA={},{}", body.len(), HTTP_DATA_TIMEOUT_MS);
        self.send_command(&cmd, DEFAULT_TIMEOUT_S)?;
        self.timer.delay_s(2)?;

        self.uart.write(body.as_bytes())?;
        self.uart.write(b"\r")?;
        self.timer.delay_s(1)?;

        self.send_command("AT+HTTPACTION=1", DEFAULT_TIMEOUT_S)?;
        self.timer.delay_s(10)?;

        self.send_command("AT+SAPBR=0,1", DEFAULT_TIMEOUT_S)?;
        self.send_command("AT+HTTPTERM", DEFAULT_TIMEOUT_S)?;
        crate::log_info!("modem: posted {} bytes", body.len());
        Ok(())
    }

    /// Query the modem's real-time clock
    ///
    /// Returns `Ok(None)` when the response carries no parseable CCLK
    /// timestamp; the caller decides whether to proceed unaligned.
    ///
    /// # Errors
    ///
    /// Returns a platform error when the serial link fails.
    pub fn query_clock(&mut self) -> Result<Option<ClockStamp>> {
        let response = self.send_command("AT+CCLK?", DEFAULT_TIMEOUT_S)?;
        Ok(parse_cclk(&response))
    }
}

/// Extract minutes and seconds from a `+CCLK: "yy/MM/dd,HH:mm:ss+zz"` response
pub fn parse_cclk(response: &str) -> Option<ClockStamp> {
    if !response.contains("+CCLK") {
        return None;
    }
    let quoted = response.split('"').nth(1)?;
    let time_part = quoted.split(',').nth(1)?;
    let mut fields = time_part.split(':');
    let _hours = fields.next()?;
    let minutes: u8 = fields.next()?.parse().ok()?;
    let seconds: u8 = fields.next()?.get(0..2)?.parse().ok()?;
    if minutes > 59 || seconds > 59 {
        return None;
    }
    Some(ClockStamp { minutes, seconds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockTimer, MockUart};
    use crate::platform::traits::UartConfig;

    fn driver() -> Sim800Driver<MockUart, MockTimer> {
        Sim800Driver::new(MockUart::new(UartConfig::modem_default()), MockTimer::new())
    }

    #[test]
    fn test_send_command_terminates_with_cr() {
        let mut modem = driver();
        modem.send_command("ATE0", 1).unwrap();
        assert_eq!(modem.uart_mut().tx_buffer(), b"ATE0\r");
    }

    #[test]
    fn test_send_command_returns_accumulated_text() {
        let mut modem = driver();
        modem.uart_mut().inject_rx_data(b"\r\nOK\r\n");
        let response = modem.send_command("AT", 1).unwrap();
        assert_eq!(response.as_str(), "\r\nOK\r\n");
    }

    #[test]
    fn test_send_command_timeout_yields_empty_string() {
        let mut modem = driver();
        let response = modem.send_command("AT", 2).unwrap();
        assert!(response.is_empty());
        // The full settling window was waited out
        assert!(modem.timer.elapsed_ms() >= 2_000);
    }

    #[test]
    fn test_initialize_session_command_sequence() {
        let mut modem = driver();
        modem.initialize_session("internet.tigo.bo").unwrap();
        let tx = modem.uart_mut().tx_text();
        let expected = [
            "AT+SAPBR=3,1,\"CONTYPE\",\"GPRS\"\r",
            "AT+SAPBR=3,1,\"APN\",\"internet.tigo.bo\"\r",
            "AT+SAPBR=1,1\r",
            "AT+HTTPINIT\r",
            "AT+HTTPPARA=\"CID\",1\r",
        ];
        let mut cursor = 0;
        for cmd in expected {
            let pos = tx[cursor..].find(cmd).expect(cmd);
            cursor += pos + cmd.len();
        }
    }

    #[test]
    fn test_send_http_post_announces_body_length() {
        let mut modem = driver();
        let body = r#"{"iddevice":"CCBA"}"#;
        modem.send_http_post("http://example.net/post", body).unwrap();
        let tx = modem.uart_mut().tx_text();

        assert!(tx.contains("AT+HTTPPARA=\"URL\",\"http://example.net/post\"\r"));
        assert!(tx.contains("AT+HTTPPARA=\"CONTENT\",\"application/json\"\r"));
        assert!(tx.contains(&format!("AT+HTTPDATA={},10000\r", body.len())));
        assert!(tx.contains(body));
        assert!(tx.contains("AT+HTTPACTION=1\r"));
        // Bearer and HTTP context are torn down at the end
        let term = tx.rfind("AT+HTTPTERM\r").unwrap();
        let bearer_close = tx.rfind("AT+SAPBR=0,1\r").unwrap();
        assert!(bearer_close < term);
    }

    #[test]
    fn test_send_http_post_fails_on_dead_uart() {
        let mut modem = driver();
        modem.uart_mut().set_fail_writes(true);
        assert!(modem.send_http_post("http://example.net", "{}").is_err());
    }

    #[test]
    fn test_query_clock_parses_stamp() {
        let mut modem = driver();
        modem
            .uart_mut()
            .inject_rx_data(b"\r\n+CCLK: \"24/10/11,14:47:10+00\"\r\n\r\nOK\r\n");
        let stamp = modem.query_clock().unwrap();
        assert_eq!(
            stamp,
            Some(ClockStamp {
                minutes: 47,
                seconds: 10
            })
        );
        assert!(modem.uart_mut().tx_text().starts_with("AT+CCLK?\r"));
    }

    #[test]
    fn test_query_clock_unparseable_is_none() {
        let mut modem = driver();
        modem.uart_mut().inject_rx_data(b"\r\nERROR\r\n");
        assert_eq!(modem.query_clock().unwrap(), None);
    }

    #[test]
    fn test_parse_cclk_variants() {
        assert_eq!(
            parse_cclk("+CCLK: \"24/10/11,14:05:09+00\""),
            Some(ClockStamp {
                minutes: 5,
                seconds: 9
            })
        );
        // Missing quotes, missing fields, out-of-range values
        assert_eq!(parse_cclk("+CCLK: 24/10/11"), None);
        assert_eq!(parse_cclk("OK"), None);
        assert_eq!(parse_cclk(""), None);
        assert_eq!(parse_cclk("+CCLK: \"24/10/11,14:99:09+00\""), None);
    }
}
