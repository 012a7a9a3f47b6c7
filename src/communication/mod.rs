//! Communication
//!
//! This module carries the station's uplink: the SIM800 AT-command session
//! driver and the JSON telemetry payload it posts.

pub mod sim800;
pub mod telemetry;
