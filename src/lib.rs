#![cfg_attr(not(test), no_std)]

//! pico_meteo - Weather station firmware for Raspberry Pi Pico 2 W
//!
//! Polls a DHT22 climate probe and a BMP280/BME280 barometric sensor,
//! aggregates the readings across a fixed acquisition window, and posts
//! them as JSON through a SIM800 cellular modem's HTTP client, aligned to
//! a 5-minute wall-clock grid. A hardware watchdog and an
//! unconditional-restart policy are the only recovery mechanisms.
//!
//! The crate is a library: the hardware entry point (`demos/station.rs`)
//! wires the RP2350 peripherals into the platform traits and hands them to
//! the supervisor. Everything above the platform layer runs unchanged on
//! the host against the mock platform, which is how the test suite drives
//! full acquisition/transmission cycles without a device.

// The mock platform is std-backed (Vec buffers, transaction logs); linking
// std here lets integration tests drive the full station off-target.
#[cfg(all(not(test), feature = "mock"))]
extern crate std;

// Platform abstraction layer
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Modem session and telemetry payload
pub mod communication;

// Acquisition, scheduling, supervision, logging
pub mod core;

// Station configuration
pub mod config;
