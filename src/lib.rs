//! Three-LED status indicator engine for keyboard firmware.
//!
//! Exposes the pure-logic modules for integration testing and host
//! simulation.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod indicator;
pub mod scheduler;
pub mod status;
pub mod trigger;

pub use error::{Error, Result};
