//! Application core: the animation worker and its port boundary.
//!
//! The worker is the only component that touches LEDs.  Everything it
//! needs from the outside world (LED channels, status, time, event
//! output) arrives through the port traits in [`ports`], so the whole
//! layer runs on the host against mock adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
