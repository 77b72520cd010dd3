//! Port traits: the hexagonal boundary between the indicator core and the
//! rest of the keyboard firmware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AnimationWorker (domain)
//! ```
//!
//! Driven adapters (LED PWM bank, status snapshot, clock, event sinks)
//! implement these traits.  The blocking delay is not a crate trait: the
//! sequencer takes any [`embedded_hal::delay::DelayNs`].

use std::sync::Arc;

use crate::error::LedError;
use crate::indicator::led::{Brightness, LedId};
use crate::status::{BleProfileStatus, ConnectionStatus, Transport};

// ───────────────────────────────────────────────────────────────
// LED port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Sets one logical LED to a brightness.  Synchronous and idempotent.
pub trait LedPort {
    fn set_brightness(&mut self, led: LedId, level: Brightness) -> Result<(), LedError>;
}

impl<T: LedPort + ?Sized> LedPort for &mut T {
    fn set_brightness(&mut self, led: LedId, level: Brightness) -> Result<(), LedError> {
        (**self).set_brightness(led, level)
    }
}

// ───────────────────────────────────────────────────────────────
// Status port (host firmware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side queries into the host's battery and connection state.
pub trait StatusPort {
    /// Battery state of charge in percent.
    fn battery_state_of_charge(&self) -> u8;

    /// Currently selected output transport.
    fn transport(&self) -> Transport;

    /// Status of the active BLE profile.
    fn active_profile(&self) -> BleProfileStatus;

    /// Snapshot used by the connection animation.
    fn connection(&self) -> ConnectionStatus {
        ConnectionStatus {
            transport: self.transport(),
            profile: self.active_profile(),
        }
    }
}

impl<T: StatusPort + ?Sized> StatusPort for Arc<T> {
    fn battery_state_of_charge(&self) -> u8 {
        (**self).battery_state_of_charge()
    }

    fn transport(&self) -> Transport {
        (**self).transport()
    }

    fn active_profile(&self) -> BleProfileStatus {
        (**self).active_profile()
    }
}

impl<T: StatusPort + ?Sized> StatusPort for &T {
    fn battery_state_of_charge(&self) -> u8 {
        (**self).battery_state_of_charge()
    }

    fn transport(&self) -> Transport {
        (**self).transport()
    }

    fn active_profile(&self) -> BleProfileStatus {
        (**self).active_profile()
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.  Wraps at `u32::MAX`; callers compare
/// with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The worker reports what it does through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::IndicatorEvent);
}
