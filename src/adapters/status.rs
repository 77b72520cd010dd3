//! Shared status snapshot adapter.
//!
//! The host firmware writes battery and connection state as it changes;
//! the animation worker reads it through [`StatusPort`] when a request
//! executes.  Every field is an independent atomic so writers never block
//! and a `static` instance needs no initialisation code.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::app::ports::StatusPort;
use crate::status::{BleProfileStatus, Transport};

pub struct SharedStatus {
    state_of_charge: AtomicU8,
    transport: AtomicU8,
    profile_index: AtomicU8,
    bonded: AtomicBool,
    connected: AtomicBool,
}

impl Default for SharedStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStatus {
    pub const fn new() -> Self {
        Self {
            state_of_charge: AtomicU8::new(0),
            transport: AtomicU8::new(Transport::Unknown.as_raw()),
            profile_index: AtomicU8::new(0),
            bonded: AtomicBool::new(false),
            connected: AtomicBool::new(false),
        }
    }

    pub fn set_state_of_charge(&self, percent: u8) {
        self.state_of_charge.store(percent, Ordering::Release);
    }

    pub fn set_transport(&self, transport: Transport) {
        self.transport.store(transport.as_raw(), Ordering::Release);
    }

    pub fn set_active_profile(&self, profile: BleProfileStatus) {
        self.profile_index.store(profile.index, Ordering::Release);
        self.bonded.store(profile.bonded, Ordering::Release);
        self.connected.store(profile.connected, Ordering::Release);
    }
}

impl StatusPort for SharedStatus {
    fn battery_state_of_charge(&self) -> u8 {
        self.state_of_charge.load(Ordering::Acquire)
    }

    fn transport(&self) -> Transport {
        Transport::from_raw(self.transport.load(Ordering::Acquire))
    }

    fn active_profile(&self) -> BleProfileStatus {
        BleProfileStatus {
            index: self.profile_index.load(Ordering::Acquire),
            bonded: self.bonded.load(Ordering::Acquire),
            connected: self.connected.load(Ordering::Acquire),
        }
    }
}
