//! Connection and battery status as reported by the host firmware.
//!
//! These are read-only snapshots.  The indicator never owns this state; it
//! queries it through [`StatusPort`](crate::app::ports::StatusPort) at the
//! moment an animation starts.

/// Active output transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    Usb,
    Ble,
    /// Unset or unsupported transport.
    #[default]
    Unknown,
}

impl Transport {
    /// Decode the host's raw transport discriminant (`0` none, `1` USB, `2` BLE).
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Usb,
            2 => Self::Ble,
            _ => Self::Unknown,
        }
    }

    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Usb => 1,
            Self::Ble => 2,
        }
    }
}

/// Status of the active BLE profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BleProfileStatus {
    pub index: u8,
    pub bonded: bool,
    pub connected: bool,
}

impl BleProfileStatus {
    /// Open for pairing: neither bonded nor connected.
    pub const fn is_open(&self) -> bool {
        !self.bonded && !self.connected
    }
}

/// Everything the connection animation needs, captured at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionStatus {
    pub transport: Transport,
    pub profile: BleProfileStatus,
}
