//! Inbound check commands.
//!
//! A [`CheckRequest`] is what a key binding carries: which of the two
//! status animations to replay.  The [`trigger`](crate::trigger) surface
//! turns it into scheduler requests.

use serde::{Deserialize, Serialize};

use crate::scheduler::RequestKind;

/// Flags selecting which checks a manual trigger replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckRequest {
    pub check_battery: bool,
    pub check_connection: bool,
}

impl CheckRequest {
    pub const BATTERY: Self = Self {
        check_battery: true,
        check_connection: false,
    };

    pub const CONNECTION: Self = Self {
        check_battery: false,
        check_connection: true,
    };

    pub const BOTH: Self = Self {
        check_battery: true,
        check_connection: true,
    };

    /// Requested kinds, battery first.
    pub fn kinds(self) -> impl Iterator<Item = RequestKind> {
        [
            (self.check_battery, RequestKind::Battery),
            (self.check_connection, RequestKind::Connection),
        ]
        .into_iter()
        .filter_map(|(on, kind)| on.then_some(kind))
    }

    pub fn is_empty(self) -> bool {
        !self.check_battery && !self.check_connection
    }
}
