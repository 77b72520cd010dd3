//! Decides which catalogue entries to play for the current status.
//!
//! Pure functions only; the worker captures status and passes it in.

use heapless::Vec;
use log::warn;

use crate::config::BatteryThresholds;
use crate::status::{ConnectionStatus, Transport};

use super::catalogue::{Animation, BatteryTier};
use super::led::LedId;

/// Animations for one request, played in order.
pub type Playlist = Vec<Animation, 2>;

/// Map a state of charge to its tier.
///
/// Comparisons run strictly high to low and the first match wins.  Returns
/// `None` for readings above 100.
pub fn battery_tier(percent: u8, thresholds: &BatteryThresholds) -> Option<BatteryTier> {
    if percent > 100 {
        return None;
    }
    let tier = if percent > thresholds.high {
        BatteryTier::High
    } else if percent > thresholds.mid {
        BatteryTier::Mid
    } else if percent > thresholds.critical {
        BatteryTier::Low
    } else {
        BatteryTier::Critical
    };
    Some(tier)
}

pub fn battery_animation(percent: u8, thresholds: &BatteryThresholds) -> Option<Animation> {
    battery_tier(percent, thresholds).map(Animation::Battery)
}

/// Build the connection playlist.
///
/// BLE opens with the profile-switch pulse, then shows the link state.
/// With BLE support disabled the BLE branch plays nothing.
pub fn connection_playlist(status: &ConnectionStatus, ble_enabled: bool) -> Playlist {
    let mut playlist = Playlist::new();
    match status.transport {
        Transport::Usb => push(&mut playlist, Animation::UsbConnected),
        Transport::Ble if ble_enabled => {
            let profile = &status.profile;
            match LedId::from_index(profile.index) {
                Some(led) => push(&mut playlist, Animation::ProfileSwitch(led)),
                None => warn!("Selector: profile {} has no LED, skipping pulse", profile.index),
            }

            let link = if profile.connected {
                Animation::BleConnected
            } else if profile.is_open() {
                Animation::BleOpen
            } else {
                Animation::BleBondedDisconnected
            };
            push(&mut playlist, link);
        }
        Transport::Ble => {}
        Transport::Unknown => push(&mut playlist, Animation::UnknownTransport),
    }
    playlist
}

fn push(playlist: &mut Playlist, animation: Animation) {
    // Capacity covers the longest branch (profile pulse + link state).
    if playlist.push(animation).is_err() {
        warn!("Selector: playlist full, dropped {:?}", animation);
    }
}
