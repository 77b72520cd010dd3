//! Notification listeners.
//!
//! The host firmware publishes status notifications on its event bus.
//! Two listeners subscribe: one for connection changes, one for battery
//! changes.  Each only arms a scheduler slot and returns immediately, so
//! they are safe to call from the publisher's context.
//!
//! ```text
//! ┌──────────────────────┐     ┌────────────────────┐     ┌───────────┐
//! │ EndpointChanged      │────▶│ ConnectionListener │────▶│           │
//! │ BleActiveProfile...  │────▶│                    │     │ Scheduler │
//! │ BatteryStateChanged  │────▶│ BatteryListener    │────▶│           │
//! └──────────────────────┘     └────────────────────┘     └───────────┘
//! ```

use std::sync::Arc;

use log::debug;

use crate::app::ports::Clock;
use crate::config::IndicatorConfig;
use crate::scheduler::{RequestKind, Scheduler};
use crate::status::Transport;

/// Notifications the indicator subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Battery state of charge changed (percent).
    BatteryStateChanged { state_of_charge: u8 },
    /// Output endpoint switched.
    EndpointChanged { transport: Transport },
    /// Active BLE profile switched.
    BleActiveProfileChanged { index: u8 },
}

/// What the bus should do with a notification after a listener saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Continue delivering to other subscribers.
    Bubble,
}

/// A subscriber on the host's notification bus.
pub trait Listener {
    fn on_notification(&self, notification: &Notification) -> Propagation;
}

/// Battery charge that warrants an unprompted warning.
///
/// Zero is treated as "no reading yet" and never triggers.
pub const fn battery_in_critical_band(state_of_charge: u8, critical: u8) -> bool {
    state_of_charge > 0 && state_of_charge <= critical
}

// ── Connection ────────────────────────────────────────────────

/// Requests a connection run on every endpoint or profile change.
pub struct ConnectionListener<C> {
    scheduler: Arc<Scheduler<C>>,
    enabled: bool,
}

impl<C: Clock> ConnectionListener<C> {
    pub fn new(scheduler: Arc<Scheduler<C>>, config: &IndicatorConfig) -> Self {
        Self {
            scheduler,
            enabled: config.enabled,
        }
    }
}

impl<C: Clock> Listener for ConnectionListener<C> {
    fn on_notification(&self, notification: &Notification) -> Propagation {
        let relevant = matches!(
            notification,
            Notification::EndpointChanged { .. } | Notification::BleActiveProfileChanged { .. }
        );
        if self.enabled && relevant {
            debug!("ConnectionListener: {:?}", notification);
            self.scheduler.request(RequestKind::Connection);
        }
        Propagation::Bubble
    }
}

// ── Battery ───────────────────────────────────────────────────

/// Requests a battery run when charge drops into the critical band.
pub struct BatteryListener<C> {
    scheduler: Arc<Scheduler<C>>,
    enabled: bool,
    critical: u8,
}

impl<C: Clock> BatteryListener<C> {
    pub fn new(scheduler: Arc<Scheduler<C>>, config: &IndicatorConfig) -> Self {
        Self {
            scheduler,
            enabled: config.enabled,
            critical: config.battery.critical,
        }
    }
}

impl<C: Clock> Listener for BatteryListener<C> {
    fn on_notification(&self, notification: &Notification) -> Propagation {
        if let Notification::BatteryStateChanged { state_of_charge } = *notification {
            if self.enabled && battery_in_critical_band(state_of_charge, self.critical) {
                debug!("BatteryListener: critical charge {}%", state_of_charge);
                self.scheduler.request(RequestKind::Battery);
            }
        }
        Propagation::Bubble
    }
}

// ── Adapter ───────────────────────────────────────────────────

/// Both listeners behind one entry point for the host bus.
pub struct EventAdapter<C> {
    connection: ConnectionListener<C>,
    battery: BatteryListener<C>,
}

impl<C: Clock> EventAdapter<C> {
    pub fn new(scheduler: &Arc<Scheduler<C>>, config: &IndicatorConfig) -> Self {
        Self {
            connection: ConnectionListener::new(Arc::clone(scheduler), config),
            battery: BatteryListener::new(Arc::clone(scheduler), config),
        }
    }

    /// Deliver one notification to both listeners.
    pub fn dispatch(&self, notification: &Notification) -> Propagation {
        self.connection.on_notification(notification);
        self.battery.on_notification(notification)
    }
}
