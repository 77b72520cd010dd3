//! Integration tests for the notification listeners.

use std::sync::Arc;

use vfx_indicator::adapters::status::SharedStatus;
use vfx_indicator::adapters::time::ManualClock;
use vfx_indicator::app::service::AnimationWorker;
use vfx_indicator::config::{BatteryThresholds, IndicatorConfig};
use vfx_indicator::events::{EventAdapter, Notification, Propagation};
use vfx_indicator::indicator::selector::battery_tier;
use vfx_indicator::indicator::{Animation, BatteryTier};
use vfx_indicator::scheduler::{RequestKind, Scheduler};
use vfx_indicator::status::Transport;

use crate::mock_hw::{RecordingDelay, RecordingLeds, RecordingSink};

fn config(critical: u8) -> IndicatorConfig {
    IndicatorConfig {
        battery: BatteryThresholds {
            high: 80,
            mid: 50,
            critical,
        },
        ..IndicatorConfig::default()
    }
}

fn battery(soc: u8) -> Notification {
    Notification::BatteryStateChanged {
        state_of_charge: soc,
    }
}

#[test]
fn battery_band_edges() {
    let config = config(15);
    let scheduler = Arc::new(Scheduler::new(ManualClock::new(0)));
    let events = EventAdapter::new(&scheduler, &config);

    events.dispatch(&battery(0));
    assert!(!scheduler.is_pending(RequestKind::Battery), "0% never triggers");

    events.dispatch(&battery(16));
    assert!(!scheduler.is_pending(RequestKind::Battery), "critical+1 does not trigger");

    events.dispatch(&battery(15));
    assert!(scheduler.is_pending(RequestKind::Battery), "critical triggers");
}

#[test]
fn selector_boundary_matches_listener_band() {
    let t = config(15).battery;
    assert_eq!(battery_tier(15, &t), Some(BatteryTier::Critical));
    assert_eq!(battery_tier(16, &t), Some(BatteryTier::Low));
}

#[test]
fn critical_event_plays_critical_blinks() {
    let config = config(20);
    let scheduler = Arc::new(Scheduler::new(ManualClock::new(0)));
    let status = Arc::new(SharedStatus::new());
    let mut sink = RecordingSink::new();
    let mut worker = AnimationWorker::new(
        RecordingLeds::new(),
        RecordingDelay::new(),
        Arc::clone(&status),
        Arc::clone(&scheduler),
        config.clone(),
    );
    let events = EventAdapter::new(&scheduler, &config);

    status.set_state_of_charge(12);
    assert_eq!(events.dispatch(&battery(12)), Propagation::Bubble);
    assert_eq!(worker.run_pending(&mut sink), Some(RequestKind::Battery));
    assert_eq!(sink.started(), vec![Animation::Battery(BatteryTier::Critical)]);
}

#[test]
fn every_connection_change_requests_a_run() {
    let config = IndicatorConfig::default();
    let scheduler = Arc::new(Scheduler::new(ManualClock::new(0)));
    let events = EventAdapter::new(&scheduler, &config);

    for notification in [
        Notification::EndpointChanged {
            transport: Transport::Usb,
        },
        Notification::EndpointChanged {
            transport: Transport::Unknown,
        },
        Notification::BleActiveProfileChanged { index: 7 },
    ] {
        assert_eq!(events.dispatch(&notification), Propagation::Bubble);
        assert_eq!(scheduler.take_due(), Some(RequestKind::Connection));
        scheduler.finish(RequestKind::Connection);
    }
    assert_eq!(scheduler.completed(RequestKind::Connection), 3);
    assert!(!scheduler.is_pending(RequestKind::Battery));
}

#[test]
fn disabled_listeners_still_bubble() {
    let config = IndicatorConfig {
        enabled: false,
        ..IndicatorConfig::default()
    };
    let scheduler = Arc::new(Scheduler::new(ManualClock::new(0)));
    let events = EventAdapter::new(&scheduler, &config);

    assert_eq!(events.dispatch(&battery(5)), Propagation::Bubble);
    assert_eq!(
        events.dispatch(&Notification::EndpointChanged {
            transport: Transport::Ble
        }),
        Propagation::Bubble
    );
    assert_eq!(scheduler.take_due(), None);
}
