//! Integration tests for the manual trigger binding.

use std::sync::Arc;

use vfx_indicator::adapters::status::SharedStatus;
use vfx_indicator::adapters::time::ManualClock;
use vfx_indicator::app::commands::CheckRequest;
use vfx_indicator::app::service::AnimationWorker;
use vfx_indicator::config::IndicatorConfig;
use vfx_indicator::indicator::{Animation, BatteryTier};
use vfx_indicator::scheduler::{RequestKind, Scheduler};
use vfx_indicator::status::Transport;
use vfx_indicator::trigger::{BindingOutcome, IndicatorBehavior};

use crate::mock_hw::{RecordingDelay, RecordingLeds, RecordingSink};

#[test]
fn press_replays_both_checks_in_request_order() {
    let config = IndicatorConfig::default();
    let scheduler = Arc::new(Scheduler::new(ManualClock::new(0)));
    let status = Arc::new(SharedStatus::new());
    status.set_state_of_charge(95);
    status.set_transport(Transport::Usb);

    let mut sink = RecordingSink::new();
    let mut worker = AnimationWorker::new(
        RecordingLeds::new(),
        RecordingDelay::new(),
        Arc::clone(&status),
        Arc::clone(&scheduler),
        config.clone(),
    );
    let behavior = IndicatorBehavior::new(Arc::clone(&scheduler), &config);

    assert_eq!(behavior.on_pressed(CheckRequest::BOTH), BindingOutcome::Opaque);
    assert_eq!(behavior.on_released(CheckRequest::BOTH), BindingOutcome::Opaque);

    assert_eq!(worker.run_pending(&mut sink), Some(RequestKind::Battery));
    assert_eq!(worker.run_pending(&mut sink), Some(RequestKind::Connection));
    assert_eq!(worker.run_pending(&mut sink), None);
    assert_eq!(
        sink.started(),
        vec![Animation::Battery(BatteryTier::High), Animation::UsbConnected]
    );
}

#[test]
fn repeated_presses_coalesce() {
    let config = IndicatorConfig::default();
    let scheduler = Arc::new(Scheduler::new(ManualClock::new(0)));
    let behavior = IndicatorBehavior::new(Arc::clone(&scheduler), &config);

    for _ in 0..5 {
        behavior.on_pressed(CheckRequest::CONNECTION);
    }
    assert_eq!(scheduler.take_due(), Some(RequestKind::Connection));
    assert_eq!(scheduler.take_due(), None);
}

#[test]
fn disabled_indicator_ignores_press() {
    let config = IndicatorConfig {
        enabled: false,
        ..IndicatorConfig::default()
    };
    let scheduler = Arc::new(Scheduler::new(ManualClock::new(0)));
    let behavior = IndicatorBehavior::new(Arc::clone(&scheduler), &config);

    assert_eq!(behavior.on_pressed(CheckRequest::BOTH), BindingOutcome::Opaque);
    assert!(!scheduler.is_pending(RequestKind::Battery));
    assert!(!scheduler.is_pending(RequestKind::Connection));
}
