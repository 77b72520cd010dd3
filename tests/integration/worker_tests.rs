//! Integration tests for the scheduler → worker → sequencer pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use vfx_indicator::adapters::status::SharedStatus;
use vfx_indicator::adapters::time::ManualClock;
use vfx_indicator::app::events::{IndicatorEvent, SkipReason};
use vfx_indicator::app::service::AnimationWorker;
use vfx_indicator::config::{IndicatorConfig, WorkerSettings};
use vfx_indicator::drivers::task_pin::spawn_animation_worker;
use vfx_indicator::events::{EventAdapter, Notification};
use vfx_indicator::indicator::{Animation, BatteryTier, LedId};
use vfx_indicator::scheduler::{RequestKind, Scheduler};
use vfx_indicator::status::{BleProfileStatus, Transport};

use crate::mock_hw::{DelayTotal, RecordingDelay, RecordingLeds, RecordingSink};

type Worker = AnimationWorker<RecordingLeds, RecordingDelay, Arc<SharedStatus>, ManualClock>;

struct Rig {
    worker: Worker,
    leds: RecordingLeds,
    sink: RecordingSink,
    delay: DelayTotal,
    status: Arc<SharedStatus>,
    clock: ManualClock,
    scheduler: Arc<Scheduler<ManualClock>>,
}

fn rig_with(config: IndicatorConfig, delay: impl FnOnce(&Arc<Scheduler<ManualClock>>) -> RecordingDelay) -> Rig {
    let clock = ManualClock::new(0);
    let scheduler = Arc::new(Scheduler::new(clock.clone()));
    let status = Arc::new(SharedStatus::new());
    let leds = RecordingLeds::new();
    let delay = delay(&scheduler);
    let total = delay.total();
    let worker = AnimationWorker::new(
        leds.clone(),
        delay,
        Arc::clone(&status),
        Arc::clone(&scheduler),
        config,
    );
    Rig {
        worker,
        leds,
        sink: RecordingSink::new(),
        delay: total,
        status,
        clock,
        scheduler,
    }
}

fn rig() -> Rig {
    rig_with(IndicatorConfig::default(), |_| RecordingDelay::new())
}

fn ble(index: u8, bonded: bool, connected: bool) -> BleProfileStatus {
    BleProfileStatus {
        index,
        bonded,
        connected,
    }
}

fn finished_reports(sink: &RecordingSink) -> Vec<vfx_indicator::indicator::RampReport> {
    sink.events()
        .into_iter()
        .filter_map(|e| match e {
            IndicatorEvent::AnimationFinished { report, .. } => Some(report),
            _ => None,
        })
        .collect()
}

// ── Connection animations ─────────────────────────────────────

#[test]
fn usb_runs_six_phases_of_101_steps() {
    let mut r = rig();
    r.status.set_transport(Transport::Usb);
    r.scheduler.request(RequestKind::Connection);

    assert_eq!(r.worker.run_pending(&mut r.sink), Some(RequestKind::Connection));
    assert_eq!(r.sink.started(), vec![Animation::UsbConnected]);

    let reports = finished_reports(&r.sink);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].steps, 606);
    // Outer pair for four phases, centre for two.
    assert_eq!(reports[0].writes, (4 * 2 + 2) * 101);
    assert_eq!(r.leds.len(), 1010);
    assert_eq!(r.delay.ms(), (3 + 4 + 3) * 101);
}

#[test]
fn ble_open_plays_profile_pulse_then_chase() {
    let mut r = rig();
    r.status.set_transport(Transport::Ble);
    r.status.set_active_profile(ble(0, false, false));
    r.scheduler.request(RequestKind::Connection);

    r.worker.run_pending(&mut r.sink);
    assert_eq!(
        r.sink.started(),
        vec![Animation::ProfileSwitch(LedId::L0), Animation::BleOpen]
    );
}

#[test]
fn unknown_transport_plays_mirror() {
    let mut r = rig();
    r.scheduler.request(RequestKind::Connection);
    r.worker.run_pending(&mut r.sink);
    assert_eq!(r.sink.started(), vec![Animation::UnknownTransport]);
}

#[test]
fn ble_disabled_skips_ble_branch() {
    let config = IndicatorConfig {
        ble_enabled: false,
        ..IndicatorConfig::default()
    };
    let mut r = rig_with(config, |_| RecordingDelay::new());
    r.status.set_transport(Transport::Ble);
    r.scheduler.request(RequestKind::Connection);

    r.worker.run_pending(&mut r.sink);
    assert_eq!(r.leds.len(), 0);
    assert_eq!(
        r.sink.events(),
        vec![IndicatorEvent::Skipped {
            request: RequestKind::Connection,
            reason: SkipReason::BleDisabled,
        }]
    );
}

// ── Coalescing ────────────────────────────────────────────────

#[test]
fn burst_of_events_yields_one_run_with_status_at_execution() {
    let mut r = rig();
    let events = EventAdapter::new(&r.scheduler, r.worker.config());

    r.status.set_transport(Transport::Usb);
    for _ in 0..10 {
        events.dispatch(&Notification::EndpointChanged {
            transport: Transport::Usb,
        });
    }
    // Status moves on before the worker gets to run.
    r.status.set_transport(Transport::Ble);
    r.status.set_active_profile(ble(1, true, true));
    events.dispatch(&Notification::BleActiveProfileChanged { index: 1 });

    assert_eq!(r.worker.run_pending(&mut r.sink), Some(RequestKind::Connection));
    assert_eq!(r.worker.run_pending(&mut r.sink), None);
    assert_eq!(
        r.sink.started(),
        vec![Animation::ProfileSwitch(LedId::L1), Animation::BleConnected]
    );
    assert_eq!(r.scheduler.completed(RequestKind::Connection), 1);
}

// ── Non-preemption ────────────────────────────────────────────

#[test]
fn connection_request_waits_for_battery_run() {
    let mut r = rig_with(IndicatorConfig::default(), |sched| {
        let sched = Arc::clone(sched);
        let mut fired = false;
        RecordingDelay::with_hook(move || {
            if !fired {
                fired = true;
                sched.request(RequestKind::Connection);
            }
        })
    });
    r.status.set_state_of_charge(90);
    r.status.set_transport(Transport::Usb);
    r.scheduler.request(RequestKind::Battery);

    assert_eq!(r.worker.run_pending(&mut r.sink), Some(RequestKind::Battery));
    assert!(r.scheduler.is_pending(RequestKind::Connection));
    assert_eq!(r.sink.started(), vec![Animation::Battery(BatteryTier::High)]);
    // Three single-LED fills and one all-LED fade, nothing else.
    assert_eq!(r.leds.len(), (1 + 1 + 1 + 3) * 101);
    let l0 = r.leds.levels(LedId::L0);
    assert_eq!(l0.first(), Some(&0));
    assert_eq!(l0.last(), Some(&0));
    assert_eq!(l0.iter().max(), Some(&100));

    assert_eq!(r.worker.run_pending(&mut r.sink), Some(RequestKind::Connection));
    assert_eq!(
        r.sink.started(),
        vec![Animation::Battery(BatteryTier::High), Animation::UsbConnected]
    );
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn startup_waits_for_warmup_then_checks_battery_once() {
    let mut r = rig();
    r.status.set_state_of_charge(40);
    assert!(r.worker.start(&mut r.sink));
    assert_eq!(r.leds.len(), 3);
    r.leds.clear();

    r.clock.set(999);
    assert_eq!(r.worker.run_pending(&mut r.sink), None);
    assert_eq!(r.leds.len(), 0);

    r.clock.set(1000);
    assert_eq!(r.worker.run_pending(&mut r.sink), Some(RequestKind::Battery));
    assert_eq!(r.worker.run_pending(&mut r.sink), None);
    assert_eq!(r.scheduler.completed(RequestKind::Battery), 1);
    assert_eq!(r.sink.events()[0], IndicatorEvent::Started { warmup_ms: 1000 });
    assert_eq!(r.sink.started(), vec![Animation::Battery(BatteryTier::Low)]);
}

#[test]
fn disabled_indicator_stays_dark_at_startup() {
    let config = IndicatorConfig {
        enabled: false,
        ..IndicatorConfig::default()
    };
    let mut r = rig_with(config, |_| RecordingDelay::new());
    r.status.set_state_of_charge(50);

    assert!(!r.worker.start(&mut r.sink));
    assert_eq!(r.leds.len(), 0);
    assert!(r.sink.events().is_empty());

    r.clock.set(1000);
    assert_eq!(r.worker.run_pending(&mut r.sink), None);
    assert_eq!(r.leds.len(), 0);
    assert_eq!(r.scheduler.completed(RequestKind::Battery), 0);
    assert!(r.sink.started().is_empty());
}

#[test]
fn events_during_warmup_run_after_it() {
    let mut r = rig();
    r.worker.start(&mut r.sink);
    let events = EventAdapter::new(&r.scheduler, r.worker.config());

    r.clock.set(300);
    events.dispatch(&Notification::EndpointChanged {
        transport: Transport::Usb,
    });
    assert_eq!(r.worker.run_pending(&mut r.sink), None);

    r.clock.set(1000);
    assert_eq!(r.worker.run_pending(&mut r.sink), Some(RequestKind::Battery));
    assert_eq!(r.worker.run_pending(&mut r.sink), Some(RequestKind::Connection));
}

// ── Threaded ──────────────────────────────────────────────────

#[test]
fn worker_thread_runs_requests_and_stops_on_shutdown() {
    let config = IndicatorConfig {
        warmup_ms: 0,
        ..IndicatorConfig::default()
    };
    let r = rig_with(config, |_| RecordingDelay::new());
    let Rig {
        mut worker,
        leds,
        sink,
        status,
        scheduler,
        ..
    } = r;
    status.set_transport(Transport::Usb);
    status.set_state_of_charge(100);

    let mut thread_sink = sink.clone();
    worker.start(&mut thread_sink);
    let settings = WorkerSettings {
        stack_bytes: 256 * 1024,
        ..WorkerSettings::default()
    };
    let handle = spawn_animation_worker(&settings, "vfx-anim\0", move || {
        worker.run(&mut thread_sink);
    })
    .unwrap();

    scheduler.request(RequestKind::Connection);

    let deadline = Instant::now() + Duration::from_secs(5);
    while scheduler.completed(RequestKind::Connection) == 0
        || scheduler.completed(RequestKind::Battery) == 0
    {
        assert!(Instant::now() < deadline, "worker did not run both requests");
        std::thread::sleep(Duration::from_millis(5));
    }

    scheduler.shutdown();
    handle.join().unwrap();

    let started = sink.started();
    assert!(started.contains(&Animation::Battery(BatteryTier::High)));
    assert!(started.contains(&Animation::UsbConnected));
    // Worker blanks every LED on the way out.
    let tail: Vec<u8> = leds.writes().iter().rev().take(3).map(|w| w.level).collect();
    assert_eq!(tail, vec![0, 0, 0]);
}
