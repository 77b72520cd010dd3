//! Animation worker: the hexagonal core.
//!
//! [`AnimationWorker`] owns the step sequencer and the status port.  It is
//! the only LED writer: it claims due requests from the shared
//! [`Scheduler`], captures status at that moment, picks the animation and
//! plays it to completion.
//!
//! ```text
//!  StatusPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │    AnimationWorker     │
//!   Scheduler ──▶ │ Selector · Sequencer   │ ──▶ LedPort
//!                 └────────────────────────┘
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::IndicatorConfig;
use crate::indicator::selector::{battery_animation, connection_playlist};
use crate::indicator::{Animation, StepSequencer};
use crate::scheduler::{RequestKind, Scheduler};

use super::events::{IndicatorEvent, SkipReason};
use super::ports::{Clock, EventSink, LedPort, StatusPort};

/// The animation worker.
pub struct AnimationWorker<L, D, S, C> {
    sequencer: StepSequencer<L, D>,
    status: S,
    scheduler: Arc<Scheduler<C>>,
    config: IndicatorConfig,
}

impl<L, D, S, C> AnimationWorker<L, D, S, C>
where
    L: LedPort,
    D: DelayNs,
    S: StatusPort,
    C: Clock,
{
    pub fn new(
        leds: L,
        delay: D,
        status: S,
        scheduler: Arc<Scheduler<C>>,
        config: IndicatorConfig,
    ) -> Self {
        Self {
            sequencer: StepSequencer::new(leds, delay),
            status,
            scheduler,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Blank the LEDs and arm the start-up battery check.
    ///
    /// Returns `false` if the indicator is disabled or the scheduler was
    /// already started.  A disabled indicator never touches the LEDs.
    pub fn start(&mut self, sink: &mut impl EventSink) -> bool {
        if !self.config.enabled {
            info!("AnimationWorker: indicator disabled, not starting");
            return false;
        }
        if !self.scheduler.start(self.config.warmup_ms) {
            return false;
        }
        self.sequencer.all_off();
        sink.emit(&IndicatorEvent::Started {
            warmup_ms: self.config.warmup_ms,
        });
        true
    }

    /// Worker loop.  Parks between requests, exits after shutdown.
    pub fn run(&mut self, sink: &mut impl EventSink) {
        self.scheduler.attach_worker(thread::current());
        info!("AnimationWorker running");

        while !self.scheduler.is_shutdown() {
            if self.run_pending(sink).is_some() {
                continue;
            }
            match self.scheduler.until_next_due() {
                Some(0) => {}
                Some(ms) => thread::park_timeout(Duration::from_millis(u64::from(ms))),
                None => thread::park(),
            }
        }

        self.sequencer.all_off();
        info!("AnimationWorker stopped");
    }

    // ── Per-request execution ─────────────────────────────────

    /// Run at most one due request to completion.
    pub fn run_pending(&mut self, sink: &mut impl EventSink) -> Option<RequestKind> {
        let kind = self.scheduler.take_due()?;
        debug!("AnimationWorker: running {:?}", kind);

        match kind {
            RequestKind::Battery => self.battery_check(sink),
            RequestKind::Connection => self.connection_check(sink),
        }

        self.scheduler.finish(kind);
        Some(kind)
    }

    fn battery_check(&mut self, sink: &mut impl EventSink) {
        let charge = self.status.battery_state_of_charge();
        match battery_animation(charge, &self.config.battery) {
            Some(animation) => self.play(RequestKind::Battery, animation, sink),
            None => sink.emit(&IndicatorEvent::Skipped {
                request: RequestKind::Battery,
                reason: SkipReason::UnrecognisedCharge(charge),
            }),
        }
    }

    fn connection_check(&mut self, sink: &mut impl EventSink) {
        let status = self.status.connection();
        let playlist = connection_playlist(&status, self.config.ble_enabled);
        if playlist.is_empty() {
            sink.emit(&IndicatorEvent::Skipped {
                request: RequestKind::Connection,
                reason: SkipReason::BleDisabled,
            });
            return;
        }
        for animation in playlist {
            self.play(RequestKind::Connection, animation, sink);
        }
    }

    fn play(&mut self, request: RequestKind, animation: Animation, sink: &mut impl EventSink) {
        sink.emit(&IndicatorEvent::AnimationStarted { request, animation });
        let report = self.sequencer.play(animation.steps());
        sink.emit(&IndicatorEvent::AnimationFinished {
            request,
            animation,
            report,
        });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn scheduler(&self) -> &Arc<Scheduler<C>> {
        &self.scheduler
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn leds(&self) -> &L {
        self.sequencer.leds()
    }
}
