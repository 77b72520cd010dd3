//! Request scheduler for the animation worker.
//!
//! Two request slots, one per [`RequestKind`].  Producers (notification
//! listeners, the manual trigger) arm a slot; the single animation worker
//! claims due slots one at a time and runs them to completion.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Request Sources                          │
//! │                                                              │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────┐  ┌─────────┐ │
//! │  │ Endpoint / │  │ Battery    │  │ Manual     │  │ Start-up│ │
//! │  │ Profile    │  │ (critical) │  │ trigger    │  │ warm-up │ │
//! │  └─────┬──────┘  └─────┬──────┘  └─────┬──────┘  └────┬────┘ │
//! │        │               │               │              │      │
//! │        ▼               ▼               ▼              ▼      │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │   Scheduler: [battery slot] [connection slot] (atomic) │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          │ unpark                            │
//! │                          ▼                                   │
//! │                  AnimationWorker.run_pending()               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arming an already-pending slot replaces its fire time instead of
//! queueing a second run, so a burst of notifications collapses into one
//! animation.  A slot re-armed while its animation is running stays
//! pending and runs again afterwards; nothing is cancelled and no request
//! is lost.  All producer-side state is atomic; the worker is the only
//! consumer.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};
use std::sync::OnceLock;
use std::thread::Thread;

use log::{debug, info};

use crate::app::ports::Clock;

// ═══════════════════════════════════════════════════════════════
//  Request types
// ═══════════════════════════════════════════════════════════════

/// Which animation family a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestKind {
    Battery = 0,
    Connection = 1,
}

impl RequestKind {
    pub const ALL: [RequestKind; 2] = [RequestKind::Battery, RequestKind::Connection];

    const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Battery),
            1 => Some(Self::Connection),
            _ => None,
        }
    }
}

/// Observable lifecycle of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
    Running,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

const NOT_RUNNING: u8 = u8::MAX;

/// Per-kind bookkeeping.
#[derive(Default)]
struct Slot {
    pending: AtomicBool,
    /// Earliest time the request may run (wrapping ms).
    fire_at_ms: AtomicU32,
    /// Arming order; lower runs first when several slots are due.
    ticket: AtomicU32,
    /// Runs finished since boot.
    completed: AtomicU32,
}

/// Owner of the two request slots and the worker's wake handle.
pub struct Scheduler<C> {
    clock: C,
    slots: [Slot; 2],
    next_ticket: AtomicU32,
    running: AtomicU8,
    /// Nothing runs before this time while `holding` is set.
    hold_until_ms: AtomicU32,
    holding: AtomicBool,
    started: AtomicBool,
    shutdown: AtomicBool,
    worker: OnceLock<Thread>,
}

/// `true` once `now` has reached `deadline` on the wrapping timeline.
fn reached(now: u32, deadline: u32) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

/// Milliseconds left until `deadline`, zero if already reached.
fn remaining(now: u32, deadline: u32) -> u32 {
    if reached(now, deadline) {
        0
    } else {
        deadline.wrapping_sub(now)
    }
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            slots: [Slot::default(), Slot::default()],
            next_ticket: AtomicU32::new(0),
            running: AtomicU8::new(NOT_RUNNING),
            hold_until_ms: AtomicU32::new(0),
            holding: AtomicBool::new(false),
            started: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
            worker: OnceLock::new(),
        }
    }

    fn slot(&self, kind: RequestKind) -> &Slot {
        &self.slots[kind as usize]
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Arm the start-up battery check and hold all runs for `warmup_ms`.
    ///
    /// Only the first call has any effect.  Returns whether it did.
    pub fn start(&self, warmup_ms: u32) -> bool {
        if self.started.swap(true, Ordering::AcqRel) {
            return false;
        }
        let now = self.clock.now_ms();
        self.hold_until_ms
            .store(now.wrapping_add(warmup_ms), Ordering::Release);
        self.holding.store(true, Ordering::Release);
        info!("Scheduler: battery check in {}ms", warmup_ms);
        self.request_after(RequestKind::Battery, warmup_ms);
        true
    }

    /// Register the thread to unpark when a request arrives.
    pub fn attach_worker(&self, thread: Thread) -> bool {
        self.worker.set(thread).is_ok()
    }

    /// Ask the worker loop to exit after its current animation.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.wake();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    // ── Producer side ─────────────────────────────────────────

    /// Arm `kind` to run as soon as the worker is free.
    pub fn request(&self, kind: RequestKind) -> bool {
        self.request_after(kind, 0)
    }

    /// Arm `kind` to run no earlier than `delay_ms` from now.
    ///
    /// If the slot is already pending its fire time is replaced (last
    /// writer wins).  Returns `true` when the request coalesced with a
    /// pending one.
    pub fn request_after(&self, kind: RequestKind, delay_ms: u32) -> bool {
        let slot = self.slot(kind);
        let fire_at = self.clock.now_ms().wrapping_add(delay_ms);
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);

        slot.fire_at_ms.store(fire_at, Ordering::Release);
        slot.ticket.store(ticket, Ordering::Release);
        let coalesced = slot.pending.swap(true, Ordering::AcqRel);

        debug!(
            "Scheduler: {:?} armed +{}ms{}",
            kind,
            delay_ms,
            if coalesced { " (coalesced)" } else { "" }
        );
        self.wake();
        coalesced
    }

    fn wake(&self) {
        if let Some(thread) = self.worker.get() {
            thread.unpark();
        }
    }

    // ── Worker side ───────────────────────────────────────────

    /// Claim the earliest-armed due request, clearing its pending flag.
    pub fn take_due(&self) -> Option<RequestKind> {
        let now = self.clock.now_ms();
        if self.holding.load(Ordering::Acquire) {
            if !reached(now, self.hold_until_ms.load(Ordering::Acquire)) {
                return None;
            }
            self.holding.store(false, Ordering::Release);
        }

        let mut best: Option<(RequestKind, u32)> = None;
        for kind in RequestKind::ALL {
            let slot = self.slot(kind);
            if !slot.pending.load(Ordering::Acquire)
                || !reached(now, slot.fire_at_ms.load(Ordering::Acquire))
            {
                continue;
            }
            let ticket = slot.ticket.load(Ordering::Acquire);
            let earlier = best.is_none_or(|(_, t)| (ticket.wrapping_sub(t) as i32) < 0);
            if earlier {
                best = Some((kind, ticket));
            }
        }

        let (kind, _) = best?;
        self.slot(kind)
            .pending
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.running.store(kind as u8, Ordering::Release);
        Some(kind)
    }

    /// Mark the claimed request as finished.
    pub fn finish(&self, kind: RequestKind) {
        self.running.store(NOT_RUNNING, Ordering::Release);
        self.slot(kind).completed.fetch_add(1, Ordering::AcqRel);
    }

    /// Time until the next pending request may run, `None` when idle.
    pub fn until_next_due(&self) -> Option<u32> {
        let now = self.clock.now_ms();
        let next = RequestKind::ALL
            .iter()
            .map(|&kind| self.slot(kind))
            .filter(|slot| slot.pending.load(Ordering::Acquire))
            .map(|slot| remaining(now, slot.fire_at_ms.load(Ordering::Acquire)))
            .min()?;

        if self.holding.load(Ordering::Acquire) {
            let hold = remaining(now, self.hold_until_ms.load(Ordering::Acquire));
            return Some(next.max(hold));
        }
        Some(next)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self, kind: RequestKind) -> RequestState {
        if self.running() == Some(kind) {
            RequestState::Running
        } else if self.is_pending(kind) {
            RequestState::Pending
        } else {
            RequestState::Idle
        }
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.slot(kind).pending.load(Ordering::Acquire)
    }

    pub fn running(&self) -> Option<RequestKind> {
        RequestKind::from_u8(self.running.load(Ordering::Acquire))
    }

    /// Number of finished runs of `kind` since boot.
    pub fn completed(&self, kind: RequestKind) -> u32 {
        self.slot(kind).completed.load(Ordering::Acquire)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
