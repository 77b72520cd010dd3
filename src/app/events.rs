//! Outbound indicator events.
//!
//! The [`AnimationWorker`](super::service::AnimationWorker) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them; the firmware just logs.

use crate::indicator::{Animation, RampReport};
use crate::scheduler::RequestKind;

/// Structured events emitted by the animation worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorEvent {
    /// The indicator started; the battery check fires after `warmup_ms`.
    Started { warmup_ms: u32 },

    /// An animation is about to play.
    AnimationStarted {
        request: RequestKind,
        animation: Animation,
    },

    /// An animation ran to completion.
    AnimationFinished {
        request: RequestKind,
        animation: Animation,
        report: RampReport,
    },

    /// A request ran but had nothing to play.
    Skipped {
        request: RequestKind,
        reason: SkipReason,
    },
}

/// Why a request produced no animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// State of charge above 100.
    UnrecognisedCharge(u8),
    /// BLE transport active but BLE support disabled.
    BleDisabled,
}
