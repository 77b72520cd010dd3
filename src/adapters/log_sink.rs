//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing indicator events to the logger
//! (UART / USB-CDC on the keyboard).

use log::info;

use crate::app::events::IndicatorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`IndicatorEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &IndicatorEvent) {
        match event {
            IndicatorEvent::Started { warmup_ms } => {
                info!("START | battery check in {}ms", warmup_ms);
            }
            IndicatorEvent::AnimationStarted { request, animation } => {
                info!(
                    "ANIM  | {:?} -> {:?} ({}ms)",
                    request,
                    animation,
                    animation.duration_ms()
                );
            }
            IndicatorEvent::AnimationFinished {
                request,
                animation,
                report,
            } => {
                info!(
                    "ANIM  | {:?} done {:?} | steps={} writes={} failed={}",
                    request, animation, report.steps, report.writes, report.failed_writes,
                );
            }
            IndicatorEvent::Skipped { request, reason } => {
                info!("SKIP  | {:?}: {:?}", request, reason);
            }
        }
    }
}
