//! Manual trigger: the key-binding surface.
//!
//! A keymap binding carries a [`CheckRequest`].  Pressing the key replays
//! the flagged status animations; releasing it does nothing.  Both report
//! the key event as consumed.

use std::sync::Arc;

use log::debug;

use crate::app::commands::CheckRequest;
use crate::app::ports::Clock;
use crate::config::IndicatorConfig;
use crate::scheduler::Scheduler;

/// Outcome reported back to the keymap engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingOutcome {
    /// The key event was consumed; no keycode is emitted.
    Opaque,
}

/// Behaviour driver for the indicator key binding.
pub struct IndicatorBehavior<C> {
    scheduler: Arc<Scheduler<C>>,
    enabled: bool,
}

impl<C: Clock> IndicatorBehavior<C> {
    pub fn new(scheduler: Arc<Scheduler<C>>, config: &IndicatorConfig) -> Self {
        Self {
            scheduler,
            enabled: config.enabled,
        }
    }

    /// Request every flagged check to run as soon as the worker is free.
    pub fn on_pressed(&self, binding: CheckRequest) -> BindingOutcome {
        if !self.enabled {
            debug!("Trigger: indicator disabled, ignoring press");
            return BindingOutcome::Opaque;
        }
        for kind in binding.kinds() {
            self.scheduler.request(kind);
        }
        BindingOutcome::Opaque
    }

    pub fn on_released(&self, _binding: CheckRequest) -> BindingOutcome {
        BindingOutcome::Opaque
    }
}
