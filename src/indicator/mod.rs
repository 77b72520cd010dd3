//! Indicator core: LED model, ramp sequencer, animation catalogue and
//! selection logic.  No threads, no clocks: everything here runs on the
//! caller's context.

pub mod catalogue;
pub mod led;
pub mod selector;
pub mod sequencer;

pub use catalogue::{Animation, BatteryTier};
pub use led::{Brightness, LED_COUNT, LedId, LedMask};
pub use selector::Playlist;
pub use sequencer::{Direction, RampReport, RampStep, StepSequencer};
