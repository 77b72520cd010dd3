//! Time adapters.
//!
//! - [`MonotonicClock`] implements [`Clock`]:
//!   - **`target_os = "espidf"`** wraps `esp_timer_get_time()` from the
//!     ESP-IDF high-resolution timer.
//!   - **`not(target_os = "espidf")`** uses `std::time::Instant` for
//!     host-side testing and simulation.
//! - [`ManualClock`] is advanced explicitly; simulations and tests use it.
//!
//! All clocks report milliseconds truncated to `u32`; consumers compare
//! with `wrapping_sub`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::app::ports::Clock;

/// Milliseconds since boot.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u32 {
        ((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1000) as u32
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

/// Clock that only moves when told to.  Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU32>);

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self(Arc::new(AtomicU32::new(start_ms)))
    }

    pub fn set(&self, ms: u32) {
        self.0.store(ms, Ordering::Release);
    }

    pub fn advance(&self, ms: u32) {
        self.0.fetch_add(ms, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }
}
