//! Brightness ramp primitive.
//!
//! Every ramp walks the full 0..=100 percent range in 101 steps, whatever
//! its duration.  Each step writes every LED in scope and then blocks for
//! `duration_ms / 100` (integer division).  A zero duration therefore
//! still performs 101 writes per LED, just without delay.  The catalogue
//! uses that as a "snap off" between phases; it is wasteful but kept so
//! the PWM sees the same write pattern as the stock firmware.  Unlike the
//! stock firmware, a zero step delay is skipped entirely rather than
//! issued as a zero-length sleep, so snaps do not yield the CPU.
//!
//! The sequencer is the only place in the crate that blocks.

use core::ops::AddAssign;

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::ports::LedPort;

use super::led::{Brightness, LED_BRIGHTNESS_MAX, LedId, LedMask};

/// Number of brightness values visited by one ramp.
pub const STEPS_PER_RAMP: u32 = LED_BRIGHTNESS_MAX as u32 + 1;

/// Ramp direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 0 → 100.
    Up,
    /// 100 → 0.
    Down,
}

impl Direction {
    /// Brightness for step `step` of 0..=100.
    const fn level(self, step: u8) -> Brightness {
        match self {
            Self::Up => Brightness::new(step),
            Self::Down => Brightness::new(LED_BRIGHTNESS_MAX - step),
        }
    }
}

/// One phase of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampStep {
    pub mask: LedMask,
    pub direction: Direction,
    pub duration_ms: u16,
}

impl RampStep {
    pub const fn up(mask: LedMask, duration_ms: u16) -> Self {
        Self {
            mask,
            direction: Direction::Up,
            duration_ms,
        }
    }

    pub const fn down(mask: LedMask, duration_ms: u16) -> Self {
        Self {
            mask,
            direction: Direction::Down,
            duration_ms,
        }
    }

    /// Blocking time of this phase.
    pub const fn blocking_ms(&self) -> u32 {
        (self.duration_ms / LED_BRIGHTNESS_MAX as u16) as u32 * STEPS_PER_RAMP
    }
}

/// What a ramp (or a whole animation) actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RampReport {
    /// Brightness steps executed.
    pub steps: u32,
    /// Successful LED writes.
    pub writes: u32,
    /// LED writes rejected by the driver.
    pub failed_writes: u32,
}

impl AddAssign for RampReport {
    fn add_assign(&mut self, rhs: Self) {
        self.steps += rhs.steps;
        self.writes += rhs.writes;
        self.failed_writes += rhs.failed_writes;
    }
}

/// Drives ramps on an [`LedPort`], sleeping through a [`DelayNs`].
pub struct StepSequencer<L, D> {
    leds: L,
    delay: D,
}

impl<L: LedPort, D: DelayNs> StepSequencer<L, D> {
    pub fn new(leds: L, delay: D) -> Self {
        Self { leds, delay }
    }

    /// Ramp a single LED.
    pub fn ramp_single(&mut self, led: LedId, direction: Direction, duration_ms: u16) -> RampReport {
        self.ramp_masked(LedMask::single(led), direction, duration_ms)
    }

    /// Ramp every LED in `mask` in lock-step.
    pub fn ramp_masked(&mut self, mask: LedMask, direction: Direction, duration_ms: u16) -> RampReport {
        let step_ms = u32::from(duration_ms / u16::from(LED_BRIGHTNESS_MAX));
        let mut report = RampReport::default();

        for step in 0..=LED_BRIGHTNESS_MAX {
            let level = direction.level(step);
            for led in mask.iter() {
                match self.leds.set_brightness(led, level) {
                    Ok(()) => report.writes += 1,
                    Err(e) => {
                        report.failed_writes += 1;
                        warn!("Sequencer: {} <- {}% failed: {}", led, level.percent(), e);
                    }
                }
            }
            report.steps += 1;
            if step_ms > 0 {
                self.delay.delay_ms(step_ms);
            }
        }
        report
    }

    /// Run a sequence of phases in order.
    pub fn play(&mut self, steps: &[RampStep]) -> RampReport {
        let mut total = RampReport::default();
        for step in steps {
            total += self.ramp_masked(step.mask, step.direction, step.duration_ms);
        }
        total
    }

    /// Force every LED off immediately.
    pub fn all_off(&mut self) {
        for led in LedId::ALL {
            if let Err(e) = self.leds.set_brightness(led, Brightness::OFF) {
                warn!("Sequencer: {} off failed: {}", led, e);
            }
        }
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn into_parts(self) -> (L, D) {
        (self.leds, self.delay)
    }
}
