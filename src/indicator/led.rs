//! Logical LED identifiers, masks and brightness levels.
//!
//! The indicator drives exactly three LEDs.  Identity is positional: LED 0
//! is the leftmost indicator, LED 2 the rightmost.  A [`LedMask`] selects
//! the subset of LEDs that move together during a ramp.

use core::fmt;

/// Number of indicator LEDs.
pub const LED_COUNT: usize = 3;

/// Full-scale brightness in percent.
pub const LED_BRIGHTNESS_MAX: u8 = 100;

// ── LedId ─────────────────────────────────────────────────────

/// One of the three indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LedId {
    L0 = 0,
    L1 = 1,
    L2 = 2,
}

impl LedId {
    pub const ALL: [LedId; LED_COUNT] = [LedId::L0, LedId::L1, LedId::L2];

    /// Map a raw index onto an LED, `None` when outside the LED set.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::L0),
            1 => Some(Self::L1),
            2 => Some(Self::L2),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for LedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "led{}", *self as u8)
    }
}

// ── LedMask ───────────────────────────────────────────────────

/// Non-empty subset of the LED set.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedMask(u8);

/// Raw bits rejected by [`LedMask::from_bits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskError {
    Empty,
    OutOfRange(u8),
}

impl LedMask {
    const VALID: u8 = (1 << LED_COUNT) - 1;

    pub const ALL: LedMask = LedMask(Self::VALID);

    pub const fn single(led: LedId) -> Self {
        Self(led.bit())
    }

    pub const fn from_bits(bits: u8) -> Result<Self, MaskError> {
        if bits == 0 {
            Err(MaskError::Empty)
        } else if bits & !Self::VALID != 0 {
            Err(MaskError::OutOfRange(bits))
        } else {
            Ok(Self(bits))
        }
    }

    pub const fn with(self, led: LedId) -> Self {
        Self(self.0 | led.bit())
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, led: LedId) -> bool {
        self.0 & led.bit() != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Member LEDs in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = LedId> {
        LedId::ALL.into_iter().filter(move |&led| self.contains(led))
    }
}

impl fmt::Debug for LedMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedMask(0b{:03b})", self.0)
    }
}

impl From<LedId> for LedMask {
    fn from(led: LedId) -> Self {
        Self::single(led)
    }
}

// ── Brightness ────────────────────────────────────────────────

/// Brightness in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Brightness(u8);

impl Brightness {
    pub const OFF: Brightness = Brightness(0);
    pub const FULL: Brightness = Brightness(LED_BRIGHTNESS_MAX);

    /// Clamp `percent` into range.
    pub const fn new(percent: u8) -> Self {
        if percent > LED_BRIGHTNESS_MAX {
            Self(LED_BRIGHTNESS_MAX)
        } else {
            Self(percent)
        }
    }

    pub const fn percent(self) -> u8 {
        self.0
    }
}
