//! Unified error types for the indicator engine.
//!
//! The taxonomy is deliberately small: LED driver failures never leave the
//! step sequencer (they are logged and counted), and configuration errors
//! are only raised while the engine is being assembled.  All variants are
//! `Copy` so they can be carried through reports without allocation.

use core::fmt;

use embedded_hal::pwm::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An LED brightness write failed.
    Led(LedError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
    /// The animation worker thread could not be started.
    WorkerSpawn,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Led(e) => write!(f, "led: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::WorkerSpawn => write!(f, "animation worker spawn failed"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// LED errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    /// The PWM peripheral rejected the duty-cycle update.
    Pwm(ErrorKind),
    /// The logical LED maps to a hardware channel that does not exist.
    Channel(u8),
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pwm(kind) => write!(f, "PWM write failed ({kind:?})"),
            Self::Channel(ch) => write!(f, "no hardware channel {ch}"),
        }
    }
}

impl From<LedError> for Error {
    fn from(e: LedError) -> Self {
        Self::Led(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// The override blob is not valid JSON for [`IndicatorConfig`](crate::config::IndicatorConfig).
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::Parse => write!(f, "malformed configuration"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
