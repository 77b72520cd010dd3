//! Indicator configuration parameters
//!
//! All tunable values for the indicator engine.  Defaults match the stock
//! keyboard build; a JSON override can be applied at start-up.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::indicator::led::LED_COUNT;

/// Core indicator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Master switch: start-up check, listeners and the manual trigger.
    pub enabled: bool,
    /// Whether the BLE branch of the connection animation is available.
    pub ble_enabled: bool,
    /// Battery tier boundaries.
    pub battery: BatteryThresholds,
    /// Delay before the start-up battery check (milliseconds).
    pub warmup_ms: u32,
    /// Hardware channel index for each logical LED.
    pub led_channels: [u8; LED_COUNT],
    /// Animation worker thread parameters.
    pub worker: WorkerSettings,
}

/// Battery state-of-charge tier boundaries (percent).
///
/// High is `> high`, Mid is `> mid`, Low is `> critical`, Critical is
/// everything at or below `critical`.  The battery listener only animates
/// inside `(0, critical]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryThresholds {
    pub high: u8,
    pub mid: u8,
    pub critical: u8,
}

/// Parameters for the dedicated animation thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSettings {
    /// RTOS priority (ignored on the host).
    pub priority: u8,
    /// Thread stack size in bytes.
    pub stack_bytes: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ble_enabled: true,
            battery: BatteryThresholds::default(),
            warmup_ms: 1000,
            led_channels: [0, 1, 2],
            worker: WorkerSettings::default(),
        }
    }
}

impl Default for BatteryThresholds {
    fn default() -> Self {
        Self {
            high: 80,
            mid: 50,
            critical: 20,
        }
    }
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            priority: 5,
            stack_bytes: 4096,
        }
    }
}

impl IndicatorConfig {
    /// Parse a JSON override and validate it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.battery.validate()?;

        let mut seen = [false; LED_COUNT];
        for &ch in &self.led_channels {
            let slot = seen
                .get_mut(ch as usize)
                .ok_or(ConfigError::ValidationFailed("led_channels entry out of range"))?;
            if *slot {
                return Err(ConfigError::ValidationFailed("led_channels entries must be distinct"));
            }
            *slot = true;
        }

        if self.worker.stack_bytes < 1024 {
            return Err(ConfigError::ValidationFailed("worker.stack_bytes below 1024"));
        }
        Ok(())
    }
}

impl BatteryThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.high > 100 {
            return Err(ConfigError::ValidationFailed("battery.high above 100"));
        }
        if self.high <= self.mid {
            return Err(ConfigError::ValidationFailed("battery.high must exceed battery.mid"));
        }
        if self.mid <= self.critical {
            return Err(ConfigError::ValidationFailed("battery.mid must exceed battery.critical"));
        }
        if self.critical == 0 {
            return Err(ConfigError::ValidationFailed("battery.critical must be non-zero"));
        }
        Ok(())
    }
}
