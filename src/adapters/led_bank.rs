//! PWM LED bank adapter.
//!
//! Three PWM channels drive the indicator LEDs.  A channel map translates
//! each logical LED into a hardware channel, so boards that wire the LEDs
//! in a different order only change configuration.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the channels are `LedcDriver`s.
//! On host/test: any [`SetDutyCycle`] implementation, typically a recorder.

use embedded_hal::pwm::{Error as _, SetDutyCycle};

use crate::app::ports::LedPort;
use crate::error::LedError;
use crate::indicator::led::{Brightness, LED_COUNT, LedId};

pub struct PwmLedBank<P> {
    channels: [P; LED_COUNT],
    map: [u8; LED_COUNT],
    current: [Brightness; LED_COUNT],
}

impl<P: SetDutyCycle> PwmLedBank<P> {
    /// Build the bank.  Fails if `map` names a channel that does not exist.
    pub fn new(channels: [P; LED_COUNT], map: [u8; LED_COUNT]) -> Result<Self, LedError> {
        if let Some(&bad) = map.iter().find(|&&ch| usize::from(ch) >= LED_COUNT) {
            return Err(LedError::Channel(bad));
        }
        Ok(Self {
            channels,
            map,
            current: [Brightness::OFF; LED_COUNT],
        })
    }

    /// Last level successfully written to `led`.
    pub fn level(&self, led: LedId) -> Brightness {
        self.current[led.index()]
    }

    pub fn channel(&self, led: LedId) -> &P {
        &self.channels[usize::from(self.map[led.index()])]
    }

    pub fn into_channels(self) -> [P; LED_COUNT] {
        self.channels
    }
}

impl<P: SetDutyCycle> LedPort for PwmLedBank<P> {
    fn set_brightness(&mut self, led: LedId, level: Brightness) -> Result<(), LedError> {
        let ch = self.map[led.index()];
        let pwm = self
            .channels
            .get_mut(usize::from(ch))
            .ok_or(LedError::Channel(ch))?;
        pwm.set_duty_cycle_percent(level.percent())
            .map_err(|e| LedError::Pwm(e.kind()))?;
        self.current[led.index()] = level;
        Ok(())
    }
}
