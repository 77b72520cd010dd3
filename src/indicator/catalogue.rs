//! The fixed animation catalogue.
//!
//! Every animation is a static table of [`RampStep`]s.  Nothing here is
//! built at runtime; the worker only picks a table and hands it to the
//! [`StepSequencer`](super::sequencer::StepSequencer).
//!
//! | Animation                | Shape                                        |
//! |--------------------------|----------------------------------------------|
//! | USB connected            | outer pair, centre, outer pair (with snaps)  |
//! | BLE connected            | all three fade in 1 s, out 200 ms            |
//! | BLE bonded, disconnected | centre fades in 1 s, out 200 ms              |
//! | BLE open (pairing)       | left-to-right chase, three times             |
//! | Unknown transport        | fill left-to-right, drain right-to-left      |
//! | Battery high/mid/low     | fill 3/2/1 LEDs, fade out                    |
//! | Battery critical         | three fast full blinks                       |
//! | Profile switch           | the profile's LED pulses once                |

use super::led::{LED_COUNT, LedId, LedMask};
use super::sequencer::RampStep;

/// Battery tier, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryTier {
    High,
    Mid,
    Low,
    Critical,
}

/// Every animation the indicator can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    UsbConnected,
    BleConnected,
    BleBondedDisconnected,
    BleOpen,
    UnknownTransport,
    Battery(BatteryTier),
    ProfileSwitch(LedId),
}

impl Animation {
    /// The static step table for this animation.
    pub fn steps(self) -> &'static [RampStep] {
        match self {
            Self::UsbConnected => &USB_CONNECTED,
            Self::BleConnected => &BLE_CONNECTED,
            Self::BleBondedDisconnected => &BLE_BONDED_DISCONNECTED,
            Self::BleOpen => &BLE_OPEN,
            Self::UnknownTransport => &UNKNOWN_TRANSPORT,
            Self::Battery(BatteryTier::High) => &BATTERY_HIGH,
            Self::Battery(BatteryTier::Mid) => &BATTERY_MID,
            Self::Battery(BatteryTier::Low) => &BATTERY_LOW,
            Self::Battery(BatteryTier::Critical) => &BATTERY_CRITICAL,
            Self::ProfileSwitch(led) => &PROFILE_SWITCH[led.index()],
        }
    }

    /// Total blocking time in milliseconds.
    pub fn duration_ms(self) -> u32 {
        self.steps().iter().map(RampStep::blocking_ms).sum()
    }
}

// ── Masks ─────────────────────────────────────────────────────

const L0: LedMask = LedMask::single(LedId::L0);
const L1: LedMask = LedMask::single(LedId::L1);
const L2: LedMask = LedMask::single(LedId::L2);
const OUTER: LedMask = L0.with(LedId::L2);
const LOWER_PAIR: LedMask = L0.with(LedId::L1);
const ALL: LedMask = LedMask::ALL;

const fn up(mask: LedMask, ms: u16) -> RampStep {
    RampStep::up(mask, ms)
}

const fn down(mask: LedMask, ms: u16) -> RampStep {
    RampStep::down(mask, ms)
}

// ── Connection ────────────────────────────────────────────────

static USB_CONNECTED: [RampStep; 6] = [
    up(OUTER, 300),
    down(OUTER, 0),
    up(L1, 400),
    down(L1, 0),
    up(OUTER, 300),
    down(OUTER, 0),
];

static BLE_CONNECTED: [RampStep; 2] = [up(ALL, 1000), down(ALL, 200)];

static BLE_BONDED_DISCONNECTED: [RampStep; 2] = [up(L1, 1000), down(L1, 200)];

static BLE_OPEN: [RampStep; 12] = [
    up(L0, 100),
    up(L1, 100),
    up(L2, 100),
    down(ALL, 100),
    up(L0, 100),
    up(L1, 100),
    up(L2, 100),
    down(ALL, 100),
    up(L0, 100),
    up(L1, 100),
    up(L2, 100),
    down(ALL, 100),
];

static UNKNOWN_TRANSPORT: [RampStep; 6] = [
    up(L0, 160),
    up(L1, 160),
    up(L2, 160),
    down(L2, 160),
    down(L1, 160),
    down(L0, 160),
];

// ── Battery ───────────────────────────────────────────────────

static BATTERY_HIGH: [RampStep; 4] = [up(L0, 330), up(L1, 330), up(L2, 330), down(ALL, 400)];

static BATTERY_MID: [RampStep; 3] = [up(L0, 400), up(L1, 400), down(LOWER_PAIR, 400)];

static BATTERY_LOW: [RampStep; 2] = [up(L0, 400), down(L0, 400)];

static BATTERY_CRITICAL: [RampStep; 6] = [
    up(ALL, 160),
    down(ALL, 160),
    up(ALL, 160),
    down(ALL, 160),
    up(ALL, 160),
    down(ALL, 160),
];

// ── Profile ───────────────────────────────────────────────────

static PROFILE_SWITCH: [[RampStep; 2]; LED_COUNT] = [
    [up(L0, 500), down(L0, 500)],
    [up(L1, 500), down(L1, 500)],
    [up(L2, 500), down(L2, 500)],
];
