//! VFX Indicator Firmware, Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PwmLedBank     SharedStatus    MonotonicClock   LogEventSink  │
//! │  (LedPort)      (StatusPort)    (Clock)          (EventSink)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          AnimationWorker (dedicated thread)            │    │
//! │  │  Selector · Catalogue · StepSequencer                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (atomic slots) ◀── EventAdapter · IndicatorBehavior │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use log::{info, warn};

use vfx_indicator::Error;
use vfx_indicator::adapters::led_bank::PwmLedBank;
use vfx_indicator::adapters::log_sink::LogEventSink;
use vfx_indicator::adapters::status::SharedStatus;
use vfx_indicator::adapters::time::MonotonicClock;
use vfx_indicator::app::commands::CheckRequest;
use vfx_indicator::app::service::AnimationWorker;
use vfx_indicator::config::IndicatorConfig;
use vfx_indicator::drivers::task_pin::spawn_animation_worker;
use vfx_indicator::events::{EventAdapter, Notification};
use vfx_indicator::scheduler::Scheduler;
use vfx_indicator::status::Transport;
use vfx_indicator::trigger::IndicatorBehavior;

/// Battery and endpoint state, written by the host firmware.
static STATUS: SharedStatus = SharedStatus::new();

/// Check-button poll period.
const BUTTON_POLL_MS: u32 = 20;

fn load_config() -> IndicatorConfig {
    match option_env!("VFX_INDICATOR_CONFIG") {
        Some(json) => match IndicatorConfig::from_json(json) {
            Ok(config) => {
                info!("Config: build-time override applied");
                config
            }
            Err(e) => {
                warn!("Config: override rejected ({}), using defaults", e);
                IndicatorConfig::default()
            }
        },
        None => IndicatorConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("VFX indicator v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config();

    // ── 2. LED channels ───────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default().frequency(5.kHz().into()),
    )?;
    // Channels borrow the timer for the lifetime of the worker thread.
    let timer: &'static LedcTimerDriver<'static, _> = Box::leak(Box::new(timer));
    let channels = [
        LedcDriver::new(peripherals.ledc.channel0, timer, peripherals.pins.gpio4)?,
        LedcDriver::new(peripherals.ledc.channel1, timer, peripherals.pins.gpio5)?,
        LedcDriver::new(peripherals.ledc.channel2, timer, peripherals.pins.gpio6)?,
    ];
    let leds = PwmLedBank::new(channels, config.led_channels).map_err(Error::from)?;

    // ── 3. Scheduler and worker ───────────────────────────────
    let scheduler = Arc::new(Scheduler::new(MonotonicClock::new()));
    let mut worker = AnimationWorker::new(
        leds,
        FreeRtos,
        &STATUS,
        Arc::clone(&scheduler),
        config.clone(),
    );
    let mut sink = LogEventSink::new();
    worker.start(&mut sink);

    spawn_animation_worker(&config.worker, "vfx-anim\0", move || worker.run(&mut sink))
        .map_err(|e| {
            log::error!("Worker spawn failed: {}", e);
            Error::WorkerSpawn
        })?;

    // ── 4. Inputs ─────────────────────────────────────────────
    let events = EventAdapter::new(&scheduler, &config);
    let behavior = IndicatorBehavior::new(Arc::clone(&scheduler), &config);

    // Stand-in until the host firmware feeds `STATUS` and `events` from its
    // battery and endpoint notifications.
    STATUS.set_state_of_charge(100);
    STATUS.set_transport(Transport::Usb);
    events.dispatch(&Notification::EndpointChanged {
        transport: Transport::Usb,
    });

    let mut button = PinDriver::input(peripherals.pins.gpio0)?;
    button.set_pull(Pull::Up)?;

    info!("System ready. Polling check button.");

    // ── 5. Button loop ────────────────────────────────────────
    let mut was_pressed = false;
    loop {
        let pressed = button.is_low();
        if pressed && !was_pressed {
            behavior.on_pressed(CheckRequest::BOTH);
        } else if !pressed && was_pressed {
            behavior.on_released(CheckRequest::BOTH);
        }
        was_pressed = pressed;
        FreeRtos::delay_ms(BUTTON_POLL_MS);
    }
}
