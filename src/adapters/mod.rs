//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                    |
//! |------------|--------------------|--------------------------------|
//! | `led_bank` | LedPort            | PWM channels (LEDC on ESP32)   |
//! | `log_sink` | EventSink          | Serial log output              |
//! | `status`   | StatusPort         | Host battery / endpoint state  |
//! | `time`     | Clock              | ESP32 system timer, FreeRTOS   |

pub mod led_bank;
pub mod log_sink;
pub mod status;
pub mod time;
