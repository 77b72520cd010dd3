//! Platform helpers.

pub mod task_pin;
