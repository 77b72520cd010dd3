//! Animation worker thread spawning.
//!
//! Wraps `esp_pthread_set_cfg()` so that `std::thread::Builder::spawn`
//! creates a FreeRTOS task with explicit priority and stack size.  On
//! non-ESP targets, falls back to a plain thread with the requested stack.
//!
//! # ESP-IDF Threading Model
//!
//! ESP-IDF implements `std::thread` via pthreads, which are thin wrappers
//! around FreeRTOS tasks.  `esp_pthread_set_cfg()` sets thread-local
//! configuration that applies to the *next* `pthread_create()` call from
//! the calling thread, so the config→spawn pair must not be interleaved
//! with other thread creation on the same thread.

use std::io;
use std::thread::JoinHandle;

use crate::config::WorkerSettings;

/// Spawn the worker with the configured priority and stack.
///
/// `name` must be null-terminated (e.g. `"vfx-anim\0"`).
#[cfg(target_os = "espidf")]
pub fn spawn_animation_worker(
    settings: &WorkerSettings,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    let ret = unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.prio = i32::from(settings.priority);
        cfg.stack_size = settings.stack_bytes as _;
        cfg.thread_name = name.as_ptr() as *const _;
        esp_idf_sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_sys::ESP_OK as i32 {
        return Err(io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
    }

    let display_name = name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (pri={}, stack={}B)",
        display_name,
        settings.priority,
        settings.stack_bytes
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(settings.stack_bytes)
        .spawn(f)
}

/// Simulation fallback; ignores priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_animation_worker(
    settings: &WorkerSettings,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    let display_name = name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (sim, stack={}B)",
        display_name,
        settings.stack_bytes
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(settings.stack_bytes)
        .spawn(f)
}
