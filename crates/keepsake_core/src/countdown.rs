//! Live time-together ticker.
//!
//! # Responsibility
//! - Re-sample the effective clock once per second and push a fresh
//!   [`Elapsed`] breakdown to the owning view.
//! - Guarantee the sampling thread stops with its owner (no leaked
//!   timers).
//!
//! # Invariants
//! - `stop()` is idempotent; dropping the ticker stops it.
//! - Each tick recomputes from the clock; nothing is cached across ticks.

use crate::clock::Clock;
use crate::events::{time_together, Elapsed};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Cancellable one-second ticker driving the home-screen countdown.
pub struct CountdownTicker {
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    /// Starts ticking immediately; the callback receives one [`Elapsed`]
    /// per second, computed from the provided clock.
    pub fn start<C, F>(clock: C, mut on_tick: F) -> Self
    where
        C: Clock + Send + 'static,
        F: FnMut(Elapsed) + Send + 'static,
    {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_flag = Arc::clone(&stop_flag);

        let handle = std::thread::spawn(move || {
            debug!("event=countdown_start module=countdown status=ok");
            while !thread_flag.load(Ordering::Relaxed) {
                on_tick(time_together(&clock));
                std::thread::sleep(TICK_INTERVAL);
            }
            debug!("event=countdown_stop module=countdown status=ok");
        });

        Self {
            stop_flag,
            handle: Some(handle),
        }
    }

    /// Signals the worker to stop and waits for it to exit.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
