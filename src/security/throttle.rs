//! Fixed-spacing throttle for outbound summarize calls.
//!
//! A call arriving within `min_interval` of the previous one sleeps for the
//! full interval before proceeding. This is a delay, not a queue: concurrent
//! callers inside the window each wait the same fixed amount, in no
//! particular order.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::ThrottleConfig;
use crate::observability::metrics;

/// Per-process throttle state, shared through handler state.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    enabled: bool,
    last_call: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            enabled: true,
            last_call: Mutex::new(None),
        }
    }

    pub fn from_config(config: &ThrottleConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new(Duration::from_millis(config.min_interval_ms))
        }
    }

    /// A throttle that never delays.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(Duration::ZERO)
        }
    }

    /// Delay owed by a call made at `now`.
    pub fn delay_at(&self, now: Instant) -> Duration {
        if !self.enabled || self.min_interval.is_zero() {
            return Duration::ZERO;
        }
        let last = *self.last_call.lock().expect("throttle mutex poisoned");
        match last {
            Some(last) if now.saturating_duration_since(last) < self.min_interval => {
                self.min_interval
            }
            _ => Duration::ZERO,
        }
    }

    /// Record a call at `at`. The stored instant never moves backwards.
    pub fn record(&self, at: Instant) {
        let mut last = self.last_call.lock().expect("throttle mutex poisoned");
        *last = Some(match *last {
            Some(prev) if prev > at => prev,
            _ => at,
        });
    }

    pub fn last_call(&self) -> Option<Instant> {
        *self.last_call.lock().expect("throttle mutex poisoned")
    }

    /// Sleep if the previous call was too recent, then record this one.
    ///
    /// Returns the delay that was applied.
    pub async fn wait(&self) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }

        let delay = self.delay_at(Instant::now());
        if !delay.is_zero() {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "Throttling summarize call");
            metrics::record_throttled();
            tokio::time::sleep(delay).await;
        }
        self.record(Instant::now());
        delay
    }
}
