// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time source abstraction.
//!
//! Workers measure intervals (config cache, flush, rotation) on the monotonic
//! clock and stamp file names and `servertime` from the wall clock. Both come
//! from a [`Clock`] so tests can move time forward deterministically.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

/// Source of monotonic and wall-clock time.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic instant used for interval arithmetic.
    fn now(&self) -> Instant;

    /// Current UTC wall-clock time.
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug)]
struct FakeTime {
    instant: Instant,
    utc: DateTime<Utc>,
}

/// Manually advanced clock for tests.
///
/// Clones share the same underlying time, so a clock handed to a worker can
/// be advanced from the test body.
#[derive(Debug, Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    /// Start at the current instant and `2026-01-30T08:14:09Z`.
    pub fn new() -> Self {
        let utc = Utc
            .with_ymd_and_hms(2026, 1, 30, 8, 14, 9)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            inner: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                utc,
            })),
        }
    }

    /// Move both clocks forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut time = self.inner.lock();
        time.instant += by;
        time.utc += chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
    }

    /// Jump the wall clock without touching the monotonic clock.
    pub fn set_utc(&self, utc: DateTime<Utc>) {
        self.inner.lock().utc = utc;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().instant
    }

    fn utc_now(&self) -> DateTime<Utc> {
        self.inner.lock().utc
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
