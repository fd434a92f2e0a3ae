// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::Clock;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: Instant,
}

impl FixedClock {
    pub const fn new(at: Instant) -> Self {
        Self { at }
    }

    /// Frozen at the moment of the call.
    pub fn frozen_now() -> Self {
        Self::new(Instant::now())
    }

    pub const fn instant(&self) -> Instant {
        self.at
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.at
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one clone and hand the
/// other to the broadcaster.
#[derive(Debug, Clone)]
pub struct ManualClock {
    at: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            at: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.at.lock() += by;
    }

    pub fn set(&self, at: Instant) {
        *self.at.lock() = at;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.at.lock()
    }
}
