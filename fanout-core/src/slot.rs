// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::{Duration, Instant};

/// A timestamped envelope around one published value.
///
/// Slots are immutable. Every subscriber queue holds an `Arc` to the same
/// slot, so publishing never clones `T`. The timestamp lets consumers discard
/// items they consider too old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<T> {
    timestamp: Instant,
    value: T,
}

impl<T> Slot<T> {
    /// Wraps `value` with the instant it was published at.
    pub const fn new(value: T, timestamp: Instant) -> Self {
        Self { timestamp, value }
    }

    /// When the value was published.
    #[must_use]
    pub const fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// The published value.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Unwraps the published value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Time elapsed between publication and `now`, zero if `now` is earlier.
    #[must_use]
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.timestamp)
    }
}
