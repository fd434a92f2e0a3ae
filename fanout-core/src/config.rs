// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Per-subscriber queue capacity used by [`FanoutConfig::default`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Construction parameters for a [`Fanout`](crate::Fanout).
///
/// ```
/// use fanout_core::{Fanout, FanoutConfig};
///
/// let fanout = Fanout::<String>::with_config(FanoutConfig::default().capacity(128));
/// assert_eq!(fanout.capacity(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanoutConfig {
    /// Maximum number of undelivered slots kept per subscriber.
    ///
    /// Once reached, publishing evicts the oldest slot of that subscriber.
    /// A value of 0 is raised to 1 when the broadcaster is built.
    pub capacity: usize,
}

impl FanoutConfig {
    /// Set the per-subscriber capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
