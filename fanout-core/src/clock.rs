// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time source used to stamp published slots.
//!
//! Production code uses [`SystemClock`]. Tests inject a frozen or manually
//! advanced clock so slot timestamps become deterministic. Any
//! `Fn() -> Instant + Send + Sync` closure is a clock as well.
//!
//! ```
//! use fanout_core::{Fanout, FanoutConfig};
//! use std::time::Instant;
//!
//! let epoch = Instant::now();
//! let fanout = Fanout::<u8>::with_clock(FanoutConfig::default(), move || epoch);
//! let (consumer, _cancel) = fanout.subscribe();
//!
//! fanout.publish(1);
//! assert_eq!(consumer.recv().unwrap().timestamp(), epoch);
//! ```

use std::time::Instant;

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the instant a slot published right now should carry.
    fn now(&self) -> Instant;
}

/// The monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> Instant + Send + Sync,
{
    fn now(&self) -> Instant {
        self()
    }
}
