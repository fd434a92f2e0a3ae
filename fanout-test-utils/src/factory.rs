// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::{Clock, Fanout, FanoutConfig};

/// The payload [`populate`] publishes at position `index`: `"d{index}"`.
pub fn data(index: usize) -> String {
    format!("d{index}")
}

/// Publishes `"d0"` through `"d{count - 1}"`, in order.
pub fn populate(fanout: &Fanout<String>, count: usize) {
    populate_with_prefix(fanout, "d", count);
}

/// Publishes `"{prefix}0"` through `"{prefix}{count - 1}"`, in order.
pub fn populate_with_prefix(fanout: &Fanout<String>, prefix: &str, count: usize) {
    for i in 0..count {
        fanout.publish(format!("{prefix}{i}"));
    }
}

/// A broadcaster of `capacity` stamping slots with `clock`.
pub fn fanout_with_clock<T, C>(capacity: usize, clock: C) -> Fanout<T>
where
    C: Clock + 'static,
{
    Fanout::with_clock(FanoutConfig::default().capacity(capacity), clock)
}
