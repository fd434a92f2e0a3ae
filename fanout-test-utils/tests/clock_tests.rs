// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::Clock;
use fanout_test_utils::{FixedClock, ManualClock};
use std::time::{Duration, Instant};

#[test]
fn test_fixed_clock_never_moves() {
    let at = Instant::now();
    let clock = FixedClock::new(at);

    std::thread::sleep(Duration::from_millis(5));

    assert_eq!(clock.now(), at);
    assert_eq!(clock.instant(), at);
}

#[test]
fn test_manual_clock_advances_only_when_told() {
    let start = Instant::now();
    let clock = ManualClock::new(start);

    assert_eq!(clock.now(), start);
    clock.advance(Duration::from_millis(250));
    assert_eq!(clock.now(), start + Duration::from_millis(250));
}

#[test]
fn test_manual_clock_clones_share_reading() {
    let start = Instant::now();
    let clock = ManualClock::new(start);
    let handed_out = clock.clone();

    clock.set(start + Duration::from_secs(60));

    assert_eq!(handed_out.now(), start + Duration::from_secs(60));
}
