// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One fast and one slow consumer sharing a producer.
//!
//! The slow consumer falls behind and loses its oldest readings while the
//! fast one sees everything. `status()` shows the backlog of each group.

use fanout::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let fanout = Fanout::<u32>::with_config(FanoutConfig::default().capacity(4));

    let (fast, cancel_fast) = fanout.subscribe_with("fast");
    let (slow, cancel_slow) = fanout.subscribe_with("slow");

    let fast_reader = thread::spawn(move || {
        let mut count = 0;
        while fast.recv().is_some() {
            count += 1;
        }
        count
    });

    let slow_reader = thread::spawn(move || {
        let mut values = Vec::new();
        while let Some(slot) = slow.recv() {
            values.push(*slot.value());
            thread::sleep(Duration::from_millis(20));
        }
        values
    });

    for reading in 0..50 {
        fanout.publish(reading);
        if reading % 10 == 0 {
            println!("backlog: {}", fanout.status());
        }
        thread::sleep(Duration::from_millis(2));
    }

    cancel_fast.cancel()?;
    cancel_slow.cancel()?;

    let fast_count = fast_reader.join().expect("fast reader panicked");
    let slow_values = slow_reader.join().expect("slow reader panicked");

    println!("fast consumer received {fast_count} readings");
    println!("slow consumer received {} readings: {slow_values:?}", slow_values.len());
    Ok(())
}
