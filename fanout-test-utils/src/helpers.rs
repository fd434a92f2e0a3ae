// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fanout_core::{Consumer, Slot};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Takes every slot currently buffered, without blocking.
pub fn drain<T>(consumer: &Consumer<T>) -> Vec<Arc<Slot<T>>> {
    let mut slots = Vec::new();
    while let Ok(Some(slot)) = consumer.try_recv() {
        slots.push(slot);
    }
    slots
}

/// Like [`drain`], cloning the values out of their slots.
pub fn drain_values<T: Clone>(consumer: &Consumer<T>) -> Vec<T> {
    drain(consumer)
        .into_iter()
        .map(|slot| slot.value().clone())
        .collect()
}

/// Blocks until end-of-stream, returning every value received on the way.
///
/// Only terminates once the subscription has been cancelled or reset.
pub fn collect_until_end<T: Clone>(consumer: &Consumer<T>) -> Vec<T> {
    let mut values = Vec::new();
    while let Some(slot) = consumer.recv() {
        values.push(slot.value().clone());
    }
    values
}

/// Awaits the next slot, panicking on end-of-stream or after `timeout_ms`.
pub async fn unwrap_slot<T>(consumer: &mut Consumer<T>, timeout_ms: u64) -> Arc<Slot<T>> {
    match timeout(Duration::from_millis(timeout_ms), consumer.next()).await {
        Ok(Some(slot)) => slot,
        Ok(None) => panic!("Expected a slot but the subscription ended"),
        Err(_) => panic!("Timeout: No item received within {timeout_ms} ms"),
    }
}

/// Panics if the consumer yields anything (slot or end-of-stream) within
/// `timeout_ms`.
pub async fn assert_no_element_emitted<T>(consumer: &mut Consumer<T>, timeout_ms: u64) {
    tokio::select! {
        item = consumer.next() => {
            match item {
                Some(_) => panic!("Unexpected slot emitted, expected no output."),
                None => panic!("Unexpected end of stream, expected no output."),
            }
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Panics unless the consumer reports end-of-stream within `timeout_ms`.
pub async fn assert_stream_ended<T>(consumer: &mut Consumer<T>, timeout_ms: u64) {
    match timeout(Duration::from_millis(timeout_ms), consumer.next()).await {
        Ok(None) => {}
        Ok(Some(_)) => panic!("Expected end of stream but received a slot"),
        Err(_) => panic!("Timeout: stream did not end within {timeout_ms} ms"),
    }
}
