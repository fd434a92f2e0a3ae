// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stress tests driving every code path of the broadcaster at the same time.
//!
//! Publish, subscribe + consume, cancel, reset and all observers run from
//! their own threads for a bounded period. Any new operation added to
//! `Fanout` should get a vector here too.

use fanout_core::{CancelHandle, Fanout, FanoutError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const CAPACITY: usize = 20;
const RUN_FOR: Duration = Duration::from_millis(750);
const GROUPS: usize = 3;

/// Upper bound on live subscriptions: raised before subscribing, lowered only
/// once the consumer has seen end-of-stream.
#[derive(Default)]
struct LiveCount {
    live: AtomicUsize,
    peak: AtomicUsize,
}

impl LiveCount {
    fn enter(&self) {
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(live, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[test]
fn test_fanout_supports_concurrent_use() {
    let fanout = Fanout::<u64>::new(CAPACITY);
    let stop = AtomicBool::new(false);
    let received = AtomicUsize::new(0);
    let overall = LiveCount::default();
    let per_group: [LiveCount; GROUPS] = std::array::from_fn(|_| LiveCount::default());
    let (cancel_tx, cancel_rx) = mpsc::channel::<CancelHandle<u64>>();

    thread::scope(|s| {
        let fanout = &fanout;
        let stop = &stop;
        let received = &received;
        let overall = &overall;
        let per_group = &per_group;

        // Subscribe vector: every subscription gets its own consumer thread.
        let subscriber = s.spawn(move || {
            let mut n = 0_usize;
            while !stop.load(Ordering::Relaxed) {
                let group = n % GROUPS;
                overall.enter();
                per_group[group].enter();
                let (consumer, cancel) = fanout.subscribe_with(format!("group-{group}"));
                s.spawn(move || {
                    let mut last = None;
                    while let Some(slot) = consumer.recv() {
                        assert!(consumer.len() <= CAPACITY);
                        let value = *slot.value();
                        // Gaps are allowed, reordering is not.
                        if let Some(prev) = last {
                            assert!(value > prev, "{value} delivered after {prev}");
                        }
                        last = Some(value);
                        received.fetch_add(1, Ordering::Relaxed);
                    }
                    per_group[group].leave();
                    overall.leave();
                });
                if cancel_tx.send(cancel).is_err() {
                    break;
                }
                n += 1;
                thread::sleep(Duration::from_millis(2));
            }
        });

        // Unsubscribe vector
        s.spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                if let Ok(cancel) = cancel_rx.recv_timeout(Duration::from_millis(10)) {
                    thread::sleep(Duration::from_millis(3));
                    match cancel.cancel() {
                        Ok(()) | Err(FanoutError::SubscriberNotFound { .. }) => {}
                        Err(other) => panic!("unexpected cancel error: {other}"),
                    }
                }
            }
        });

        // Publish vector, single producer so per-subscriber order is checkable
        let producer = s.spawn(move || {
            let mut value = 0_u64;
            while !stop.load(Ordering::Relaxed) {
                fanout.publish(value);
                value += 1;
            }
            value
        });

        // Reset vector
        s.spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(100));
                fanout.reset();
            }
        });

        // Observer vectors
        s.spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let status = fanout.status();
                assert!(status.iter().all(|(label, _)| label.starts_with("group-")));
                for (group, count) in per_group.iter().enumerate() {
                    let pending = status.pending(&format!("group-{group}"));
                    let bound = count.peak() * CAPACITY;
                    assert!(pending <= bound, "group-{group}: {pending} pending > {bound}");
                }
                thread::sleep(Duration::from_millis(5));
            }
        });
        s.spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let _ = fanout.active_subscribers();
                // Freed indexes are reused before the registry grows.
                let len = fanout.subscribers_len();
                let peak = overall.peak();
                assert!(len <= peak, "registry grew to {len} with at most {peak} live");
                thread::sleep(Duration::from_millis(5));
            }
        });

        thread::sleep(RUN_FOR);
        stop.store(true, Ordering::Relaxed);

        subscriber.join().unwrap();
        assert!(producer.join().unwrap() > 0);

        // Releases every consumer thread still blocked in recv().
        fanout.reset();
    });

    assert_eq!(fanout.active_subscribers(), 0);
    assert_eq!(fanout.subscribers_len(), 0);
    assert!(received.load(Ordering::Relaxed) > 0);
    assert_eq!(overall.live.load(Ordering::SeqCst), 0);
    assert!(overall.peak() > 0);
}

#[test]
fn test_stalled_consumer_never_blocks_producers() {
    let fanout = Fanout::<u64>::new(4);
    let (stalled, _cancel_stalled) = fanout.subscribe();
    let (active, cancel_active) = fanout.subscribe();

    let (done_tx, done_rx) = mpsc::channel();
    thread::scope(|s| {
        for producer in 0..4_u64 {
            let fanout = fanout.clone();
            let done_tx = done_tx.clone();
            s.spawn(move || {
                for i in 0..10_000 {
                    fanout.publish(producer * 10_000 + i);
                }
                done_tx.send(()).unwrap();
            });
        }

        let reader = s.spawn(move || {
            let mut count = 0_usize;
            while active.recv().is_some() {
                count += 1;
            }
            count
        });

        for _ in 0..4 {
            done_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("producer blocked by a stalled consumer");
        }
        cancel_active.cancel().unwrap();
        assert!(reader.join().unwrap() > 0);
    });

    assert_eq!(stalled.len(), 4);
}
