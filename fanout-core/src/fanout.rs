// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Buffered, multi-subscriber broadcaster.
//!
//! A [`Fanout`] hands every published value to all current subscribers, each
//! through its own bounded queue.
//!
//! ## Characteristics
//!
//! - **Hot**: subscribers only see values published after they subscribed.
//! - **Bounded, drop-oldest**: when a subscriber's queue is full, its oldest
//!   pending slot is discarded to make room. The producer never waits.
//! - **Isolated**: a stalled subscriber only loses its own backlog; other
//!   subscribers and the producer are unaffected.
//! - **Shared payloads**: each value is wrapped once in an `Arc<Slot<T>>`;
//!   `T` is never cloned.
//! - **Thread-safe**: cheap to clone; all clones share the same registry.
//!
//! ## Example
//!
//! ```
//! use fanout_core::Fanout;
//!
//! let fanout = Fanout::<&str>::new(2);
//! let (consumer, cancel) = fanout.subscribe();
//!
//! fanout.publish("a");
//! fanout.publish("b");
//! fanout.publish("c"); // evicts "a" for this subscriber
//!
//! cancel.cancel().unwrap();
//! assert_eq!(*consumer.recv().unwrap().value(), "b");
//! assert_eq!(*consumer.recv().unwrap().value(), "c");
//! assert!(consumer.recv().is_none()); // end of stream
//! ```

use crate::queue::SlotQueue;
use crate::registry::Registry;
use crate::{
    CancelHandle, Clock, Consumer, FanoutConfig, Slot, Status, SubscriptionId, SystemClock,
};
use fanout_error::Result;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct Shared<T> {
    registry: RwLock<Registry<T>>,
    capacity: usize,
    clock: Box<dyn Clock>,
}

/// A thread-safe, one-to-many broadcaster with per-subscriber bounded queues.
///
/// See the [module documentation](self) for the delivery model.
pub struct Fanout<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Fanout<T> {
    /// Creates a broadcaster whose subscribers each buffer up to `capacity`
    /// undelivered slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_config(FanoutConfig::default().capacity(capacity))
    }

    #[must_use]
    pub fn with_config(config: FanoutConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a broadcaster that stamps slots with `clock`.
    #[must_use]
    pub fn with_clock<C>(config: FanoutConfig, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        let capacity = if config.capacity == 0 {
            warn!(
                requested = config.capacity,
                capacity = 1,
                "fanout capacity must be positive, raising to 1"
            );
            1
        } else {
            config.capacity
        };

        Self {
            shared: Arc::new(Shared {
                registry: RwLock::new(Registry::new()),
                capacity,
                clock: Box::new(clock),
            }),
        }
    }

    /// Per-subscriber queue capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Sends `value` to every live subscriber.
    ///
    /// Subscribers whose queue is full lose their oldest pending slot. This
    /// never waits on consumers.
    pub fn publish(&self, value: T) {
        let registry = self.shared.registry.write();
        let slot = Arc::new(Slot::new(value, self.shared.clock.now()));
        registry.broadcast(&slot);
    }

    /// Subscribes under the default empty label.
    ///
    /// Equivalent to `subscribe_with("")`.
    pub fn subscribe(&self) -> (Consumer<T>, CancelHandle<T>) {
        self.subscribe_with("")
    }

    /// Subscribes under `label`.
    ///
    /// Labels need not be unique; [`status`](Self::status) sums the backlog of
    /// all subscriptions sharing one. The subscription takes the first free
    /// registry index, growing the registry only when none is free.
    pub fn subscribe_with(&self, label: impl Into<String>) -> (Consumer<T>, CancelHandle<T>) {
        let label = label.into();
        let queue = Arc::new(SlotQueue::new(self.shared.capacity));

        let id = {
            let mut registry = self.shared.registry.write();
            registry.insert(Arc::clone(&queue), label.clone())
        };

        debug!(
            index = id.index(),
            generation = id.generation(),
            label = %label,
            "subscriber added"
        );

        (
            Consumer::new(queue, id, label),
            CancelHandle::new(self.clone(), id),
        )
    }

    /// Ends the subscription identified by `id`.
    ///
    /// Its queue stops receiving slots, the consumer can still drain what is
    /// buffered, and the registry index becomes free for reuse.
    ///
    /// # Errors
    ///
    /// [`FanoutError::SubscriberNotFound`](fanout_error::FanoutError::SubscriberNotFound)
    /// if the index is out of range, free, or owned by a newer subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        self.shared.registry.write().release(id)?;

        debug!(
            index = id.index(),
            generation = id.generation(),
            "subscriber removed"
        );
        Ok(())
    }

    /// Closes every subscription and empties the registry.
    ///
    /// Consumers keep draining what they already hold, then see end-of-stream.
    /// Outstanding cancel handles fail with `SubscriberNotFound`.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn reset(&self) {
        let closed = self.shared.registry.write().clear();
        debug!(closed, "fanout reset");
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn active_subscribers(&self) -> usize {
        self.shared.registry.read().active()
    }

    /// Size of the registry, free indexes included.
    #[must_use]
    pub fn subscribers_len(&self) -> usize {
        self.shared.registry.read().len()
    }

    /// Pending slots per label across live subscriptions.
    #[must_use]
    pub fn status(&self) -> Status {
        self.shared.registry.read().status()
    }
}

impl<T> Clone for Fanout<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for Fanout<T> {
    fn default() -> Self {
        Self::with_config(FanoutConfig::default())
    }
}

impl<T> fmt::Debug for Fanout<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.shared.registry.read();
        f.debug_struct("Fanout")
            .field("capacity", &self.shared.capacity)
            .field("active_subscribers", &registry.active())
            .field("subscribers_len", &registry.len())
            .finish_non_exhaustive()
    }
}
