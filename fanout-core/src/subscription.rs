// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Capability handles returned by [`Fanout::subscribe`].
//!
//! A subscription is split in two owned values:
//!
//! - [`Consumer`] pulls slots out of the subscription's private queue, either
//!   blocking the current thread with [`Consumer::recv`] or as a
//!   [`futures::Stream`] inside async code.
//! - [`CancelHandle`] ends the subscription. After a successful cancel no
//!   further slots are queued, the consumer drains what is left and then
//!   observes end-of-stream.
//!
//! Dropping the consumer does **not** unsubscribe. Always cancel, or the
//! registry index stays occupied until the next [`Fanout::reset`].

use crate::queue::{Pop, SlotQueue};
use crate::{Fanout, Slot};
use event_listener::EventListener;
use fanout_error::{FanoutError, Result};
use futures::{Stream, StreamExt};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Identity of one subscription: its registry index plus the generation
/// stamped on it at subscribe time.
///
/// Indexes are reused after an unsubscribe; the generation is not, so an id
/// never matches a later subscription that happens to land on the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    index: usize,
    generation: u64,
}

impl SubscriptionId {
    pub(crate) const fn new(index: usize, generation: u64) -> Self {
        Self { index, generation }
    }

    /// Registry index occupied by the subscription.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Monotonic stamp distinguishing this subscription from earlier ones
    /// that used the same index.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Receiving half of a subscription.
pub struct Consumer<T> {
    queue: Arc<SlotQueue<T>>,
    id: SubscriptionId,
    label: String,
    listener: Option<EventListener>,
}

impl<T> Consumer<T> {
    pub(crate) fn new(queue: Arc<SlotQueue<T>>, id: SubscriptionId, label: String) -> Self {
        Self {
            queue,
            id,
            label,
            listener: None,
        }
    }

    /// Blocks until the next slot is available.
    ///
    /// Returns `None` once the subscription has been cancelled (or the
    /// broadcaster reset) and every buffered slot has been consumed. While the
    /// subscription is live and the queue is empty this waits indefinitely.
    pub fn recv(&self) -> Option<Arc<Slot<T>>> {
        self.queue.pop_blocking()
    }

    /// Takes the next slot without waiting.
    ///
    /// `Ok(None)` means nothing has been published yet;
    /// [`FanoutError::EndOfStream`] means nothing ever will be.
    pub fn try_recv(&self) -> Result<Option<Arc<Slot<T>>>> {
        match self.queue.try_pop() {
            Pop::Item(slot) => Ok(Some(slot)),
            Pop::Empty => Ok(None),
            Pop::Drained => Err(FanoutError::EndOfStream),
        }
    }

    /// Async counterpart of [`recv`](Self::recv).
    pub async fn recv_async(&mut self) -> Option<Arc<Slot<T>>> {
        self.next().await
    }

    /// Slots currently waiting in this subscription's queue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` once the subscription has been cancelled or reset.
    ///
    /// Buffered slots may still be pending.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }

    /// Maximum number of slots this subscription buffers before evicting.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Label given at subscribe time, empty for [`Fanout::subscribe`].
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Identity shared with the matching [`CancelHandle`].
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl<T> Stream for Consumer<T> {
    type Item = Arc<Slot<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match this.queue.try_pop() {
                Pop::Item(slot) => {
                    this.listener = None;
                    return Poll::Ready(Some(slot));
                }
                Pop::Drained => {
                    this.listener = None;
                    return Poll::Ready(None);
                }
                Pop::Empty => {}
            }

            match this.listener.as_mut() {
                // Register first, then re-check the queue on the next iteration.
                None => this.listener = Some(this.queue.listen()),
                Some(listener) => match Pin::new(listener).poll(cx) {
                    Poll::Ready(()) => this.listener = None,
                    Poll::Pending => return Poll::Pending,
                },
            }
        }
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("pending", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Cancelling half of a subscription.
///
/// Clones target the same subscription: only the first successful
/// [`cancel`](Self::cancel) across all of them wins, every later call reports
/// [`FanoutError::SubscriberNotFound`].
pub struct CancelHandle<T> {
    fanout: Fanout<T>,
    id: SubscriptionId,
}

impl<T> CancelHandle<T> {
    pub(crate) fn new(fanout: Fanout<T>, id: SubscriptionId) -> Self {
        Self { fanout, id }
    }

    /// Ends the subscription.
    ///
    /// # Errors
    ///
    /// [`FanoutError::SubscriberNotFound`] if the subscription was already
    /// cancelled or torn down by [`Fanout::reset`].
    pub fn cancel(&self) -> Result<()> {
        self.fanout.unsubscribe(self.id)
    }

    /// Subscription this handle cancels.
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl<T> Clone for CancelHandle<T> {
    fn clone(&self) -> Self {
        Self {
            fanout: self.fanout.clone(),
            id: self.id,
        }
    }
}

impl<T> fmt::Debug for CancelHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle").field("id", &self.id).finish()
    }
}
