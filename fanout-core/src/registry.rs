// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::queue::SlotQueue;
use crate::{Slot, Status, SubscriptionId};
use fanout_error::{FanoutError, Result};
use std::sync::Arc;

pub(crate) struct SubscriberEntry<T> {
    queue: Arc<SlotQueue<T>>,
    label: String,
    generation: u64,
}

/// Arena of subscriptions indexed by a stable slot number.
///
/// A `None` entry is a free index left behind by an unsubscribe and is
/// handed out again (first fit) before the vector grows.
pub(crate) struct Registry<T> {
    entries: Vec<Option<SubscriberEntry<T>>>,
    // Survives `clear` so handles issued before a reset never match again.
    next_generation: u64,
}

impl<T> Registry<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_generation: 0,
        }
    }

    pub(crate) fn insert(&mut self, queue: Arc<SlotQueue<T>>, label: String) -> SubscriptionId {
        let generation = self.next_generation;
        self.next_generation += 1;

        let entry = SubscriberEntry {
            queue,
            label,
            generation,
        };

        let index = match self.entries.iter().position(Option::is_none) {
            Some(free) => {
                self.entries[free] = Some(entry);
                free
            }
            None => {
                self.entries.push(Some(entry));
                self.entries.len() - 1
            }
        };

        SubscriptionId::new(index, generation)
    }

    /// Closes the subscription's queue and frees its index.
    pub(crate) fn release(&mut self, id: SubscriptionId) -> Result<()> {
        let live = matches!(
            self.entries.get(id.index()),
            Some(Some(entry)) if entry.generation == id.generation()
        );
        if !live {
            return Err(FanoutError::subscriber_not_found(id.index()));
        }

        if let Some(entry) = self.entries[id.index()].take() {
            entry.queue.close();
        }
        Ok(())
    }

    /// Delivers `slot` to every live entry in index order.
    pub(crate) fn broadcast(&self, slot: &Arc<Slot<T>>) {
        for entry in self.entries.iter().flatten() {
            entry.queue.push_evicting(Arc::clone(slot));
        }
    }

    /// Closes every live queue and empties the registry, returning how many
    /// subscriptions were torn down.
    pub(crate) fn clear(&mut self) -> usize {
        let entries = std::mem::take(&mut self.entries);
        let mut closed = 0;
        for entry in entries.into_iter().flatten() {
            entry.queue.close();
            closed += 1;
        }
        closed
    }

    pub(crate) fn active(&self) -> usize {
        self.entries.iter().filter(|slot| slot.is_some()).count()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn status(&self) -> Status {
        let mut status = Status::with_capacity(self.entries.len());
        for entry in self.entries.iter().flatten() {
            status.record(&entry.label, entry.queue.len());
        }
        status
    }
}
