// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Slot;
use event_listener::{Event, EventListener, Listener};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Outcome of a non-blocking pop.
pub(crate) enum Pop<T> {
    Item(Arc<Slot<T>>),
    Empty,
    Drained,
}

struct QueueState<T> {
    items: VecDeque<Arc<Slot<T>>>,
    closed: bool,
}

/// Bounded FIFO private to one subscription.
///
/// The broadcaster pushes while holding the registry write lock; the single
/// consumer pops without it. Only this queue's own mutex is ever taken on the
/// consumer side, so a stalled consumer cannot hold up anybody else.
pub(crate) struct SlotQueue<T> {
    state: Mutex<QueueState<T>>,
    capacity: usize,
    ready: Event,
}

impl<T> SlotQueue<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            capacity,
            ready: Event::new(),
        }
    }

    /// Appends a slot, discarding the oldest one first when the queue is full.
    ///
    /// A closed queue ignores the push.
    pub(crate) fn push_evicting(&self, slot: Arc<Slot<T>>) {
        {
            let mut state = self.state.lock();
            if state.closed {
                return;
            }
            if state.items.len() >= self.capacity {
                state.items.pop_front();
            }
            state.items.push_back(slot);
        }
        // Additive, so every queued slot is matched by one woken reader.
        self.ready.notify_additional(1);
    }

    /// Stops accepting slots. Buffered slots stay readable.
    pub(crate) fn close(&self) {
        self.state.lock().closed = true;
        self.ready.notify(usize::MAX);
    }

    pub(crate) fn try_pop(&self) -> Pop<T> {
        let mut state = self.state.lock();
        match state.items.pop_front() {
            Some(slot) => Pop::Item(slot),
            None if state.closed => Pop::Drained,
            None => Pop::Empty,
        }
    }

    /// Blocks the calling thread until a slot arrives or the queue is closed
    /// and drained.
    pub(crate) fn pop_blocking(&self) -> Option<Arc<Slot<T>>> {
        loop {
            match self.try_pop() {
                Pop::Item(slot) => return Some(slot),
                Pop::Drained => return None,
                Pop::Empty => {}
            }

            let listener = self.listen();

            // A push or close may have landed between the first check and listen().
            match self.try_pop() {
                Pop::Item(slot) => return Some(slot),
                Pop::Drained => return None,
                Pop::Empty => listener.wait(),
            }
        }
    }

    pub(crate) fn listen(&self) -> EventListener {
        self.ready.listen()
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    fn slot(value: u32) -> Arc<Slot<u32>> {
        Arc::new(Slot::new(value, Instant::now()))
    }

    fn pop_value(queue: &SlotQueue<u32>) -> Option<u32> {
        match queue.try_pop() {
            Pop::Item(slot) => Some(*slot.value()),
            _ => None,
        }
    }

    #[test]
    fn full_queue_evicts_oldest() {
        let queue = SlotQueue::new(2);
        queue.push_evicting(slot(1));
        queue.push_evicting(slot(2));
        queue.push_evicting(slot(3));

        assert_eq!(queue.len(), 2);
        assert_eq!(pop_value(&queue), Some(2));
        assert_eq!(pop_value(&queue), Some(3));
        assert!(matches!(queue.try_pop(), Pop::Empty));
    }

    #[test]
    fn closed_queue_ignores_pushes_and_drains() {
        let queue = SlotQueue::new(4);
        queue.push_evicting(slot(1));
        queue.close();
        queue.push_evicting(slot(2));

        assert!(queue.is_closed());
        assert_eq!(pop_value(&queue), Some(1));
        assert!(matches!(queue.try_pop(), Pop::Drained));
    }

    #[test]
    fn pop_blocking_wakes_on_push() {
        let queue = Arc::new(SlotQueue::new(1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop_blocking().map(|slot| *slot.value()))
        };

        thread::sleep(Duration::from_millis(20));
        queue.push_evicting(slot(9));

        assert_eq!(consumer.join().unwrap(), Some(9));
    }

    #[test]
    fn back_to_back_pushes_wake_two_blocked_readers() {
        let queue = Arc::new(SlotQueue::new(4));
        let readers: Vec<_> = (0..2)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.pop_blocking().map(|slot| *slot.value()))
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        queue.push_evicting(slot(1));
        queue.push_evicting(slot(2));

        let mut values: Vec<_> = readers
            .into_iter()
            .map(|reader| reader.join().unwrap())
            .collect();
        values.sort();
        assert_eq!(values, vec![Some(1), Some(2)]);
    }

    #[test]
    fn pop_blocking_wakes_on_close() {
        let queue = Arc::new(SlotQueue::<u32>::new(1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop_blocking().is_none())
        };

        thread::sleep(Duration::from_millis(20));
        queue.close();

        assert!(consumer.join().unwrap());
    }
}
