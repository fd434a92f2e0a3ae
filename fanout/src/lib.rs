// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Fanout
//!
//! An in-process, thread-safe, one-to-many broadcaster with a private bounded
//! queue per subscriber.
//!
//! ## Overview
//!
//! A producer calls [`Fanout::publish`]; every live subscriber gets the value
//! wrapped in a timestamped [`Slot`]. A subscriber that does not keep up loses
//! its own oldest slots, never anyone else's, and never slows the producer.
//!
//! ## Lifecycle
//!
//! 1. [`Fanout::subscribe`] / [`Fanout::subscribe_with`] return a
//!    [`Consumer`] and a [`CancelHandle`].
//! 2. Consume in a dedicated thread with [`Consumer::recv`], or as a
//!    `futures::Stream` in async code, until it reports end-of-stream.
//! 3. Cancel exactly once. A second cancel reports
//!    [`FanoutError::SubscriberNotFound`].
//! 4. [`Fanout::reset`] tears every subscription down at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use fanout::prelude::*;
//! use std::thread;
//!
//! let fanout = Fanout::<u64>::new(64);
//! let (consumer, cancel) = fanout.subscribe_with("printer");
//!
//! let printer = thread::spawn(move || {
//!     let mut seen = Vec::new();
//!     while let Some(slot) = consumer.recv() {
//!         seen.push(*slot.value());
//!     }
//!     seen
//! });
//!
//! for i in 0..3 {
//!     fanout.publish(i);
//! }
//! cancel.cancel().unwrap();
//!
//! assert_eq!(printer.join().unwrap(), vec![0, 1, 2]);
//! ```

pub use fanout_core::{
    clock, CancelHandle, Clock, Consumer, Fanout, FanoutConfig, Slot, Status, SubscriptionId,
    SystemClock, DEFAULT_CAPACITY,
};
pub use fanout_error::{FanoutError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CancelHandle, Consumer, Fanout, FanoutConfig, FanoutError, Slot, Status};
}
