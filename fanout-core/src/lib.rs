// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! In-process buffered fan-out broadcaster.
//!
//! One producer publishes values through a [`Fanout`]; every subscriber gets
//! its own bounded queue of [`Slot`]s. A subscriber that falls behind loses
//! its oldest pending slots instead of slowing the producer or anyone else.
//!
//! ```
//! use fanout_core::Fanout;
//!
//! let fanout = Fanout::<u32>::new(8);
//! let (metrics, cancel_metrics) = fanout.subscribe_with("metrics");
//! let (_audit, _cancel_audit) = fanout.subscribe_with("audit");
//!
//! fanout.publish(1);
//! fanout.publish(2);
//!
//! assert_eq!(*metrics.recv().unwrap().value(), 1);
//! assert_eq!(fanout.status().pending("metrics"), 1);
//! assert_eq!(fanout.status().pending("audit"), 2);
//!
//! cancel_metrics.cancel().unwrap();
//! assert!(cancel_metrics.cancel().is_err());
//! ```

#[macro_use]
mod logging;

pub mod clock;
pub mod config;
pub mod fanout;
mod queue;
mod registry;
pub mod slot;
pub mod status;
pub mod subscription;

pub use self::clock::{Clock, SystemClock};
pub use self::config::{FanoutConfig, DEFAULT_CAPACITY};
pub use self::fanout::Fanout;
pub use self::slot::Slot;
pub use self::status::Status;
pub use self::subscription::{CancelHandle, Consumer, SubscriptionId};
pub use fanout_error::{FanoutError, Result};
