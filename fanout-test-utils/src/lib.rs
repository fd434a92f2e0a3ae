// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the fanout broadcaster.
//!
//! Designed for development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`FixedClock`] / [`ManualClock`]: deterministic time sources for slot
//!   timestamps.
//! - [`populate`] / [`data`]: publish recognisable `"d0"`, `"d1"`, ... payloads.
//! - [`drain_values`] / [`collect_until_end`]: pull everything a consumer holds.
//! - [`unwrap_slot`] / [`assert_no_element_emitted`] / [`assert_stream_ended`]:
//!   timeout-bounded async assertions on a consumer.
//!
//! # Example
//!
//! ```rust
//! use fanout_core::Fanout;
//! use fanout_test_utils::{drain_values, populate};
//!
//! let fanout = Fanout::<String>::new(2);
//! let (consumer, _cancel) = fanout.subscribe();
//!
//! populate(&fanout, 3);
//! assert_eq!(drain_values(&consumer), vec!["d1", "d2"]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod clock;
pub mod factory;
pub mod helpers;

pub use clock::{FixedClock, ManualClock};
pub use factory::{data, fanout_with_clock, populate, populate_with_prefix};
pub use helpers::{
    assert_no_element_emitted, assert_stream_ended, collect_until_end, drain, drain_values,
    unwrap_slot,
};
