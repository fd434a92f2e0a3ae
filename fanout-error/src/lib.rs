// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the fanout buffered broadcaster
//!
//! The broadcaster is almost entirely infallible: publishing, subscribing,
//! resetting and the observers never fail. The two conditions a caller has to
//! handle are collected in [`FanoutError`].
//!
//! # Examples
//!
//! ```
//! use fanout_error::{FanoutError, Result};
//!
//! fn cancel_twice() -> Result<()> {
//!     Err(FanoutError::subscriber_not_found(3))
//! }
//!
//! assert!(cancel_twice().unwrap_err().is_recoverable());
//! ```

/// Root error type for all fanout operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FanoutError {
    /// The targeted subscription is not registered
    ///
    /// Returned when cancelling a subscription whose registry index is out
    /// of range, already empty (cancelled before, or cleared by a reset), or
    /// now owned by a newer subscription.
    #[error("fanout: subscriber not found (index {index})")]
    SubscriberNotFound {
        /// Registry index the caller tried to release
        index: usize,
    },

    /// The subscription was closed and every buffered slot has been consumed
    ///
    /// Terminal: no more items will ever arrive on this subscription.
    #[error("fanout: end of stream")]
    EndOfStream,
}

impl FanoutError {
    /// Create a subscriber-not-found error for the given registry index
    #[must_use]
    pub const fn subscriber_not_found(index: usize) -> Self {
        Self::SubscriberNotFound { index }
    }

    /// Check if the caller can keep using the broadcaster after this error
    ///
    /// A missing subscriber never corrupts broadcaster state, so cleanup code
    /// can treat it as best-effort.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::SubscriberNotFound { .. })
    }

    /// Check if this error marks the end of a subscription
    #[must_use]
    pub const fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

/// Specialized Result type for fanout operations
///
/// ```
/// use fanout_error::Result;
///
/// fn release() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, FanoutError>;
