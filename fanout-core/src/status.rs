// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::HashMap;
use std::fmt;

/// Snapshot of how many slots are queued per subscriber label.
///
/// Subscriptions sharing a label are summed together. Subscriptions created
/// with [`Fanout::subscribe`](crate::Fanout::subscribe) all report under the
/// empty label `""`. A live subscription with nothing pending still shows its
/// label with a count of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pending: HashMap<String, usize>,
}

impl Status {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn record(&mut self, label: &str, queued: usize) {
        match self.pending.get_mut(label) {
            Some(count) => *count += queued,
            None => {
                self.pending.insert(label.to_owned(), queued);
            }
        }
    }

    /// Pending slots for `label`, 0 when no live subscription carries it.
    #[must_use]
    pub fn pending(&self, label: &str) -> usize {
        self.pending.get(label).copied().unwrap_or(0)
    }

    /// Whether at least one live subscription carries `label`.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.pending.contains_key(label)
    }

    /// Pending slots across every label.
    #[must_use]
    pub fn total(&self) -> usize {
        self.pending.values().sum()
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.pending
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    #[must_use]
    pub fn into_inner(self) -> HashMap<String, usize> {
        self.pending
    }
}

impl From<Status> for HashMap<String, usize> {
    fn from(status: Status) -> Self {
        status.pending
    }
}

impl PartialEq<HashMap<String, usize>> for Status {
    fn eq(&self, other: &HashMap<String, usize>) -> bool {
        &self.pending == other
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<_> = self.iter().collect();
        labels.sort_unstable();

        write!(f, "{{")?;
        for (i, (label, count)) in labels.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{label:?}: {count}")?;
        }
        write!(f, "}}")
    }
}
