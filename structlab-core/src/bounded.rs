//! Bounded "most recent N" collections for detector output.
//!
//! Every SMC detector scans oldest to newest and keeps only its newest
//! features. The bounds are fixed by the feature type, not by configuration.

use serde::Serialize;
use std::collections::VecDeque;

/// Order blocks retained per analysis.
pub const MAX_ORDER_BLOCKS: usize = 10;
/// Fair value gaps retained per analysis.
pub const MAX_FAIR_VALUE_GAPS: usize = 10;
/// Structure breaks retained per analysis, both directions combined.
pub const MAX_STRUCTURE_BREAKS: usize = 5;
/// Liquidity zones retained per analysis.
pub const MAX_LIQUIDITY_ZONES: usize = 5;

/// Ring buffer that evicts its oldest element once `capacity` is reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecentBuffer<T> {
    items: VecDeque<T>,
    #[serde(skip)]
    capacity: usize,
}

impl<T> RecentBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "RecentBuffer capacity must be >= 1");
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item`, evicting the oldest element when full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Oldest-first vector of the retained elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items.into()
    }
}

impl<T> Extend<T> for RecentBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// The last `n` elements of `items` (all of them if shorter).
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
