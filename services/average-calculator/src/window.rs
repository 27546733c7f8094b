//! Bounded, deduplicated number window shared by all requests
//!
//! The window keeps numbers in order of first arrival (oldest at the front). Every mutation
//! goes through [`WindowStore::merge`], which snapshots, unions, evicts and replaces under a
//! single lock acquisition, so concurrent merges are serializable.

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Window contents immediately before and after one merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTransition {
    pub prev: Vec<i64>,
    pub curr: Vec<i64>,
}

/// Owner of the single shared window
#[derive(Debug)]
pub struct WindowStore {
    numbers: Mutex<Vec<i64>>,
    capacity: usize,
}

impl WindowStore {
    /// Create an empty window holding at most `capacity` numbers
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            numbers: Mutex::new(Vec::new()),
            capacity,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the current contents
    #[must_use]
    pub fn snapshot(&self) -> Vec<i64> {
        self.numbers.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.lock().is_empty()
    }

    /// Atomically merge `incoming` into the window.
    ///
    /// `prev` is captured before any mutation, even when `incoming` is empty.
    pub fn merge(&self, incoming: &[i64]) -> WindowTransition {
        let mut numbers = self.numbers.lock();
        let prev = numbers.clone();
        let curr = merge_window(&prev, incoming, self.capacity);
        *numbers = curr.clone();
        drop(numbers);

        debug!(
            incoming = incoming.len(),
            prev_len = prev.len(),
            curr_len = curr.len(),
            "Window merged"
        );

        WindowTransition { prev, curr }
    }
}

/// Ordered union of `existing` then unseen `incoming` values, trimmed from the front to
/// `capacity`.
#[must_use]
pub fn merge_window(existing: &[i64], incoming: &[i64], capacity: usize) -> Vec<i64> {
    let mut seen: FxHashSet<i64> = existing.iter().copied().collect();
    let mut union = Vec::with_capacity(existing.len() + incoming.len());
    union.extend_from_slice(existing);

    for &value in incoming {
        if seen.insert(value) {
            union.push(value);
        }
    }

    if union.len() > capacity {
        let overflow = union.len() - capacity;
        union.drain(..overflow);
    }

    union
}
