//! Request-generation counters.
//!
//! Catalog fetches for the same render target can resolve out of order. A
//! handler calls [`Generations::begin`] before fetching and checks
//! [`Generations::is_current`] once the response arrives; if a newer request
//! for the same key started in between, the older response is dropped
//! instead of overwriting the newer render.

use std::collections::HashMap;
use std::hash::Hash;

/// Sequence number handed out by [`Generations::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonically increasing generation per key.
#[derive(Debug)]
pub struct Generations<K> {
    latest: HashMap<K, u64>,
}

impl<K> Default for Generations<K> {
    fn default() -> Self {
        Self {
            latest: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Generations<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request for `key`, superseding any in flight.
    pub fn begin(&mut self, key: K) -> Generation {
        let latest = self.latest.entry(key).or_insert(0);
        *latest = latest.saturating_add(1);
        Generation(*latest)
    }

    /// Whether `generation` is still the newest request for `key`.
    ///
    /// Unknown keys are never current.
    #[must_use]
    pub fn is_current(&self, key: &K, generation: Generation) -> bool {
        self.latest.get(key) == Some(&generation.0)
    }
}
