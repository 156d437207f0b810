//! Read-mostly caches shared by the metadata layers.
//!
//! Thread-safe with `parking_lot` `RwLock`. Atomic counters for statistics.
//!
//! Population is atomic per key: a miss takes the write lock, re-checks the
//! map, and computes while holding it. At most one computation per key ever
//! runs, and every caller observes the same stored value.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// A process-lifetime cache with compute-if-absent semantics.
///
/// Values are expected to be cheap to clone (typically `Arc`s), so lookups
/// hand out clones of the stored value.
pub struct ComputeCache<K, V> {
    /// Cache storage (RwLock for concurrent reads)
    entries: RwLock<HashMap<K, V>>,
    /// Cache hits
    hits: AtomicU64,
    /// Cache misses
    misses: AtomicU64,
}

impl<K, V> ComputeCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.entries.read().get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Returns the cached value for `key`, computing and storing it first if
    /// absent.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let mut entries = self.entries.write();
        if let Some(value) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return value.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute(&key);
        entries.insert(key, value.clone());
        value
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), but a failed
    /// computation stores nothing and returns the error.
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` returns.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let mut entries = self.entries.write();
        if let Some(value) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute(&key)?;
        entries.insert(key, value.clone());
        Ok(value)
    }

    /// Returns true if a value is stored for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Returns clones of every stored value.
    pub fn values(&self) -> Vec<V> {
        self.entries.read().values().cloned().collect()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes every entry and resets the counters.
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<K, V> Default for ComputeCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ComputeCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeCache")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Cache statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of stored entries.
    pub size: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that triggered a computation.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
