//! Storage backends for the DP caches.

use std::collections::HashMap;
use std::hash::Hash;

use dashmap::DashMap;

/// Storage for a single-threaded cache.
pub trait Backend<I, K> {
    /// Cached value for `index`, if any.
    fn get(&self, index: &I) -> Option<&K>;

    /// Returns the cached value, storing `compute()` first when absent.
    fn get_or_insert<F: FnOnce() -> K>(&mut self, index: I, compute: F) -> &K;
}

/// Storage for a cache shared between threads.
///
/// Values are returned by clone because no reference can outlive the
/// internal lock.
pub trait ParallelBackend<I, K>: Send + Sync {
    fn get(&self, index: &I) -> Option<K>;

    /// Must not call back into the cache from `compute`.
    fn get_or_insert<F: FnOnce() -> K>(&self, index: I, compute: F) -> K;
}

/// Dense `usize` indices starting at zero. Grows on demand.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index).and_then(Option::as_ref)
    }

    fn get_or_insert<F: FnOnce() -> K>(&mut self, index: usize, compute: F) -> &K {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index].get_or_insert_with(compute)
    }
}

/// Sparse or non-integer indices.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert<F: FnOnce() -> K>(&mut self, index: I, compute: F) -> &K {
        self.data.entry(index).or_insert_with(compute)
    }
}

/// Sharded concurrent map backend.
#[derive(Debug)]
pub struct DashMapBackend<I: Hash + Eq, K> {
    data: DashMap<I, K>,
}

impl<I: Hash + Eq, K> DashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<I: Hash + Eq, K> Default for DashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K> ParallelBackend<I, K> for DashMapBackend<I, K>
where
    I: Hash + Eq + Send + Sync,
    K: Clone + Send + Sync,
{
    fn get(&self, index: &I) -> Option<K> {
        self.data.get(index).map(|entry| entry.value().clone())
    }

    fn get_or_insert<F: FnOnce() -> K>(&self, index: I, compute: F) -> K {
        // The shard stays write-locked while `compute` runs.
        self.data.entry(index).or_insert_with(compute).value().clone()
    }
}
