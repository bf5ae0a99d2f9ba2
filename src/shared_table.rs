use parking_lot::RwLock;
use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
    sync::Arc,
};

use crate::{error::Result, hash_table::HashTable};

/// Wrapper for a HashTable which is shareable across thread boundaries.
/// Lookups share a read lock; anything that mutates takes the write lock for
/// the whole operation, resizes included.
pub struct SharedHashTable<K, V, S = RandomState>(Arc<RwLock<HashTable<K, V, S>>>)
where
    K: Eq + Hash,
    S: BuildHasher;

impl<K, V> SharedHashTable<K, V, RandomState>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Makes a shared table around a fresh, default sized HashTable.
    pub fn new() -> Self {
        Self::with_table(HashTable::new())
    }
}

impl<K, V, S> SharedHashTable<K, V, S>
where
    K: Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    /// Wraps a table into a shared table accessor, making it safe to move
    /// across thread boundaries. Enforces an additional constraint of Clone on
    /// values.
    pub fn with_table(table: HashTable<K, V, S>) -> Self {
        Self(Arc::from(RwLock::from(table)))
    }

    /// Stores a value, returning the one it displaced.
    pub fn set(&self, k: K, v: V) -> Option<V> {
        self.0.write().set(k, v)
    }

    /// Get a value from the table. This clones it so the lock isn't held any
    /// longer than the lookup.
    pub fn get<Q>(&self, k: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.0.read().get(k).map(|v| v.clone())
    }

    /// Remove an entry from the table, returning its value.
    pub fn delete<Q>(&self, k: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.0.write().delete(k)
    }

    pub fn contains<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.0.read().contains(k)
    }

    /// Clears the table.
    pub fn clear(&self) {
        self.0.write().clear()
    }

    /// The number of entries in the table at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.0.read().bucket_count()
    }

    pub fn load_factor(&self) -> f64 {
        self.0.read().load_factor()
    }
}

impl<K, V, S> Default for SharedHashTable<K, V, S>
where
    K: Eq + Hash,
    V: Clone,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_table(HashTable::default())
    }
}

impl<K, V, S> Clone for SharedHashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn clone(&self) -> Self {
        SharedHashTable(self.0.clone())
    }
}
