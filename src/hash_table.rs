//! A hash table that resolves collisions by chaining. Every bucket is a
//! [`LinkedList`] of `(key, value)` entries, and the bucket array doubles
//! whenever an insertion pushes the load factor past [`MAX_LOAD_FACTOR`].

use log::{debug, trace};
use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash, Hasher},
    iter::FromIterator,
    mem, slice,
};

use crate::error::{Error, Result};
use crate::linked_list::{self, LinkedList};

/// The number of buckets a table starts out with unless told otherwise.
pub const DEFAULT_BUCKETS: usize = 8;

/// Entries per bucket beyond which an insertion triggers a resize.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

type Bucket<K, V> = LinkedList<(K, V)>;

/// Builds a predicate matching the entry stored under `k`.
fn equivalent_key<K, Q, V>(k: &Q) -> impl Fn(&(K, V)) -> bool + '_
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    move |x| k.eq(x.0.borrow())
}

/// A key-value map over a fixed-length array of linked list buckets. A key
/// lives in the bucket at `hash(key) % bucket_count`, and lookups walk only
/// that bucket.
///
/// The bucket array only ever grows: deleting entries never shrinks it.
#[derive(Clone)]
pub struct HashTable<K, V, S = RandomState>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    hash_builder: S,
    buckets: Vec<Bucket<K, V>>,
    // the number of entries across all buckets, kept in step with every
    // insertion and removal so len() and load_factor() don't walk the table
    size: usize,
}

impl<K, V> HashTable<K, V, RandomState>
where
    K: Eq + Hash,
{
    /// Makes a new table with [`DEFAULT_BUCKETS`] buckets.
    pub fn new() -> Self {
        Self::from_parts(DEFAULT_BUCKETS, Default::default())
    }

    /// Makes a new table with a specified number of buckets.
    pub fn with_buckets(count: usize) -> Result<Self> {
        Self::with_buckets_and_hash_builder(count, Default::default())
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Makes a new table with a specified number of buckets and hasher.
    pub fn with_buckets_and_hash_builder(
        count: usize,
        hash_builder: S,
    ) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidBucketCount(count));
        }

        Ok(Self::from_parts(count, hash_builder))
    }

    fn from_parts(count: usize, hash_builder: S) -> Self {
        Self {
            hash_builder,
            buckets: Self::new_buckets(count),
            size: 0,
        }
    }

    fn new_buckets(count: usize) -> Vec<Bucket<K, V>> {
        (0..count).map(|_| LinkedList::new()).collect()
    }

    /// The number of entries in the table.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Counts the entries by walking every bucket. Always agrees with
    /// [`len`](Self::len), just slower.
    pub fn length(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.iter().count()).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Ratio of stored entries to buckets.
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Gets the value stored under `k`.
    pub fn get<Q>(&self, k: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.buckets[self.bucket_index(k)]
            .find(equivalent_key(k))
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    /// Gets a mutable reference to the value stored under `k`.
    pub fn get_mut<Q>(&mut self, k: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(k);

        self.buckets[index]
            .find_mut(equivalent_key(k))
            .map(|entry| &mut entry.1)
            .ok_or(Error::KeyNotFound)
    }

    pub fn contains<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(k).is_ok()
    }

    /// Stores `v` under `k`, returning the value that was there before if the
    /// key was already present. Grows the table if this pushes the load factor
    /// over [`MAX_LOAD_FACTOR`].
    pub fn set(&mut self, k: K, v: V) -> Option<V> {
        let index = self.bucket_index(&k);
        let bucket = &mut self.buckets[index];

        // an existing entry is taken out and a fresh one goes on the end of
        // the bucket, rather than overwriting the value where it sits
        let previous = bucket
            .remove_first(|(key, _)| *key == k)
            .map(|(_, old)| old);
        bucket.append((k, v));

        if previous.is_none() {
            self.size += 1;
        }

        trace!(
            "set entry in bucket {} of {} ({} entries)",
            index,
            self.buckets.len(),
            self.size
        );

        if self.load_factor() > MAX_LOAD_FACTOR {
            self.rehash(self.buckets.len().saturating_mul(2));
        }

        #[cfg(test)]
        self.continuity_test();

        previous
    }

    /// Removes the entry stored under `k`, returning its value.
    pub fn delete<Q>(&mut self, k: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(k);
        let (_, value) = self.buckets[index]
            .remove_first(equivalent_key(k))
            .ok_or(Error::KeyNotFound)?;
        self.size -= 1;

        trace!("deleted entry from bucket {} ({} entries)", index, self.size);

        #[cfg(test)]
        self.continuity_test();

        Ok(value)
    }

    /// Reallocates the table with `new_count` buckets and re-inserts every
    /// entry. If `new_count` is too small to hold the entries under the load
    /// factor, the table grows again on the way.
    pub fn resize(&mut self, new_count: usize) -> Result<()> {
        if new_count == 0 {
            return Err(Error::InvalidBucketCount(new_count));
        }

        self.rehash(new_count);
        Ok(())
    }

    fn rehash(&mut self, new_count: usize) {
        debug!(
            "resizing hash table from {} to {} buckets ({} entries)",
            self.buckets.len(),
            new_count,
            self.size
        );

        let old_buckets =
            mem::replace(&mut self.buckets, Self::new_buckets(new_count));
        self.size = 0;

        // entries go back in through set, which rebuilds the counter as
        // they land
        for (k, v) in old_buckets.into_iter().flatten() {
            self.set(k, v);
        }
    }

    /// All entries, grouped by bucket and in insertion order within a
    /// bucket. There's no ordering across buckets, and a resize reshuffles
    /// everything.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.size,
        }
    }

    /// All keys, in [`iter`](Self::iter) order.
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// All values, in [`iter`](Self::iter) order.
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    /// All entries, in [`iter`](Self::iter) order.
    pub fn items(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Removes every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.size = 0;
    }

    fn bucket_index<Q>(&self, k: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        let mut h = self.hash_builder.build_hasher();
        k.hash(&mut h);
        (h.finish() % self.buckets.len() as u64) as usize
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        assert!(!self.buckets.is_empty());
        assert_eq!(self.size, self.length());

        // every key sits in the bucket it hashes to, and only once
        for (index, bucket) in self.buckets.iter().enumerate() {
            for (k, _) in bucket.iter() {
                assert_eq!(index, self.bucket_index(k));
                assert_eq!(1, bucket.iter().filter(|(other, _)| other == k).count());
            }
        }
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::from_parts(DEFAULT_BUCKETS, Default::default())
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders as `{k: v, ...}`.
impl<K, V, S> fmt::Display for HashTable<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", k, v)?;
        }
        write!(f, "}}")
    }
}

/// Borrowing iterator over the entries of a [`HashTable`].
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Bucket<K, V>>,
    current: Option<linked_list::Iter<'a, (K, V)>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((k, v));
            }

            // move on to the next bucket, or stop if there are none left
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
