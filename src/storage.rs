//! Backing mapping abstraction.
//!
//! This module provides the `Storage` trait a registry keeps its buckets in.
//! Implementations exist for `HashMap`, `BTreeMap` and, with the `indexmap`
//! feature, `IndexMap`. Callers can inject any of them (or their own type) at
//! construction time, e.g. an ordered map for deterministic iteration.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Mapping from keys to buckets of values.
///
/// Implementors only provide the primitive accessors below; the registry keeps
/// the non-empty bucket invariant on top of them.
pub trait Storage<K, V> {
    /// Bucket registered under `key`, if any.
    fn bucket(&self, key: &K) -> Option<&Vec<V>>;

    /// Mutable bucket registered under `key`, if any.
    fn bucket_mut(&mut self, key: &K) -> Option<&mut Vec<V>>;

    /// Bucket registered under `key`, inserting an empty one if absent.
    fn bucket_or_default(&mut self, key: K) -> &mut Vec<V>;

    /// Remove and return the bucket registered under `key`.
    fn remove_bucket(&mut self, key: &K) -> Option<Vec<V>>;

    /// Keep only the buckets for which `f` returns `true`.
    ///
    /// `f` may mutate each bucket before deciding.
    fn retain_buckets<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut Vec<V>) -> bool;

    /// Iterate over every `(key, bucket)` pair.
    fn buckets<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a Vec<V>)>
    where
        K: 'a,
        V: 'a;

    /// Number of buckets.
    fn bucket_count(&self) -> usize;

    /// Remove every bucket.
    fn clear(&mut self);

    /// Total number of values across all buckets.
    fn total_len(&self) -> usize {
        self.buckets().map(|(_, values)| values.len()).sum()
    }
}

// -------------------------------------------------------------------------------------------------
// std maps
// -------------------------------------------------------------------------------------------------

impl<K, V, H> Storage<K, V> for HashMap<K, Vec<V>, H>
where
    K: Eq + Hash,
    H: BuildHasher,
{
    fn bucket(&self, key: &K) -> Option<&Vec<V>> {
        self.get(key)
    }

    fn bucket_mut(&mut self, key: &K) -> Option<&mut Vec<V>> {
        self.get_mut(key)
    }

    fn bucket_or_default(&mut self, key: K) -> &mut Vec<V> {
        self.entry(key).or_default()
    }

    fn remove_bucket(&mut self, key: &K) -> Option<Vec<V>> {
        self.remove(key)
    }

    fn retain_buckets<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut Vec<V>) -> bool,
    {
        self.retain(f);
    }

    fn buckets<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a Vec<V>)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn bucket_count(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }
}

impl<K, V> Storage<K, V> for BTreeMap<K, Vec<V>>
where
    K: Ord,
{
    fn bucket(&self, key: &K) -> Option<&Vec<V>> {
        self.get(key)
    }

    fn bucket_mut(&mut self, key: &K) -> Option<&mut Vec<V>> {
        self.get_mut(key)
    }

    fn bucket_or_default(&mut self, key: K) -> &mut Vec<V> {
        self.entry(key).or_default()
    }

    fn remove_bucket(&mut self, key: &K) -> Option<Vec<V>> {
        self.remove(key)
    }

    fn retain_buckets<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut Vec<V>) -> bool,
    {
        self.retain(f);
    }

    fn buckets<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a Vec<V>)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn bucket_count(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }
}

// -------------------------------------------------------------------------------------------------
// indexmap
// -------------------------------------------------------------------------------------------------

#[cfg(feature = "indexmap")]
impl<K, V, H> Storage<K, V> for indexmap::IndexMap<K, Vec<V>, H>
where
    K: Eq + Hash,
    H: BuildHasher,
{
    fn bucket(&self, key: &K) -> Option<&Vec<V>> {
        self.get(key)
    }

    fn bucket_mut(&mut self, key: &K) -> Option<&mut Vec<V>> {
        self.get_mut(key)
    }

    fn bucket_or_default(&mut self, key: K) -> &mut Vec<V> {
        self.entry(key).or_default()
    }

    // Keeps the insertion order of the remaining keys.
    fn remove_bucket(&mut self, key: &K) -> Option<Vec<V>> {
        self.shift_remove(key)
    }

    fn retain_buckets<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut Vec<V>) -> bool,
    {
        self.retain(f);
    }

    fn buckets<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a Vec<V>)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }

    fn bucket_count(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        indexmap::IndexMap::clear(self);
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
