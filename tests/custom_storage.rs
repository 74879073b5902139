//! Integration tests for injected backing mappings.
//!
//! Shows the registry over `BTreeMap`, a `HashMap` with a custom hasher, a
//! hand-written `Storage` implementation, and shared access behind a `Mutex`.

use multi_registry::{CollisionPolicy, Registry, Storage};
use std::collections::hash_map::RandomState;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_btree_storage_orders_keys() {
    let mut registry = Registry::with_storage(BTreeMap::new(), CollisionPolicy::Duplicate);
    registry.register("zeta", 1).unwrap();
    registry.register("alpha", 2).unwrap();
    registry.register("mid", 3).unwrap();

    let keys: Vec<&str> = registry.keys().copied().collect();
    assert_eq!(keys, vec!["alpha", "mid", "zeta"]);

    let pairs: Vec<(&str, Vec<i32>)> = registry
        .iter()
        .map(|(k, v)| (*k, v.to_vec()))
        .collect();
    assert_eq!(pairs[0], ("alpha", vec![2]));
}

#[test]
fn test_hash_map_with_explicit_hasher() {
    let storage: HashMap<u64, Vec<String>, RandomState> = HashMap::with_hasher(RandomState::new());
    let mut registry = Registry::with_storage(storage, CollisionPolicy::Discard);

    registry.register(1, "one".to_string()).unwrap();
    registry.register(1, "one".to_string()).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_prefilled_storage_is_kept() {
    let mut storage = HashMap::new();
    storage.insert("a", vec![1, 1]);
    storage.insert("b", Vec::new());

    let mut registry = Registry::with_storage(storage, CollisionPolicy::Abort);
    assert_eq!(registry.key_count(), 1);
    assert_eq!(registry.len_of(&"a"), 2);

    assert!(registry.register("a", 1).is_err());
    assert_eq!(registry.register("b", 1), Ok(true));

    let storage = registry.into_storage();
    assert_eq!(storage.get("b"), Some(&vec![1]));
}

/// Storage keeping buckets in a plain vector of pairs, insertion ordered.
#[derive(Debug, Default)]
struct PairList<K, V> {
    entries: Vec<(K, Vec<V>)>,
}

impl<K: PartialEq, V> Storage<K, V> for PairList<K, V> {
    fn bucket(&self, key: &K) -> Option<&Vec<V>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn bucket_mut(&mut self, key: &K) -> Option<&mut Vec<V>> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn bucket_or_default(&mut self, key: K) -> &mut Vec<V> {
        let index = match self.entries.iter().position(|(k, _)| *k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key, Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    fn remove_bucket(&mut self, key: &K) -> Option<Vec<V>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    fn retain_buckets<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut Vec<V>) -> bool,
    {
        self.entries.retain_mut(|(k, v)| f(k, v));
    }

    fn buckets<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a Vec<V>)>
    where
        K: 'a,
        V: 'a,
    {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    fn bucket_count(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

#[test]
fn test_custom_storage_implementation() {
    let mut registry = Registry::with_storage(PairList::default(), CollisionPolicy::Discard);

    registry.register_all("second", [1, 2]).unwrap();
    registry.register_all("first", [3]).unwrap();
    registry.register("second", 2).unwrap();

    let keys: Vec<&str> = registry.keys().copied().collect();
    assert_eq!(keys, vec!["second", "first"]);
    assert_eq!(registry.len(), 3);

    assert!(registry.deregister_value(&3));
    assert_eq!(registry.storage().bucket_count(), 1);

    assert!(registry.deregister_if(|_| true));
    assert!(registry.storage().entries.is_empty());
}

#[test]
fn test_external_synchronization() {
    let registry = Arc::new(Mutex::new(Registry::with_policy(CollisionPolicy::Discard)));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let registry = registry.clone();
            thread::spawn(move || {
                for value in 0..10 {
                    registry
                        .lock()
                        .unwrap()
                        .register(worker % 2, value)
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let registry = registry.lock().unwrap();
    assert_eq!(registry.key_count(), 2);
    assert_eq!(registry.len_of(&0), 10);
    assert_eq!(registry.len_of(&1), 10);
}

#[cfg(feature = "indexmap")]
#[test]
fn test_index_map_storage_keeps_insertion_order() {
    let mut registry = Registry::with_storage(indexmap::IndexMap::new(), CollisionPolicy::Duplicate);
    for key in ["c", "a", "b"] {
        registry.register(key, 0).unwrap();
    }
    registry.deregister_key(&"c");
    registry.register("c", 1).unwrap();

    let keys: Vec<&str> = registry.keys().copied().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}
