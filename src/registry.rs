//! Multi-value registry mapping keys to ordered buckets of values.
//!
//! All mutation passes through the registry's [`CollisionPolicy`]. Buckets are
//! created lazily on first registration and dropped as soon as they become
//! empty, so every key the registry reports holds at least one value.
//!
//! # Examples
//!
//! ```
//! use multi_registry::{CollisionPolicy, Registry};
//!
//! let mut registry = Registry::with_policy(CollisionPolicy::Discard);
//!
//! assert_eq!(registry.register("a", 1), Ok(true));
//! assert_eq!(registry.register("a", 1), Ok(false));
//! assert_eq!(registry.register_all("a", [2, 3]), Ok(true));
//!
//! assert_eq!(registry.get(&"a"), Some(&[1, 2, 3][..]));
//! assert!(registry.deregister_all(&"a", [1, 2, 3]));
//! assert!(!registry.contains_key(&"a"));
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::registration::Registration;
use crate::{CollisionPolicy, RegistryError, RegistryEvent, Storage};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Keys mapped to ordered buckets of values under a fixed collision policy.
///
/// The backing mapping `S` defaults to a `HashMap`; any [`Storage`]
/// implementation can be injected with [`Registry::with_storage`].
///
/// The registry does no locking. Wrap it in a `Mutex` or `RwLock` to share it
/// between threads.
pub struct Registry<K, V, S = HashMap<K, Vec<V>>> {
    storage: S,
    policy: CollisionPolicy,
    trace: Option<Arc<TraceCallback>>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    /// Empty `HashMap`-backed registry with the `Duplicate` policy.
    pub fn new() -> Self {
        Self::with_policy(CollisionPolicy::default())
    }

    /// Empty `HashMap`-backed registry with the given policy.
    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self::with_storage(HashMap::new(), policy)
    }
}

impl<K, V> Default for Registry<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Registry<K, V, S>
where
    V: PartialEq,
    S: Storage<K, V>,
{
    /// Registry over a caller-supplied backing mapping.
    ///
    /// Empty buckets already present in `storage` are dropped. Existing buckets
    /// are otherwise kept as they are; the policy only applies to values added
    /// from now on.
    ///
    /// ```
    /// use multi_registry::{CollisionPolicy, Registry};
    /// use std::collections::BTreeMap;
    ///
    /// let mut registry = Registry::with_storage(BTreeMap::new(), CollisionPolicy::Abort);
    /// registry.register(2, "two").unwrap();
    /// registry.register(1, "one").unwrap();
    ///
    /// let keys: Vec<_> = registry.keys().copied().collect();
    /// assert_eq!(keys, vec![1, 2]);
    /// ```
    pub fn with_storage(mut storage: S, policy: CollisionPolicy) -> Self {
        storage.retain_buckets(|_, values| !values.is_empty());
        Self {
            storage,
            policy,
            trace: None,
            _marker: PhantomData,
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked once per operation, after the operation took
    /// effect. Setting a new callback replaces the previous one.
    pub fn set_trace_callback(&mut self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        self.trace = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// Does not affect registered values.
    pub fn clear_trace_callback(&mut self) {
        self.trace = None;
    }

    /// Hand `event` to the trace callback and, with the `tracing` feature, to
    /// the `tracing` subscriber.
    fn emit_event(&self, event: &RegistryEvent) {
        #[cfg(feature = "tracing")]
        tracing::trace!(policy = %self.policy, event = %event, "registry operation");

        if let Some(callback) = self.trace.as_ref() {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Register `value` under `key`, creating the bucket if needed.
    ///
    /// Returns `Ok(true)` if the value was added and `Ok(false)` if the
    /// `Discard` policy dropped it.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Collision`] under `Abort` when an equal value is
    ///   already registered under `key`. The bucket is left unchanged.
    pub fn register(&mut self, key: K, value: V) -> Result<bool, RegistryError> {
        let result =
            Registration::new(self.storage.bucket_or_default(key), self.policy).add(value);

        if let Err(RegistryError::Collision { index }) = &result {
            self.emit_event(&RegistryEvent::Abort {
                existing: *index,
                added: 0,
            });
        } else if let Ok(added) = &result {
            self.emit_event(&RegistryEvent::Register {
                added: usize::from(*added),
                rejected: usize::from(!*added),
            });
        }

        result
    }

    /// Register every value of `values` under `key`, in iteration order.
    ///
    /// Each value is judged against the bucket as it stands when that value is
    /// added, so equal values within the batch collide with each other. Returns
    /// `Ok(true)` if at least one value was added. An empty batch creates no
    /// bucket.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Collision`] under `Abort` at the first colliding value.
    ///   Values of the batch added before it remain registered.
    pub fn register_all<I>(&mut self, key: K, values: I) -> Result<bool, RegistryError>
    where
        I: IntoIterator<Item = V>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            self.emit_event(&RegistryEvent::Register {
                added: 0,
                rejected: 0,
            });
            return Ok(false);
        }

        let mut attempted = 0usize;
        let mut registration = Registration::new(self.storage.bucket_or_default(key), self.policy);
        let before = registration.len();
        let result = registration.add_all(values.inspect(|_| attempted += 1));
        let added = registration.len() - before;

        if let Err(RegistryError::Collision { index }) = &result {
            self.emit_event(&RegistryEvent::Abort {
                existing: *index,
                added,
            });
        } else if result.is_ok() {
            self.emit_event(&RegistryEvent::Register {
                added,
                rejected: attempted - added,
            });
        }

        result
    }

    // -------------------------------------------------------------------------------------------------
    // Deregistration
    // -------------------------------------------------------------------------------------------------

    /// Remove the whole bucket registered under `key`.
    ///
    /// Returns the removed values, or an empty `Vec` if `key` was absent.
    pub fn deregister_key(&mut self, key: &K) -> Vec<V> {
        let removed = self.storage.remove_bucket(key);

        self.emit_event(&RegistryEvent::DeregisterKey {
            found: removed.is_some(),
            values: removed.as_ref().map_or(0, Vec::len),
        });

        removed.unwrap_or_default()
    }

    /// Remove the first value equal to `value` from the bucket under `key`.
    ///
    /// The bucket is dropped if it becomes empty. Returns `false` if `key` is
    /// absent or holds no equal value.
    pub fn deregister(&mut self, key: &K, value: &V) -> bool {
        self.deregister_in(key, |registration| usize::from(registration.remove(value))) > 0
    }

    /// Remove one occurrence of `value` from every bucket holding it.
    ///
    /// Returns `true` if at least one key held `value`. Buckets emptied by the
    /// removal are dropped during the same pass.
    pub fn deregister_value(&mut self, value: &V) -> bool {
        self.deregister_across(|registration| usize::from(registration.remove(value))) > 0
    }

    /// Remove each of `values` from the bucket under `key`, one at a time.
    ///
    /// Returns `true` if any removal succeeded; `false` if `key` is absent.
    pub fn deregister_all<I>(&mut self, key: &K, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<V>,
    {
        self.deregister_in(key, |registration| registration.remove_all(values)) > 0
    }

    /// Remove every value matching `predicate`, under every key.
    ///
    /// Returns `true` if anything was removed.
    ///
    /// ```
    /// use multi_registry::Registry;
    ///
    /// let mut registry = Registry::new();
    /// registry.register_all("even", [2, 4]).unwrap();
    /// registry.register_all("mixed", [1, 2, 3]).unwrap();
    ///
    /// assert!(registry.deregister_if(|v| v % 2 == 0));
    /// assert!(!registry.contains_key(&"even"));
    /// assert_eq!(registry.get(&"mixed"), Some(&[1, 3][..]));
    /// ```
    pub fn deregister_if<F>(&mut self, mut predicate: F) -> bool
    where
        F: FnMut(&V) -> bool,
    {
        self.deregister_across(|registration| registration.remove_if(&mut predicate)) > 0
    }

    /// Remove every value matching `predicate` from the bucket under `key`.
    ///
    /// An absent key is a no-op returning `false`, like every other key-scoped
    /// deregistration.
    pub fn deregister_key_if<F>(&mut self, key: &K, predicate: F) -> bool
    where
        F: FnMut(&V) -> bool,
    {
        self.deregister_in(key, |registration| registration.remove_if(predicate)) > 0
    }

    /// Run `remove` on the bucket under `key`, dropping the bucket if emptied.
    fn deregister_in<F>(&mut self, key: &K, remove: F) -> usize
    where
        F: FnOnce(&mut Registration<'_, V>) -> usize,
    {
        let (removed, dropped) = match self.storage.bucket_mut(key) {
            Some(values) => {
                let mut registration = Registration::new(values, self.policy);
                let removed = remove(&mut registration);
                (removed, registration.is_empty())
            }
            None => (0, false),
        };

        if dropped {
            self.storage.remove_bucket(key);
        }

        self.emit_event(&RegistryEvent::Deregister {
            removed,
            dropped: usize::from(dropped),
        });

        removed
    }

    /// Run `remove` on every bucket in one pass, dropping emptied buckets.
    fn deregister_across<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&mut Registration<'_, V>) -> usize,
    {
        let policy = self.policy;
        let mut removed = 0;
        let mut dropped = 0;

        self.storage.retain_buckets(|_, values| {
            let mut registration = Registration::new(values, policy);
            removed += remove(&mut registration);
            let keep = !registration.is_empty();
            if !keep {
                dropped += 1;
            }
            keep
        });

        self.emit_event(&RegistryEvent::Deregister { removed, dropped });

        removed
    }

    /// Remove every bucket.
    pub fn clear(&mut self) {
        self.emit_event(&RegistryEvent::Clear {});
        self.storage.clear();
    }

    // -------------------------------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------------------------------

    /// Values registered under `key`, in insertion order.
    ///
    /// Returns `None` for an unregistered key; never creates a bucket.
    pub fn get(&self, key: &K) -> Option<&[V]> {
        let values = self.storage.bucket(key).map(Vec::as_slice);
        self.emit_event(&RegistryEvent::Get {
            found: values.is_some(),
        });
        values
    }

    /// Values registered under `key`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::KeyNotFound`] if `key` is not registered.
    pub fn try_get(&self, key: &K) -> Result<&[V], RegistryError> {
        self.get(key).ok_or(RegistryError::KeyNotFound)
    }

    /// Whether `key` has at least one registered value.
    pub fn contains_key(&self, key: &K) -> bool {
        let found = self.storage.bucket(key).is_some();
        self.emit_event(&RegistryEvent::Contains { found });
        found
    }

    /// Whether a value equal to `value` is registered under `key`.
    pub fn contains(&self, key: &K, value: &V) -> bool {
        let found = self
            .storage
            .bucket(key)
            .is_some_and(|values| values.contains(value));
        self.emit_event(&RegistryEvent::Contains { found });
        found
    }

    /// Total number of values across all keys.
    pub fn len(&self) -> usize {
        self.storage.total_len()
    }

    /// Number of values registered under `key`, `0` if absent.
    pub fn len_of(&self, key: &K) -> usize {
        self.storage.bucket(key).map_or(0, Vec::len)
    }

    /// Whether no value is registered under any key.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether no value is registered under `key`.
    pub fn is_empty_of(&self, key: &K) -> bool {
        self.len_of(key) == 0
    }

    /// Number of registered keys.
    pub fn key_count(&self) -> usize {
        self.storage.bucket_count()
    }

    /// Registered keys, in the storage's iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.storage.buckets().map(|(key, _)| key)
    }

    /// `(key, values)` pairs, in the storage's iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.storage
            .buckets()
            .map(|(key, values)| (key, values.as_slice()))
    }

    // -------------------------------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------------------------------

    /// Collision policy fixed at construction.
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Read-only access to the backing mapping.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the registry and return the backing mapping.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<K, V, S> fmt::Debug for Registry<K, V, S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("storage", &self.storage)
            .field("policy", &self.policy)
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[test]
    fn test_register_creates_bucket_lazily() {
        let mut registry: Registry<&str, i32> = Registry::new();
        assert!(!registry.contains_key(&"a"));
        assert_eq!(registry.get(&"a"), None);
        assert!(!registry.contains_key(&"a"));

        assert_eq!(registry.register("a", 1), Ok(true));
        assert_eq!(registry.get(&"a"), Some(&[1][..]));
        assert_eq!(registry.key_count(), 1);
    }

    #[test]
    fn test_register_all_empty_batch_creates_no_bucket() {
        let mut registry: Registry<&str, i32> = Registry::new();
        assert_eq!(registry.register_all("a", Vec::new()), Ok(false));
        assert!(!registry.contains_key(&"a"));
        assert_eq!(registry.key_count(), 0);
    }

    #[test]
    fn test_abort_on_fresh_batch_keeps_first_value() {
        let mut registry = Registry::with_policy(CollisionPolicy::Abort);
        assert_eq!(
            registry.register_all("a", [7, 7]),
            Err(RegistryError::Collision { index: 0 })
        );
        assert_eq!(registry.get(&"a"), Some(&[7][..]));
    }

    #[test]
    fn test_deregister_drops_emptied_bucket() {
        let mut registry = Registry::new();
        registry.register("a", 1).unwrap();
        registry.register("a", 2).unwrap();

        assert!(registry.deregister(&"a", &1));
        assert!(registry.contains_key(&"a"));
        assert!(registry.deregister(&"a", &2));
        assert!(!registry.contains_key(&"a"));
        assert!(!registry.deregister(&"a", &2));
    }

    #[test]
    fn test_deregister_key_if_absent_key_is_noop() {
        let mut registry: Registry<&str, i32> = Registry::new();
        assert!(!registry.deregister_key_if(&"missing", |_| true));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_with_storage_drops_empty_buckets() {
        let mut storage = BTreeMap::new();
        storage.insert("empty", Vec::new());
        storage.insert("full", vec![1, 2]);

        let registry = Registry::with_storage(storage, CollisionPolicy::Discard);
        assert_eq!(registry.key_count(), 1);
        assert!(!registry.contains_key(&"empty"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.policy(), CollisionPolicy::Discard);
    }

    #[test]
    fn test_into_storage_returns_backing_map() {
        let mut registry = Registry::with_storage(BTreeMap::new(), CollisionPolicy::Duplicate);
        registry.register_all(1u8, ['x', 'y']).unwrap();

        let storage = registry.into_storage();
        assert_eq!(storage.get(&1), Some(&vec!['x', 'y']));
    }

    #[test]
    fn test_events_emitted_per_operation() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        let mut registry: Registry<&str, i32> = Registry::with_policy(CollisionPolicy::Discard);
        registry.set_trace_callback(move |event| {
            events_clone.lock().unwrap().push(event.clone());
        });

        registry.register_all("a", [1, 1, 2]).unwrap();
        registry.deregister_value(&1);
        let _ = registry.get(&"a");
        registry.deregister_key(&"a");

        let captured = events.lock().unwrap();
        assert_eq!(
            *captured,
            vec![
                RegistryEvent::Register {
                    added: 2,
                    rejected: 1
                },
                RegistryEvent::Deregister {
                    removed: 1,
                    dropped: 0
                },
                RegistryEvent::Get { found: true },
                RegistryEvent::DeregisterKey {
                    found: true,
                    values: 1
                },
            ]
        );
    }

    #[test]
    fn test_debug_format() {
        let mut registry = Registry::with_storage(BTreeMap::new(), CollisionPolicy::Abort);
        registry.register("k", 1).unwrap();
        assert_eq!(
            format!("{:?}", registry),
            r#"Registry { storage: {"k": [1]}, policy: Abort, traced: false }"#
        );
    }
}
