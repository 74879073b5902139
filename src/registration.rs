//! Policy-enforcing view over a single bucket.

use std::borrow::Borrow;

use crate::{CollisionPolicy, RegistryError};

/// Borrowed bucket paired with the registry's collision policy.
///
/// Adds go through the policy, removals act on the raw sequence.
pub(crate) struct Registration<'a, V> {
    values: &'a mut Vec<V>,
    policy: CollisionPolicy,
}

impl<'a, V: PartialEq> Registration<'a, V> {
    pub(crate) fn new(values: &'a mut Vec<V>, policy: CollisionPolicy) -> Self {
        Self { values, policy }
    }

    pub(crate) fn add(&mut self, value: V) -> Result<bool, RegistryError> {
        self.policy.handle_add(self.values, value)
    }

    pub(crate) fn add_all<I>(&mut self, values: I) -> Result<bool, RegistryError>
    where
        I: IntoIterator<Item = V>,
    {
        self.policy.handle_add_all(self.values, values)
    }

    /// Remove the first value equal to `value`.
    pub(crate) fn remove(&mut self, value: &V) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove each of `values` one at a time, returning how many were found.
    pub(crate) fn remove_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator,
        I::Item: Borrow<V>,
    {
        let mut removed = 0;
        for value in values {
            if self.remove(value.borrow()) {
                removed += 1;
            }
        }
        removed
    }

    /// Remove every value matching `predicate`, returning how many were removed.
    pub(crate) fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let before = self.values.len();
        self.values.retain(|v| !predicate(v));
        before - self.values.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
