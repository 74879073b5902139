//! Collision handling for values added under an already registered key.
//!
//! A collision is an attempt to add a value that is already present (by
//! `PartialEq`) in the target bucket. The policy is fixed when a registry is
//! built and shared by all of its buckets.

use std::fmt;
use std::str::FromStr;

use crate::RegistryError;

/// Strategy deciding what happens when an equal value is added to a bucket.
///
/// # Examples
///
/// ```rust
/// use multi_registry::CollisionPolicy;
///
/// let mut bucket = vec![1];
/// assert_eq!(CollisionPolicy::Duplicate.handle_add(&mut bucket, 1), Ok(true));
/// assert_eq!(CollisionPolicy::Discard.handle_add(&mut bucket, 1), Ok(false));
/// assert!(CollisionPolicy::Abort.handle_add(&mut bucket, 1).is_err());
/// assert_eq!(bucket, vec![1, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionPolicy {
    /// Always append, equal values are kept side by side.
    #[default]
    Duplicate,
    /// Ignore the value silently if an equal one is present.
    Discard,
    /// Fail with [`RegistryError::Collision`] if an equal value is present.
    Abort,
}

impl CollisionPolicy {
    /// Add `value` to `bucket` according to the policy.
    ///
    /// Returns `Ok(true)` if the value was appended, `Ok(false)` if `Discard`
    /// dropped it.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Collision`] under `Abort` when an equal value is present.
    ///   The bucket is left untouched.
    pub fn handle_add<V: PartialEq>(
        self,
        bucket: &mut Vec<V>,
        value: V,
    ) -> Result<bool, RegistryError> {
        match self {
            CollisionPolicy::Duplicate => {}
            CollisionPolicy::Discard => {
                if bucket.contains(&value) {
                    return Ok(false);
                }
            }
            CollisionPolicy::Abort => {
                if let Some(index) = bucket.iter().position(|v| *v == value) {
                    return Err(RegistryError::Collision { index });
                }
            }
        }

        bucket.push(value);
        Ok(true)
    }

    /// Add every value of `values` in iteration order.
    ///
    /// Each value is judged against the bucket as it stands at that moment, so
    /// equal values within one batch collide with each other. Returns `Ok(true)`
    /// if at least one value was appended.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Collision`] under `Abort` at the first colliding value.
    ///   Values appended before it stay in the bucket.
    pub fn handle_add_all<V, I>(self, bucket: &mut Vec<V>, values: I) -> Result<bool, RegistryError>
    where
        V: PartialEq,
        I: IntoIterator<Item = V>,
    {
        let mut added = false;
        for value in values {
            added |= self.handle_add(bucket, value)?;
        }
        Ok(added)
    }

    /// Lowercase name used by `Display` and accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            CollisionPolicy::Duplicate => "duplicate",
            CollisionPolicy::Discard => "discard",
            CollisionPolicy::Abort => "abort",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollisionPolicy {
    type Err = RegistryError;

    /// Parses `duplicate`, `discard` or `abort`, ignoring ASCII case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        [
            CollisionPolicy::Duplicate,
            CollisionPolicy::Discard,
            CollisionPolicy::Abort,
        ]
        .into_iter()
        .find(|policy| policy.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| RegistryError::UnknownPolicy {
            name: name.to_string(),
        })
    }
}
