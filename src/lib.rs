//! # Multi Registry
//!
//! A generic multi-value registry: keys mapped to ordered buckets of values,
//! with a configurable [`CollisionPolicy`] deciding what happens when a value
//! equal to one already registered is added under the same key.
//!
//! ## Quick Start
//!
//! ```rust
//! use multi_registry::{CollisionPolicy, Registry, RegistryError};
//!
//! let mut registry = Registry::with_policy(CollisionPolicy::Abort);
//!
//! registry.register("handlers", "log").unwrap();
//! registry.register("handlers", "audit").unwrap();
//!
//! // Registering an equal value again fails under `Abort`
//! assert_eq!(
//!     registry.register("handlers", "log"),
//!     Err(RegistryError::Collision { index: 0 })
//! );
//! assert_eq!(registry.get(&"handlers"), Some(&["log", "audit"][..]));
//! ```
//!
//! ## Features
//!
//! - **Collision policies**: `Duplicate` (default), `Discard` and `Abort`
//! - **No empty buckets**: a key disappears as soon as its last value is removed
//! - **Pluggable storage**: `HashMap` by default, `BTreeMap` or any [`Storage`] implementation
//! - **Tracing support**: optional callback for monitoring registry operations,
//!   forwarded to `tracing` when the `tracing` feature is enabled (default)
//!
//! ## Main Types
//!
//! - [`Registry`] - The registry itself
//! - [`CollisionPolicy`] - Collision handling strategy
//! - [`Storage`] - Backing mapping abstraction
//! - [`RegistryError`] - Errors returned by registry operations
//! - [`RegistryEvent`] - Events passed to the trace callback

mod collision_policy;
mod registration;
mod registry;
mod registry_error;
mod registry_event;
mod storage;

// Re-export the main public API
pub use collision_policy::CollisionPolicy;
pub use registry::{Registry, TraceCallback};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use storage::Storage;
