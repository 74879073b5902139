/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use multi_registry::RegistryEvent;
///
/// let event = RegistryEvent::Register { added: 1, rejected: 0 };
/// println!("{}", event);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// One or more values were offered under a key.
    Register {
        /// Values appended to the bucket
        added: usize,
        /// Values the collision policy discarded
        rejected: usize,
    },

    /// The `Abort` policy stopped a registration.
    Abort {
        /// Position of the equal value already in the bucket
        existing: usize,
        /// Values of the same batch appended before the collision
        added: usize,
    },

    /// Values were removed from one or more buckets.
    Deregister {
        /// Values removed
        removed: usize,
        /// Buckets dropped because they became empty
        dropped: usize,
    },

    /// A whole key was removed.
    DeregisterKey {
        /// Whether the key was registered
        found: bool,
        /// Number of values the bucket held
        values: usize,
    },

    /// A bucket was requested from the registry.
    Get {
        /// Whether the key was registered
        found: bool,
    },

    /// A key or key/value existence check was performed.
    Contains {
        /// Whether the key (or value under it) was registered
        found: bool,
    },

    /// The registry was cleared.
    Clear {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register { added, rejected } => {
                write!(f, "register {{ added: {}, rejected: {} }}", added, rejected)
            }
            RegistryEvent::Abort { existing, added } => {
                write!(f, "abort {{ existing: {}, added: {} }}", existing, added)
            }
            RegistryEvent::Deregister { removed, dropped } => {
                write!(
                    f,
                    "deregister {{ removed: {}, dropped: {} }}",
                    removed, dropped
                )
            }
            RegistryEvent::DeregisterKey { found, values } => {
                write!(
                    f,
                    "deregister_key {{ found: {}, values: {} }}",
                    found, values
                )
            }
            RegistryEvent::Get { found } => write!(f, "get {{ found: {} }}", found),
            RegistryEvent::Contains { found } => {
                write!(f, "contains {{ found: {} }}", found)
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}
