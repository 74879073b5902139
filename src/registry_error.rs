use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RegistryError {
    /// The `Abort` policy found an equal value already registered at `index`.
    Collision { index: usize },
    KeyNotFound,
    UnknownPolicy { name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Collision { index } => write!(
                f,
                "Registration aborted: equal value already registered at index {}",
                index
            ),
            RegistryError::KeyNotFound => write!(f, "Key not found in registry"),
            RegistryError::UnknownPolicy { name } => {
                write!(f, "Unknown collision policy: {}", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
