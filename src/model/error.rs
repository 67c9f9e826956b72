//! Error types for registry operations.

use thiserror::Error;

/// Errors raised while interning or declaring entities.
///
/// Namespace and name errors are detected before the registry is mutated, so a
/// failed call leaves the intern table and every entity untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The namespace argument was not `None`, `Root` or a live entity handle
    /// of this registry (e.g. a handle from another registry or from before a reset).
    #[error("Invalid namespace kind: {found}")]
    InvalidNamespaceKind { found: String },

    /// The declared name has an empty leaf segment.
    #[error("Empty name in declaration: {name:?}")]
    EmptyName { name: String },

    /// The arena has no handle left for another entity.
    #[error("Registry capacity exceeded: cannot allocate entity #{index}")]
    CapacityExceeded { index: usize },
}

impl RegistryError {
    /// Create an invalid namespace error.
    pub fn invalid_namespace(found: impl Into<String>) -> Self {
        Self::InvalidNamespaceKind {
            found: found.into(),
        }
    }

    /// Create an empty name error.
    pub fn empty_name(name: impl Into<String>) -> Self {
        Self::EmptyName { name: name.into() }
    }

    /// Create a capacity error for the arena slot that could not be addressed.
    pub fn capacity_exceeded(index: usize) -> Self {
        Self::CapacityExceeded { index }
    }
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
