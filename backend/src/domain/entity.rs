//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// Name used in error messages ("Entry", "Template", ...)
    const KIND: &'static str;

    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Display + Send + Sync + 'static;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Serializable so a failure can cross the command boundary unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "message")]
pub enum DomainError {
    /// Entry, template or tag id unknown to the store
    #[error("Not found: {0}")]
    NotFound(String),
    /// Rejected before any write was attempted
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    /// Batch reorder rejected, e.g. the template changed underneath the caller
    #[error("Conflict during reorder: {0}")]
    ConflictDuringReorder(String),
    /// Storage unavailable or failing
    #[error("Transport failure: {0}")]
    TransportFailure(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::ValidationFailed(msg.into())
    }

    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound(format!("{} {} not found", what, id))
    }
}
