//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Persistence failed: {0}")]
    Persistence(#[from] RepoError),
}

impl DomainError {
    pub(crate) fn post_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id,
        }
    }

    /// Map a repository error, turning a missing record into `NotFound` for `id`.
    pub(crate) fn from_repo(err: RepoError, id: Uuid) -> Self {
        match err {
            RepoError::NotFound => Self::post_not_found(id),
            other => DomainError::Persistence(other),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Storage connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
