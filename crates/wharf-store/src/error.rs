//! Storage error types.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The repository does not exist.
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    /// A repository with the same owner and name already exists.
    #[error("repository already exists: {0}")]
    RepositoryExists(String),

    /// A commit id was referenced but is not in the graph.
    #[error("commit not found: {0}")]
    CommitNotFound(String),

    /// The stored graph contradicts itself, e.g. a reference points at a
    /// commit that was never stored.
    #[error("store inconsistency: {0}")]
    Inconsistent(String),
}

/// A specialized Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
