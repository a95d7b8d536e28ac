//! Registry error taxonomy.

use thiserror::Error;
use wharf_store::StoreError;

/// Errors produced by the reference service.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required request field was missing or empty.
    #[error("invalid argument: {field} - {message}")]
    InvalidArgument {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// The name did not resolve to any reference in the repository, or
    /// the repository itself does not exist.
    #[error("not found: {resource_type} '{id}'")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: &'static str,
        /// The identifier of the resource.
        id: String,
    },

    /// The page token was malformed, tampered with, or anchored to a
    /// commit that no longer exists. The client must restart pagination
    /// from an empty token.
    #[error("invalid page token: {0}")]
    InvalidPageToken(String),

    /// The storage collaborator failed. Both operations are
    /// side-effect-free, so callers may safely retry.
    #[error("store error: {0}")]
    Store(StoreError),
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// Creates a new invalid argument error.
    #[must_use]
    pub fn invalid_argument(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    /// Creates a new not found error.
    #[must_use]
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Creates a new invalid page token error.
    #[must_use]
    pub fn invalid_page_token(message: impl Into<String>) -> Self {
        Self::InvalidPageToken(message.into())
    }
}

impl From<StoreError> for RegistryError {
    /// A missing repository is a caller-visible NotFound; every other
    /// store failure stays in the transient class.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RepositoryNotFound(key) => Self::not_found("repository", key),
            other => Self::Store(other),
        }
    }
}
