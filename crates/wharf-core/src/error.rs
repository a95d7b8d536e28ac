//! Error types for Wharf core operations.

use thiserror::Error;

/// The main error type for Wharf core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested resource was not found.
    #[error("not found: {resource_type} '{id}'")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: &'static str,
        /// The identifier of the resource.
        id: String,
    },

    /// The provided input was invalid.
    #[error("invalid input: {field} - {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: &'static str,
        /// A description of why the input was invalid.
        message: String,
    },

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for Wharf core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new not found error.
    #[must_use]
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Creates a new invalid input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}
