//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use wharf_registry::RegistryError;

/// Errors that can occur in the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A required request field was missing or invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The supplied page token was unusable. The client must restart
    /// pagination from an empty token.
    #[error("invalid page token: {0}")]
    InvalidPageToken(String),

    /// The backing store failed; the request may be retried.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// A specialized Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { .. } => Self::NotFound(err.to_string()),
            RegistryError::InvalidArgument { .. } => Self::InvalidArgument(err.to_string()),
            RegistryError::InvalidPageToken(message) => Self::InvalidPageToken(message),
            RegistryError::Store(inner) => Self::Unavailable(inner.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "invalid_argument"),
            Self::InvalidPageToken(_) => (StatusCode::BAD_REQUEST, "invalid_page_token"),
            Self::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wharf_store::StoreError;

    #[test]
    fn registry_errors_map_to_api_classes() {
        let err: ApiError = RegistryError::not_found("reference", "ghost").into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = RegistryError::invalid_argument("name", "must not be empty").into();
        assert!(matches!(err, ApiError::InvalidArgument(_)));

        let err: ApiError = RegistryError::invalid_page_token("mangled").into();
        assert!(matches!(err, ApiError::InvalidPageToken(_)));

        let err: ApiError =
            RegistryError::Store(StoreError::Inconsistent("broken".into())).into();
        assert!(matches!(err, ApiError::Unavailable(_)));
    }
}
