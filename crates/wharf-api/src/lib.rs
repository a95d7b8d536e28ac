//! # Wharf API
//!
//! HTTP surface for the Wharf reference service.
//!
//! Exposes the two registry operations as JSON-over-POST endpoints in
//! the RPC path style, plus a health probe:
//!
//! - `POST /registry.v1.ReferenceService/GetReferenceByName`
//! - `POST /registry.v1.ReferenceService/ListGitCommitsForReference`
//! - `GET /health`
//!
//! Both operations are side-effect-free, so transport-level retries are
//! always safe.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod handlers;
mod router;
mod types;

pub use error::{ApiError, Result};
pub use router::{create_router, AppState};
pub use types::{
    GetReferenceByNameRequest, GetReferenceByNameResponse, ListGitCommitsForReferenceRequest,
    ListGitCommitsForReferenceResponse,
};

/// Default API port.
pub const DEFAULT_API_PORT: u16 = 8080;
