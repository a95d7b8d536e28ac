//! API router configuration.

use crate::handlers;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use wharf_registry::ReferenceService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The reference service backing both endpoints.
    pub service: ReferenceService,
}

impl AppState {
    /// Creates application state around a service.
    #[must_use]
    pub fn new(service: ReferenceService) -> Self {
        Self { service }
    }
}

/// Creates the API router.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/registry.v1.ReferenceService/GetReferenceByName",
            post(handlers::get_reference_by_name),
        )
        .route(
            "/registry.v1.ReferenceService/ListGitCommitsForReference",
            post(handlers::list_git_commits_for_reference),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
