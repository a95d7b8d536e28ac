//! API request handlers.

use crate::types::{
    GetReferenceByNameRequest, GetReferenceByNameResponse, ListGitCommitsForReferenceRequest,
    ListGitCommitsForReferenceResponse,
};
use crate::{ApiError, AppState};
use axum::extract::State;
use axum::Json;

/// Health check endpoint.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Resolves a reference name to a concrete reference.
pub async fn get_reference_by_name(
    State(state): State<AppState>,
    Json(request): Json<GetReferenceByNameRequest>,
) -> Result<Json<GetReferenceByNameResponse>, ApiError> {
    request.validate()?;

    let reference = state.service.get_reference_by_name(
        &request.name,
        &request.owner,
        &request.repository_name,
    )?;

    Ok(Json(GetReferenceByNameResponse { reference }))
}

/// Lists one page of git commits for a reference.
pub async fn list_git_commits_for_reference(
    State(state): State<AppState>,
    Json(request): Json<ListGitCommitsForReferenceRequest>,
) -> Result<Json<ListGitCommitsForReferenceResponse>, ApiError> {
    request.validate()?;

    let page = state.service.list_git_commits_for_reference(
        &request.reference,
        &request.owner,
        &request.repository_name,
        request.page_size,
        &request.page_token,
    )?;

    Ok(Json(page.into()))
}
