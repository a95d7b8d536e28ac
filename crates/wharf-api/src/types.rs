//! API request and response envelopes.
//!
//! Field names mirror the protocol's JSON form (camelCase), and the
//! "absent" conventions are preserved: an empty `pageToken` starts a new
//! sequence, and an empty `nextPageToken` marks the last page.

use crate::{ApiError, Result};
use serde::{Deserialize, Serialize};
use wharf_core::{GitCommit, Reference};
use wharf_registry::GitCommitPage;

/// Request for a single reference resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReferenceByNameRequest {
    /// Name of the requested reference.
    pub name: String,
    /// Owner of the repository the reference belongs to.
    pub owner: String,
    /// Name of the repository the reference belongs to.
    pub repository_name: String,
}

impl GetReferenceByNameRequest {
    /// Rejects the envelope before it reaches the service if a required
    /// field is missing.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("owner", &self.owner)?;
        require("repositoryName", &self.repository_name)?;
        Ok(())
    }
}

/// Response carrying the resolved reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReferenceByNameResponse {
    /// The resolved reference, exactly one variant populated.
    pub reference: Reference,
}

/// Request for one page of git commit history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGitCommitsForReferenceRequest {
    /// Name of the reference whose history is listed.
    pub reference: String,
    /// Owner of the repository the reference belongs to.
    pub owner: String,
    /// Name of the repository the reference belongs to.
    pub repository_name: String,
    /// Requested page size. Zero means a server-chosen default.
    #[serde(default)]
    pub page_size: u32,
    /// Continuation token from the previous page. Empty for the first
    /// page.
    #[serde(default)]
    pub page_token: String,
}

impl ListGitCommitsForReferenceRequest {
    /// Rejects the envelope before it reaches the service if a required
    /// field is missing.
    pub fn validate(&self) -> Result<()> {
        require("reference", &self.reference)?;
        require("owner", &self.owner)?;
        require("repositoryName", &self.repository_name)?;
        Ok(())
    }
}

/// Response carrying one page of git commit history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGitCommitsForReferenceResponse {
    /// Id of the commit the reference resolved to. Identical across all
    /// pages of one sequence. Empty when the listing targeted an empty
    /// repository.
    pub commit_id: String,
    /// Commit metadata for this page, newest first.
    pub git_commits: Vec<GitCommit>,
    /// There are no more pages if this is empty.
    pub next_page_token: String,
}

impl From<GitCommitPage> for ListGitCommitsForReferenceResponse {
    fn from(page: GitCommitPage) -> Self {
        Self {
            commit_id: page.commit_id.map(|id| id.to_hex()).unwrap_or_default(),
            git_commits: page.git_commits,
            next_page_token: page.next_page_token.unwrap_or_default(),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ApiError::InvalidArgument(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}
