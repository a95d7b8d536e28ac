//! The storage interface the registry core depends on.

use crate::{AncestryWalk, Repository, Result};
use std::sync::Arc;
use wharf_core::{CommitId, GitCommit, RepositoryBranch, RepositoryDraft, RepositoryTag};

/// Read access to repositories, references, and commit history.
///
/// Every method is scoped to an `(owner, repository)` pair and returns
/// `RepositoryNotFound` if that pair does not name a repository. Lookups
/// of individual references return `Ok(None)` when the repository exists
/// but the reference does not; the resolution layer decides what that
/// means.
pub trait RegistryStore: Send + Sync {
    /// Fetches a repository record.
    fn repository(&self, owner: &str, name: &str) -> Result<Repository>;

    /// Looks up a branch by name.
    fn branch(&self, owner: &str, name: &str, branch: &str) -> Result<Option<RepositoryBranch>>;

    /// Looks up a tag by name.
    fn tag(&self, owner: &str, name: &str, tag: &str) -> Result<Option<RepositoryTag>>;

    /// Looks up a draft by label, yielding its current target.
    fn draft(&self, owner: &str, name: &str, draft: &str) -> Result<Option<RepositoryDraft>>;

    /// Looks up a commit by id.
    fn commit(&self, owner: &str, name: &str, id: &CommitId) -> Result<Option<GitCommit>>;

    /// Returns the latest commit on the repository's default line, or
    /// `None` if the repository has no commits.
    fn latest_commit(&self, owner: &str, name: &str) -> Result<Option<GitCommit>>;

    /// Starts an ancestry walk at the given anchor commit.
    fn ancestry(&self, owner: &str, name: &str, anchor: &CommitId) -> Result<AncestryWalk>;
}

impl<T: RegistryStore + ?Sized> RegistryStore for Arc<T> {
    fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        (**self).repository(owner, name)
    }

    fn branch(&self, owner: &str, name: &str, branch: &str) -> Result<Option<RepositoryBranch>> {
        (**self).branch(owner, name, branch)
    }

    fn tag(&self, owner: &str, name: &str, tag: &str) -> Result<Option<RepositoryTag>> {
        (**self).tag(owner, name, tag)
    }

    fn draft(&self, owner: &str, name: &str, draft: &str) -> Result<Option<RepositoryDraft>> {
        (**self).draft(owner, name, draft)
    }

    fn commit(&self, owner: &str, name: &str, id: &CommitId) -> Result<Option<GitCommit>> {
        (**self).commit(owner, name, id)
    }

    fn latest_commit(&self, owner: &str, name: &str) -> Result<Option<GitCommit>> {
        (**self).latest_commit(owner, name)
    }

    fn ancestry(&self, owner: &str, name: &str, anchor: &CommitId) -> Result<AncestryWalk> {
        (**self).ancestry(owner, name, anchor)
    }
}
