//! Thread-safe in-memory store.

use crate::{AncestryWalk, RegistryStore, Repository, Result, StoreError};
use parking_lot::RwLock;
use std::collections::HashMap;
use wharf_core::{
    CommitId, GitCommit, GitIdentity, RepositoryBranch, RepositoryDraft, RepositoryTag,
};

/// Everything stored for one repository.
#[derive(Debug, Default)]
struct RepoRecord {
    repository: Option<Repository>,
    commits: HashMap<CommitId, GitCommit>,
    branches: HashMap<String, CommitId>,
    tags: HashMap<String, CommitId>,
    drafts: HashMap<String, CommitId>,
    /// Latest commit on the default line.
    head: Option<CommitId>,
}

/// In-memory registry store.
///
/// All reads take a shared lock and clone out value types, so concurrent
/// resolutions and listings never observe partial mutations.
#[derive(Default)]
pub struct MemoryStore {
    repos: RwLock<HashMap<String, RepoRecord>>,
}

fn repo_key(owner: &str, name: &str) -> String {
    format!("{}/{}", owner, name)
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository.
    pub fn create_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let mut repos = self.repos.write();
        let key = repo_key(owner, name);

        let record = repos.entry(key.clone()).or_default();
        if record.repository.is_some() {
            return Err(StoreError::RepositoryExists(key));
        }

        let repository = Repository::new(owner, name);
        record.repository = Some(repository.clone());
        tracing::debug!(repository = %key, "created repository");
        Ok(repository)
    }

    /// Appends a commit to the repository's default line and returns it.
    pub fn push_commit(
        &self,
        owner: &str,
        name: &str,
        author: GitIdentity,
        message: impl Into<String>,
    ) -> Result<GitCommit> {
        let mut repos = self.repos.write();
        let record = Self::record_mut(&mut repos, owner, name)?;

        let parents = record.head.into_iter().collect();
        let commit = GitCommit::new(parents, author.clone(), author, message);
        record.head = Some(commit.id);
        record.commits.insert(commit.id, commit.clone());
        Ok(commit)
    }

    /// Creates or moves a branch to point at an existing commit.
    pub fn set_branch(&self, owner: &str, name: &str, branch: &str, target: CommitId) -> Result<()> {
        self.set_pointer(owner, name, target, |record| {
            record.branches.insert(branch.to_string(), target);
        })
    }

    /// Creates a tag pointing at an existing commit.
    pub fn set_tag(&self, owner: &str, name: &str, tag: &str, target: CommitId) -> Result<()> {
        self.set_pointer(owner, name, target, |record| {
            record.tags.insert(tag.to_string(), target);
        })
    }

    /// Creates or re-points a draft at an existing commit.
    ///
    /// Drafts are mutable by design, so calling this twice with the same
    /// label simply moves the pointer.
    pub fn set_draft(&self, owner: &str, name: &str, draft: &str, target: CommitId) -> Result<()> {
        self.set_pointer(owner, name, target, |record| {
            record.drafts.insert(draft.to_string(), target);
        })
    }

    fn set_pointer(
        &self,
        owner: &str,
        name: &str,
        target: CommitId,
        apply: impl FnOnce(&mut RepoRecord),
    ) -> Result<()> {
        let mut repos = self.repos.write();
        let record = Self::record_mut(&mut repos, owner, name)?;
        if !record.commits.contains_key(&target) {
            return Err(StoreError::CommitNotFound(target.to_hex()));
        }
        apply(record);
        Ok(())
    }

    fn record_mut<'a>(
        repos: &'a mut HashMap<String, RepoRecord>,
        owner: &str,
        name: &str,
    ) -> Result<&'a mut RepoRecord> {
        let key = repo_key(owner, name);
        match repos.get_mut(&key) {
            Some(record) if record.repository.is_some() => Ok(record),
            _ => Err(StoreError::RepositoryNotFound(key)),
        }
    }

    fn with_record<T>(
        &self,
        owner: &str,
        name: &str,
        read: impl FnOnce(&RepoRecord) -> T,
    ) -> Result<T> {
        let repos = self.repos.read();
        let key = repo_key(owner, name);
        match repos.get(&key) {
            Some(record) if record.repository.is_some() => Ok(read(record)),
            _ => Err(StoreError::RepositoryNotFound(key)),
        }
    }

    fn named_commit(record: &RepoRecord, pointer: Option<&CommitId>) -> Result<Option<GitCommit>> {
        match pointer {
            Some(id) => match record.commits.get(id) {
                Some(commit) => Ok(Some(commit.clone())),
                None => Err(StoreError::Inconsistent(format!(
                    "reference points at unknown commit {}",
                    id
                ))),
            },
            None => Ok(None),
        }
    }
}

impl RegistryStore for MemoryStore {
    fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        self.with_record(owner, name, |record| {
            record.repository.clone().expect("record has repository")
        })
    }

    fn branch(&self, owner: &str, name: &str, branch: &str) -> Result<Option<RepositoryBranch>> {
        self.with_record(owner, name, |record| {
            Self::named_commit(record, record.branches.get(branch)).map(|commit| {
                commit.map(|commit| RepositoryBranch {
                    name: branch.to_string(),
                    commit,
                })
            })
        })?
    }

    fn tag(&self, owner: &str, name: &str, tag: &str) -> Result<Option<RepositoryTag>> {
        self.with_record(owner, name, |record| {
            Self::named_commit(record, record.tags.get(tag)).map(|commit| {
                commit.map(|commit| RepositoryTag {
                    name: tag.to_string(),
                    commit,
                })
            })
        })?
    }

    fn draft(&self, owner: &str, name: &str, draft: &str) -> Result<Option<RepositoryDraft>> {
        self.with_record(owner, name, |record| {
            Self::named_commit(record, record.drafts.get(draft)).map(|commit| {
                commit.map(|commit| RepositoryDraft {
                    name: draft.to_string(),
                    commit,
                })
            })
        })?
    }

    fn commit(&self, owner: &str, name: &str, id: &CommitId) -> Result<Option<GitCommit>> {
        self.with_record(owner, name, |record| record.commits.get(id).cloned())
    }

    fn latest_commit(&self, owner: &str, name: &str) -> Result<Option<GitCommit>> {
        self.with_record(owner, name, |record| {
            Self::named_commit(record, record.head.as_ref())
        })?
    }

    fn ancestry(&self, owner: &str, name: &str, anchor: &CommitId) -> Result<AncestryWalk> {
        let (commits, known) = self.with_record(owner, name, |record| {
            (
                record.commits.clone(),
                record.commits.contains_key(anchor),
            )
        })?;
        if !known {
            return Err(StoreError::CommitNotFound(anchor.to_hex()));
        }
        Ok(AncestryWalk::new(commits, *anchor))
    }
}
