//! Commit ancestry walking.

use crate::{Result, StoreError};
use std::collections::HashMap;
use wharf_core::{CommitId, GitCommit};

/// A lazy walk over a commit's ancestry, newest first.
///
/// The walk follows first parents starting at an anchor commit. It
/// operates on a snapshot of the commit graph taken when the walk was
/// created; since commits are immutable, the same anchor always yields
/// the same sequence, which is what lets a paginated listing resume from
/// a plain offset.
pub struct AncestryWalk {
    commits: HashMap<CommitId, GitCommit>,
    next: Option<CommitId>,
}

impl AncestryWalk {
    /// Creates a walk anchored at `anchor` over the given graph snapshot.
    #[must_use]
    pub fn new(commits: HashMap<CommitId, GitCommit>, anchor: CommitId) -> Self {
        Self {
            commits,
            next: Some(anchor),
        }
    }
}

impl Iterator for AncestryWalk {
    type Item = Result<GitCommit>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        match self.commits.get(&id) {
            Some(commit) => {
                self.next = commit.first_parent();
                Some(Ok(commit.clone()))
            }
            None => Some(Err(StoreError::Inconsistent(format!(
                "ancestry reached unknown commit {}",
                id
            )))),
        }
    }
}
