//! Git commit metadata.

use crate::{CommitId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// The author or committer of a git commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitIdentity {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// When the identity acted.
    pub time: Timestamp,
}

impl GitIdentity {
    /// Creates a new identity.
    pub fn new(name: impl Into<String>, email: impl Into<String>, time: Timestamp) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            time,
        }
    }

    /// Renders the identity in git's `name <email> time` form.
    #[must_use]
    pub fn to_git_line(&self) -> String {
        format!("{} <{}> {} +0000", self.name, self.email, self.time.as_secs())
    }
}

/// Metadata for a single git commit.
///
/// Carries everything the registry reports about a commit: its id, its
/// parents, who wrote and recorded it, and the message. The parent list
/// is what ancestry walks follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommit {
    /// The commit's identifier.
    pub id: CommitId,
    /// Parent commit ids, first parent first. Empty for a root commit.
    pub parents: Vec<CommitId>,
    /// Who wrote the change.
    pub author: GitIdentity,
    /// Who recorded the change.
    pub committer: GitIdentity,
    /// The commit message.
    pub message: String,
}

impl GitCommit {
    /// Creates a new commit, computing its id from the content.
    ///
    /// The id is the SHA-1 of a git-style commit encoding, so two commits
    /// with identical content and parents share an id.
    pub fn new(
        parents: Vec<CommitId>,
        author: GitIdentity,
        committer: GitIdentity,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let mut content = String::new();
        for parent in &parents {
            let _ = writeln!(content, "parent {}", parent);
        }
        let _ = writeln!(content, "author {}", author.to_git_line());
        let _ = writeln!(content, "committer {}", committer.to_git_line());
        let _ = write!(content, "\n{}", message);
        let id = CommitId::hash_commit(content.as_bytes());

        Self {
            id,
            parents,
            author,
            committer,
            message,
        }
    }

    /// Returns the first parent, if any.
    #[must_use]
    pub fn first_parent(&self) -> Option<CommitId> {
        self.parents.first().copied()
    }

    /// Returns true if this is a root commit.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns the first line of the commit message.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
