//! The resolved-reference model.
//!
//! A human-supplied name scoped to `owner/repository` resolves to exactly
//! one of a closed set of reference kinds. The kinds are mutually
//! exclusive by construction: [`Reference`] is an enum, never a bag of
//! optional fields, so "unresolved" cannot be represented and must be
//! reported as an error by the resolution layer instead.

use crate::{CommitId, GitCommit, MAIN_REFERENCE_NAME};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A repository branch and the commit at its head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryBranch {
    /// Branch name.
    pub name: String,
    /// The commit the branch currently points at.
    pub commit: GitCommit,
}

/// A repository tag and the commit it marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryTag {
    /// Tag name.
    pub name: String,
    /// The tagged commit.
    pub commit: GitCommit,
}

/// The repository's default reference.
///
/// Not a persisted entity. It is computed at resolution time as a view
/// over the latest commit on the repository's default line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMainReference {
    /// Always `"main"`.
    pub name: String,
    /// The latest commit in the repository. `None` only when the
    /// repository has no commits at all.
    pub commit: Option<GitCommit>,
}

impl RepositoryMainReference {
    /// Creates the default reference view for a repository.
    pub fn new(commit: Option<GitCommit>) -> Self {
        Self {
            name: MAIN_REFERENCE_NAME.to_string(),
            commit,
        }
    }
}

/// A named draft commit.
///
/// Drafts are mutable pointers. The same name may target different
/// commits over time, and resolving one always yields its current
/// target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDraft {
    /// User-chosen draft label.
    pub name: String,
    /// The commit the draft currently points at.
    pub commit: GitCommit,
}

/// The kind of a resolved reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// A repository branch.
    Branch,
    /// A repository tag.
    Tag,
    /// A direct commit.
    Commit,
    /// The default reference.
    Main,
    /// A named draft.
    Draft,
}

impl ReferenceKind {
    /// Returns the lowercase name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Tag => "tag",
            Self::Commit => "commit",
            Self::Main => "main",
            Self::Draft => "draft",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The thing a reference name resolved to.
///
/// Exactly one case is populated at any time. Serialized with the case
/// name as the outer key, so a branch renders as
/// `{"branch": {"name": ..., "commit": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reference {
    /// The requested reference is a branch.
    Branch(RepositoryBranch),
    /// The requested reference is a tag.
    Tag(RepositoryTag),
    /// The requested reference is a commit.
    Commit(GitCommit),
    /// The requested reference is the default reference.
    Main(RepositoryMainReference),
    /// The requested reference is a draft commit.
    Draft(RepositoryDraft),
}

impl Reference {
    /// Returns the kind of this reference.
    #[must_use]
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Self::Branch(_) => ReferenceKind::Branch,
            Self::Tag(_) => ReferenceKind::Tag,
            Self::Commit(_) => ReferenceKind::Commit,
            Self::Main(_) => ReferenceKind::Main,
            Self::Draft(_) => ReferenceKind::Draft,
        }
    }

    /// Returns the name the reference carries, if it has one.
    ///
    /// Direct commit references are identified by their id rather than a
    /// name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Branch(branch) => Some(&branch.name),
            Self::Tag(tag) => Some(&tag.name),
            Self::Commit(_) => None,
            Self::Main(main) => Some(&main.name),
            Self::Draft(draft) => Some(&draft.name),
        }
    }

    /// Returns the commit this reference pins.
    ///
    /// `None` only for the default reference of an empty repository.
    #[must_use]
    pub fn commit(&self) -> Option<&GitCommit> {
        match self {
            Self::Branch(branch) => Some(&branch.commit),
            Self::Tag(tag) => Some(&tag.commit),
            Self::Commit(commit) => Some(commit),
            Self::Main(main) => main.commit.as_ref(),
            Self::Draft(draft) => Some(&draft.commit),
        }
    }

    /// Returns the id of the pinned commit, if any.
    #[must_use]
    pub fn commit_id(&self) -> Option<CommitId> {
        self.commit().map(|c| c.id)
    }

    /// Returns the branch if this is a branch reference.
    #[must_use]
    pub fn as_branch(&self) -> Option<&RepositoryBranch> {
        match self {
            Self::Branch(branch) => Some(branch),
            _ => None,
        }
    }

    /// Returns the tag if this is a tag reference.
    #[must_use]
    pub fn as_tag(&self) -> Option<&RepositoryTag> {
        match self {
            Self::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Returns the commit if this is a direct commit reference.
    #[must_use]
    pub fn as_commit(&self) -> Option<&GitCommit> {
        match self {
            Self::Commit(commit) => Some(commit),
            _ => None,
        }
    }

    /// Returns the default reference if this is one.
    #[must_use]
    pub fn as_main(&self) -> Option<&RepositoryMainReference> {
        match self {
            Self::Main(main) => Some(main),
            _ => None,
        }
    }

    /// Returns the draft if this is a draft reference.
    #[must_use]
    pub fn as_draft(&self) -> Option<&RepositoryDraft> {
        match self {
            Self::Draft(draft) => Some(draft),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GitIdentity, Timestamp};
    use pretty_assertions::assert_eq;

    fn commit(message: &str) -> GitCommit {
        let who = GitIdentity::new("Alice", "alice@example.com", Timestamp::from_secs(1));
        GitCommit::new(vec![], who.clone(), who, message)
    }

    #[test]
    fn reference_kind_and_name() {
        let branch = Reference::Branch(RepositoryBranch {
            name: "feature".to_string(),
            commit: commit("x"),
        });
        assert_eq!(branch.kind(), ReferenceKind::Branch);
        assert_eq!(branch.name(), Some("feature"));
        assert!(branch.as_branch().is_some());
        assert!(branch.as_tag().is_none());

        let direct = Reference::Commit(commit("y"));
        assert_eq!(direct.kind(), ReferenceKind::Commit);
        assert_eq!(direct.name(), None);
    }

    #[test]
    fn main_reference_name_is_fixed() {
        let main = RepositoryMainReference::new(Some(commit("tip")));
        assert_eq!(main.name, "main");
    }

    #[test]
    fn empty_main_has_no_commit() {
        let reference = Reference::Main(RepositoryMainReference::new(None));
        assert_eq!(reference.commit(), None);
        assert_eq!(reference.commit_id(), None);
        assert_eq!(reference.name(), Some("main"));
    }

    #[test]
    fn commit_id_matches_pinned_commit() {
        let c = commit("tip");
        let tag = Reference::Tag(RepositoryTag {
            name: "v1.0".to_string(),
            commit: c.clone(),
        });
        assert_eq!(tag.commit_id(), Some(c.id));
    }

    #[test]
    fn reference_serializes_with_case_key() {
        let draft = Reference::Draft(RepositoryDraft {
            name: "wip".to_string(),
            commit: commit("draft work"),
        });
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("draft").is_some());
        assert_eq!(json["draft"]["name"], "wip");

        let parsed: Reference = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, draft);
    }

    #[test]
    fn reference_kind_display() {
        assert_eq!(ReferenceKind::Main.to_string(), "main");
        assert_eq!(ReferenceKind::Draft.to_string(), "draft");
    }
}
