//! The reference service: name resolution and history listing.

use crate::{PageCursor, RegistryError, Result};
use std::sync::Arc;
use wharf_core::{
    CommitId, GitCommit, Reference, RepositoryMainReference, MAIN_REFERENCE_NAME,
};
use wharf_store::{RegistryStore, StoreError};

/// Page size applied when a request leaves `page_size` unset.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page the lister will produce. Larger requests are clamped,
/// not rejected.
pub const MAX_PAGE_SIZE: u32 = 100;

/// One page of git commit history for a resolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommitPage {
    /// The commit the reference resolved to when the listing began.
    /// Identical on every page of one sequence. `None` only when the
    /// listing targeted the default reference of an empty repository.
    pub commit_id: Option<CommitId>,
    /// Commit metadata for this page, newest first.
    pub git_commits: Vec<GitCommit>,
    /// Token for the next page. `None` when the walk is exhausted.
    pub next_page_token: Option<String>,
}

impl GitCommitPage {
    fn empty() -> Self {
        Self {
            commit_id: None,
            git_commits: Vec::new(),
            next_page_token: None,
        }
    }
}

/// Resolves reference names and lists the history behind them.
///
/// Both operations are read-only and hold no state between calls, so a
/// single service value can be shared freely across threads.
#[derive(Clone)]
pub struct ReferenceService {
    store: Arc<dyn RegistryStore>,
}

impl ReferenceService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    /// Resolves a reference name within a repository.
    ///
    /// The name is tried against each reference kind in a fixed order:
    /// the literal default name, then branches, tags, drafts, and
    /// finally commit ids. The order is part of the contract since it
    /// decides which variant a client observes when names collide
    /// across kinds.
    pub fn get_reference_by_name(
        &self,
        name: &str,
        owner: &str,
        repository_name: &str,
    ) -> Result<Reference> {
        require("name", name)?;
        require("owner", owner)?;
        require("repository_name", repository_name)?;

        let reference = self.resolve(name, owner, repository_name)?;
        tracing::debug!(
            owner = %owner,
            repository = %repository_name,
            name = %name,
            kind = %reference.kind(),
            "resolved reference"
        );
        Ok(reference)
    }

    /// Lists git commits reachable from a reference, newest first.
    ///
    /// An empty `page_token` starts a new sequence: the reference is
    /// resolved once and the resulting commit becomes the anchor for
    /// every subsequent page. A non-empty token carries that anchor
    /// inside it and the reference is not consulted again, so a branch
    /// or draft moving mid-sequence cannot make the walk jump.
    pub fn list_git_commits_for_reference(
        &self,
        reference: &str,
        owner: &str,
        repository_name: &str,
        page_size: u32,
        page_token: &str,
    ) -> Result<GitCommitPage> {
        require("reference", reference)?;
        require("owner", owner)?;
        require("repository_name", repository_name)?;

        let limit = effective_page_size(page_size);
        let first_page = page_token.is_empty();

        let cursor = if first_page {
            let resolved = self.resolve(reference, owner, repository_name)?;
            match resolved.commit_id() {
                Some(anchor) => PageCursor::first(anchor),
                // The default reference of an empty repository resolves
                // but pins nothing. There is no history to list.
                None => return Ok(GitCommitPage::empty()),
            }
        } else {
            let cursor = PageCursor::decode(page_token)?;
            self.store.repository(owner, repository_name)?;
            cursor
        };

        let walk = match self.store.ancestry(owner, repository_name, &cursor.anchor) {
            Ok(walk) => walk,
            Err(StoreError::CommitNotFound(id)) if !first_page => {
                return Err(RegistryError::invalid_page_token(format!(
                    "anchor commit {} does not exist in {}/{}",
                    id, owner, repository_name
                )));
            }
            Err(StoreError::CommitNotFound(id)) => {
                return Err(RegistryError::Store(StoreError::Inconsistent(format!(
                    "resolved reference pins missing commit {}",
                    id
                ))));
            }
            Err(err) => return Err(err.into()),
        };

        let mut git_commits = Vec::with_capacity(limit);
        let mut next_page_token = None;
        let mut skipped = 0u64;
        for item in walk {
            let commit = item?;
            if skipped < cursor.offset {
                skipped += 1;
                continue;
            }
            if git_commits.len() == limit {
                next_page_token = Some(cursor.advanced(limit as u64).encode());
                break;
            }
            git_commits.push(commit);
        }

        tracing::debug!(
            owner = %owner,
            repository = %repository_name,
            reference = %reference,
            anchor = %cursor.anchor,
            offset = cursor.offset,
            returned = git_commits.len(),
            exhausted = next_page_token.is_none(),
            "listed git commits"
        );

        Ok(GitCommitPage {
            commit_id: Some(cursor.anchor),
            git_commits,
            next_page_token,
        })
    }

    /// The resolution ladder. Assumes inputs are non-empty.
    fn resolve(&self, name: &str, owner: &str, repository_name: &str) -> Result<Reference> {
        // Existence of the repository is a precondition for every step,
        // including the NotFound fallthrough.
        self.store.repository(owner, repository_name)?;

        if name == MAIN_REFERENCE_NAME {
            let commit = self.store.latest_commit(owner, repository_name)?;
            return Ok(Reference::Main(RepositoryMainReference::new(commit)));
        }

        if let Some(branch) = self.store.branch(owner, repository_name, name)? {
            return Ok(Reference::Branch(branch));
        }

        if let Some(tag) = self.store.tag(owner, repository_name, name)? {
            return Ok(Reference::Tag(tag));
        }

        if let Some(draft) = self.store.draft(owner, repository_name, name)? {
            return Ok(Reference::Draft(draft));
        }

        if CommitId::is_valid_hex(name) {
            let id = CommitId::from_hex(name)
                .map_err(|e| RegistryError::invalid_argument("name", e.to_string()))?;
            if let Some(commit) = self.store.commit(owner, repository_name, &id)? {
                return Ok(Reference::Commit(commit));
            }
        }

        Err(RegistryError::not_found("reference", name))
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RegistryError::invalid_argument(field, "must not be empty"));
    }
    Ok(())
}

fn effective_page_size(requested: u32) -> usize {
    let size = match requested {
        0 => DEFAULT_PAGE_SIZE,
        n => n.min(MAX_PAGE_SIZE),
    };
    size as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wharf_core::{GitIdentity, ReferenceKind, Timestamp};
    use wharf_store::MemoryStore;

    fn identity() -> GitIdentity {
        GitIdentity::new("Alice", "alice@example.com", Timestamp::from_secs(1))
    }

    fn seeded(history: usize) -> (ReferenceService, Arc<MemoryStore>, Vec<GitCommit>) {
        let store = Arc::new(MemoryStore::new());
        store.create_repository("acme", "widgets").unwrap();
        let commits: Vec<GitCommit> = (0..history)
            .map(|i| {
                store
                    .push_commit("acme", "widgets", identity(), format!("commit {}", i))
                    .unwrap()
            })
            .collect();
        let service = ReferenceService::new(store.clone());
        (service, store, commits)
    }

    #[test]
    fn resolves_main_to_latest_commit() {
        let (service, _, commits) = seeded(3);
        let reference = service
            .get_reference_by_name("main", "acme", "widgets")
            .unwrap();

        let main = reference.as_main().unwrap();
        assert_eq!(main.name, "main");
        assert_eq!(main.commit.as_ref().unwrap().id, commits[2].id);
    }

    #[test]
    fn resolves_main_on_empty_repository() {
        let (service, _, _) = seeded(0);
        let reference = service
            .get_reference_by_name("main", "acme", "widgets")
            .unwrap();
        assert_eq!(reference.kind(), ReferenceKind::Main);
        assert!(reference.commit().is_none());
    }

    #[test]
    fn resolves_branch_before_tag() {
        let (service, store, commits) = seeded(2);
        store
            .set_branch("acme", "widgets", "release", commits[0].id)
            .unwrap();
        store
            .set_tag("acme", "widgets", "release", commits[1].id)
            .unwrap();

        let reference = service
            .get_reference_by_name("release", "acme", "widgets")
            .unwrap();
        assert_eq!(reference.kind(), ReferenceKind::Branch);
        assert_eq!(reference.commit_id(), Some(commits[0].id));
    }

    #[test]
    fn resolves_tag_before_draft() {
        let (service, store, commits) = seeded(2);
        store
            .set_tag("acme", "widgets", "v1", commits[0].id)
            .unwrap();
        store
            .set_draft("acme", "widgets", "v1", commits[1].id)
            .unwrap();

        let reference = service
            .get_reference_by_name("v1", "acme", "widgets")
            .unwrap();
        assert_eq!(reference.kind(), ReferenceKind::Tag);
    }

    #[test]
    fn named_reference_shadows_commit_id() {
        let (service, store, commits) = seeded(2);
        let hex = commits[0].id.to_hex();
        store.set_tag("acme", "widgets", &hex, commits[1].id).unwrap();

        let reference = service
            .get_reference_by_name(&hex, "acme", "widgets")
            .unwrap();
        assert_eq!(reference.kind(), ReferenceKind::Tag);
        assert_eq!(reference.commit_id(), Some(commits[1].id));
    }

    #[test]
    fn resolves_commit_by_id() {
        let (service, _, commits) = seeded(2);
        let reference = service
            .get_reference_by_name(&commits[0].id.to_hex(), "acme", "widgets")
            .unwrap();
        assert_eq!(reference.kind(), ReferenceKind::Commit);
        assert_eq!(reference.as_commit().unwrap().id, commits[0].id);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let (service, _, _) = seeded(1);
        assert!(matches!(
            service.get_reference_by_name("nope", "acme", "widgets"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn unknown_commit_id_is_not_found() {
        let (service, _, _) = seeded(1);
        let absent = "9".repeat(40);
        assert!(matches!(
            service.get_reference_by_name(&absent, "acme", "widgets"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn unknown_repository_is_not_found() {
        let (service, _, _) = seeded(1);
        assert!(matches!(
            service.get_reference_by_name("main", "acme", "gizmos"),
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[test]
    fn empty_fields_are_invalid_arguments() {
        let (service, _, _) = seeded(1);
        assert!(matches!(
            service.get_reference_by_name("", "acme", "widgets"),
            Err(RegistryError::InvalidArgument { field: "name", .. })
        ));
        assert!(matches!(
            service.list_git_commits_for_reference("main", "", "widgets", 10, ""),
            Err(RegistryError::InvalidArgument { field: "owner", .. })
        ));
    }

    #[test]
    fn resolution_is_idempotent() {
        let (service, _, _) = seeded(3);
        let first = service
            .get_reference_by_name("main", "acme", "widgets")
            .unwrap();
        let second = service
            .get_reference_by_name("main", "acme", "widgets")
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn draft_resolution_follows_the_pointer() {
        let (service, store, commits) = seeded(2);
        store
            .set_draft("acme", "widgets", "wip", commits[0].id)
            .unwrap();
        let before = service
            .get_reference_by_name("wip", "acme", "widgets")
            .unwrap();

        store
            .set_draft("acme", "widgets", "wip", commits[1].id)
            .unwrap();
        let after = service
            .get_reference_by_name("wip", "acme", "widgets")
            .unwrap();

        assert_eq!(before.name(), after.name());
        assert_ne!(before.commit_id(), after.commit_id());
    }

    #[test]
    fn listing_pages_through_history() {
        let (service, _, commits) = seeded(3);
        let first = service
            .list_git_commits_for_reference("main", "acme", "widgets", 2, "")
            .unwrap();

        assert_eq!(first.commit_id, Some(commits[2].id));
        assert_eq!(
            first.git_commits.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![commits[2].id, commits[1].id]
        );
        let token = first.next_page_token.expect("more pages");

        let second = service
            .list_git_commits_for_reference("main", "acme", "widgets", 2, &token)
            .unwrap();
        assert_eq!(second.commit_id, Some(commits[2].id));
        assert_eq!(
            second.git_commits.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![commits[0].id]
        );
        assert_eq!(second.next_page_token, None);
    }

    #[test]
    fn listing_empty_repository_main_is_empty() {
        let (service, _, _) = seeded(0);
        let page = service
            .list_git_commits_for_reference("main", "acme", "widgets", 10, "")
            .unwrap();
        assert_eq!(page.commit_id, None);
        assert!(page.git_commits.is_empty());
        assert_eq!(page.next_page_token, None);
    }

    #[test]
    fn page_size_zero_uses_default() {
        let (service, _, _) = seeded(30);
        let page = service
            .list_git_commits_for_reference("main", "acme", "widgets", 0, "")
            .unwrap();
        assert_eq!(page.git_commits.len(), DEFAULT_PAGE_SIZE as usize);
        assert!(page.next_page_token.is_some());
    }

    #[test]
    fn oversized_page_size_is_clamped() {
        let (service, _, _) = seeded(120);
        let page = service
            .list_git_commits_for_reference("main", "acme", "widgets", 5000, "")
            .unwrap();
        assert_eq!(page.git_commits.len(), MAX_PAGE_SIZE as usize);
        assert!(page.next_page_token.is_some());
    }

    #[test]
    fn exact_page_boundary_has_no_next_token() {
        let (service, _, _) = seeded(4);
        let page = service
            .list_git_commits_for_reference("main", "acme", "widgets", 4, "")
            .unwrap();
        assert_eq!(page.git_commits.len(), 4);
        assert_eq!(page.next_page_token, None);
    }

    #[test]
    fn malformed_token_is_rejected() {
        let (service, _, _) = seeded(2);
        assert!(matches!(
            service.list_git_commits_for_reference("main", "acme", "widgets", 2, "!!!"),
            Err(RegistryError::InvalidPageToken(_))
        ));
    }

    #[test]
    fn token_from_another_repository_is_rejected() {
        let (service, store, _) = seeded(2);
        store.create_repository("acme", "gizmos").unwrap();
        let other = store
            .push_commit("acme", "gizmos", identity(), "elsewhere")
            .unwrap();

        let foreign = PageCursor::first(other.id).encode();
        assert!(matches!(
            service.list_git_commits_for_reference("main", "acme", "widgets", 2, &foreign),
            Err(RegistryError::InvalidPageToken(_))
        ));
    }

    #[test]
    fn anchor_is_stable_while_branch_moves() {
        let (service, store, commits) = seeded(3);
        store
            .set_branch("acme", "widgets", "dev", commits[2].id)
            .unwrap();

        let first = service
            .list_git_commits_for_reference("dev", "acme", "widgets", 2, "")
            .unwrap();
        let token = first.next_page_token.clone().unwrap();

        // The branch moves backwards between page fetches.
        store
            .set_branch("acme", "widgets", "dev", commits[0].id)
            .unwrap();

        let second = service
            .list_git_commits_for_reference("dev", "acme", "widgets", 2, &token)
            .unwrap();
        assert_eq!(second.commit_id, first.commit_id);
        assert_eq!(second.git_commits[0].id, commits[0].id);
    }
}
