//! # Wharf Registry
//!
//! Reference resolution and commit-history listing for the Wharf
//! source-code registry.
//!
//! Two operations make up the public surface, both stateless and
//! read-only:
//!
//! - [`ReferenceService::get_reference_by_name`] turns a human-supplied
//!   name scoped to `owner/repository` into exactly one
//!   [`wharf_core::Reference`] variant.
//! - [`ReferenceService::list_git_commits_for_reference`] pages through
//!   the git history behind a reference, newest first, driven by an
//!   opaque continuation token.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cursor;
mod error;
mod service;

pub use cursor::PageCursor;
pub use error::{RegistryError, Result};
pub use service::{GitCommitPage, ReferenceService, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
