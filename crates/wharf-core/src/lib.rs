//! # Wharf Core
//!
//! Core types, the reference model, and error definitions for the Wharf
//! source-code registry.
//!
//! This crate provides the foundational building blocks used throughout
//! the Wharf ecosystem:
//!
//! - Commit identifiers and metadata ([`CommitId`], [`GitCommit`])
//! - The resolved-reference model ([`Reference`] and its leaf records)
//! - Error types with rich context

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod commit;
pub mod error;
pub mod id;
pub mod reference;
pub mod timestamp;

pub use commit::{GitCommit, GitIdentity};
pub use error::{Error, Result};
pub use id::CommitId;
pub use reference::{
    Reference, ReferenceKind, RepositoryBranch, RepositoryDraft, RepositoryMainReference,
    RepositoryTag,
};
pub use timestamp::Timestamp;

/// The name of every repository's default reference.
pub const MAIN_REFERENCE_NAME: &str = "main";
