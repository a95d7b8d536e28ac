//! Repository records.

use serde::{Deserialize, Serialize};
use wharf_core::Timestamp;

/// Visibility of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Public repository.
    #[default]
    Public,
    /// Private repository.
    Private,
}

/// A repository in the Wharf registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Human-readable name.
    pub name: String,
    /// Owner namespace.
    pub owner: String,
    /// Optional description.
    pub description: Option<String>,
    /// Repository visibility.
    pub visibility: Visibility,
    /// Creation time.
    pub created_at: Timestamp,
}

impl Repository {
    /// Creates a new repository record.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            description: None,
            visibility: Visibility::Public,
            created_at: Timestamp::now(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the full name (owner/name).
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_full_name() {
        let repo = Repository::new("acme", "widgets");
        assert_eq!(repo.full_name(), "acme/widgets");
        assert_eq!(repo.visibility, Visibility::Public);
    }

    #[test]
    fn repository_with_description() {
        let repo = Repository::new("acme", "widgets").with_description("gadget blueprints");
        assert_eq!(repo.description.as_deref(), Some("gadget blueprints"));
    }
}
