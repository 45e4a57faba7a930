//! Plain commit events.
//!
//! Commits are atomic: they carry no timeline, so their drawer exposes only
//! the Overview and Raw tabs.

use serde::{Deserialize, Serialize};

use super::{EventMeta, FixtureError};

/// A single pushed commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEvent {
    #[serde(flatten)]
    pub meta: EventMeta,

    /// Full commit hash.
    pub sha: String,

    /// First line of the commit message.
    pub message: String,

    /// Repository in `owner/name` form.
    pub repo: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_changed: Option<u32>,
}

impl CommitEvent {
    pub(crate) fn validate(&self) -> Result<(), FixtureError> {
        if self.sha.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "sha",
            });
        }
        if self.repo.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "repo",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Actor;
    use chrono::Utc;

    #[test]
    fn validate_rejects_empty_sha() {
        let commit = CommitEvent {
            meta: EventMeta::new(Actor::named("Dana Wei"), "website", Utc::now()),
            sha: String::new(),
            message: "fix: debounce search input".to_string(),
            repo: "acme/website".to_string(),
            branch: Some("main".to_string()),
            additions: Some(12),
            deletions: Some(4),
            files_changed: Some(2),
        };
        assert!(matches!(
            commit.validate(),
            Err(FixtureError::EmptyField { field: "sha", .. })
        ));
    }
}
