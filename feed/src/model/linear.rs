//! Linear issue-tracker events and their preview payloads.

use serde::{Deserialize, Serialize};

use super::{EventMeta, FixtureError};

/// A Linear integration event (issue created/updated/commented/moved/labeled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearEvent {
    #[serde(flatten)]
    pub meta: EventMeta,

    /// What happened, e.g. `"created"`, `"commented"`, `"moved"`.
    pub action: String,

    /// Issue identifier, e.g. `"ENG-142"`.
    pub identifier: String,

    /// Issue title.
    pub title: String,

    /// Workflow state name, e.g. `"In Progress"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    /// Optional rich preview rendered in the card body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<LinearPreview>,
}

impl LinearEvent {
    pub(crate) fn validate(&self) -> Result<(), FixtureError> {
        if self.identifier.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "identifier",
            });
        }
        if self.title.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "title",
            });
        }
        if matches!(self.preview, Some(LinearPreview::Unknown)) {
            return Err(FixtureError::UnknownTag {
                id: self.meta.id.clone(),
                context: "linear preview",
            });
        }
        Ok(())
    }
}

/// Preview payloads scoped to Linear events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinearPreview {
    /// Issue description with a sub-issue checklist.
    IssueDescription {
        body: String,
        #[serde(default)]
        sub_issues: Vec<SubIssue>,
    },

    /// A comment left on the issue.
    Comment {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
        body: String,
    },

    /// Cycle completion progress.
    CycleProgress {
        cycle: String,
        completed: u32,
        total: u32,
    },

    /// Workflow state transition.
    StateTransition { from: String, to: String },

    /// Label set applied to the issue.
    Labels { labels: Vec<IssueLabel> },

    /// Forward-compatibility catch-all for unrecognized `kind` tags.
    #[serde(other)]
    Unknown,
}

/// A sub-issue row inside an issue-description preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubIssue {
    pub identifier: String,
    pub title: String,
    pub done: bool,
}

/// A label chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLabel {
    pub name: String,

    /// Hex color reference from Linear; terminal rendering falls back to the
    /// accent style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Actor;
    use chrono::Utc;

    fn base_event() -> LinearEvent {
        LinearEvent {
            meta: EventMeta::new(Actor::named("Priya Shah"), "mobile-app", Utc::now()),
            action: "created".to_string(),
            identifier: "ENG-142".to_string(),
            title: "Crash on cold start".to_string(),
            state: Some("Todo".to_string()),
            priority: Some("Urgent".to_string()),
            assignee: None,
            team: Some("Engineering".to_string()),
            preview: None,
        }
    }

    #[test]
    fn cycle_progress_roundtrip() {
        let preview = LinearPreview::CycleProgress {
            cycle: "Cycle 14".to_string(),
            completed: 8,
            total: 12,
        };
        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["kind"], "cycle_progress");
        let back: LinearPreview = serde_json::from_value(json).unwrap();
        assert_eq!(back, preview);
    }

    #[test]
    fn unrecognized_preview_kind_deserializes_to_unknown() {
        let json = serde_json::json!({ "kind": "roadmap_shift", "quarters": 2 });
        let preview: LinearPreview = serde_json::from_value(json).unwrap();
        assert_eq!(preview, LinearPreview::Unknown);
    }

    #[test]
    fn validate_rejects_empty_identifier() {
        let mut event = base_event();
        event.identifier = String::new();
        assert!(matches!(
            event.validate(),
            Err(FixtureError::EmptyField { field: "identifier", .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_preview() {
        let mut event = base_event();
        event.preview = Some(LinearPreview::Unknown);
        assert!(event.validate().is_err());
    }

    #[test]
    fn sub_issues_default_to_empty() {
        let json = serde_json::json!({ "kind": "issue_description", "body": "text" });
        let preview: LinearPreview = serde_json::from_value(json).unwrap();
        match preview {
            LinearPreview::IssueDescription { sub_issues, .. } => {
                assert!(sub_issues.is_empty());
            }
            other => panic!("expected issue_description, got {other:?}"),
        }
    }
}
