//! Event entity model for the Pulsefeed activity feed.
//!
//! This module defines the tagged-union schema shared by the feed and the
//! detail drawer. Every entity serializes through serde with an explicit
//! discriminant (`source` for top-level entities, `kind`/`type` for nested
//! preview and session-event unions), so the same derives drive fixture
//! files, the `dump` subcommand, and the drawer's Raw tab.
//!
//! # Shape errors
//!
//! A fixture missing a required field for its tag fails at deserialization
//! or [`Feed::validate`] time — shape problems are authoring errors, never
//! rendering faults. Forward-compatibility catch-alls ([`GithubPreview::Unknown`],
//! [`SessionEvent::Other`]) are flagged by validation but degrade gracefully
//! if they reach a renderer.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod commit;
pub mod cursor;
pub mod feedback;
pub mod fixtures;
pub mod github;
pub mod linear;

pub use commit::CommitEvent;
pub use cursor::{CostBreakdown, CursorSession, SessionEvent};
pub use feedback::FeedbackSubmission;
pub use fixtures::Feed;
pub use github::{GithubEvent, GithubPreview};
pub use linear::{LinearEvent, LinearPreview};

/// Length of the random alphanumeric suffix in event IDs.
const EVENT_ID_SUFFIX_LEN: usize = 20;

/// Prefix for all event IDs.
const EVENT_ID_PREFIX: &str = "evt_";

/// Errors produced by fixture shape validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// An entity was filed under the wrong source collection.
    #[error("entity {id} is a {actual} event but was filed under {expected}")]
    SourceMismatch {
        id: String,
        expected: SourceKind,
        actual: SourceKind,
    },

    /// A required field is empty for the entity's tag.
    #[error("entity {id}: {field} must not be empty")]
    EmptyField { id: String, field: &'static str },

    /// A numeric field is outside its documented range.
    #[error("entity {id}: {field} out of range ({message})")]
    OutOfRange {
        id: String,
        field: &'static str,
        message: String,
    },

    /// A forward-compatibility catch-all tag was authored explicitly.
    #[error("entity {id}: {context} carries an unrecognized tag")]
    UnknownTag { id: String, context: &'static str },
}

/// The five feed sources, in feed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Github,
    Linear,
    Cursor,
    Feedback,
    Commit,
}

impl SourceKind {
    /// All sources in feed display order.
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Github,
        SourceKind::Linear,
        SourceKind::Cursor,
        SourceKind::Feedback,
        SourceKind::Commit,
    ];

    /// Human-readable source label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Github => "GitHub",
            SourceKind::Linear => "Linear",
            SourceKind::Cursor => "Cursor",
            SourceKind::Feedback => "Feedback",
            SourceKind::Commit => "Commit",
        }
    }

    /// Unicode icon for the identity rail.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            SourceKind::Github => "\u{2387}",  // ⎇
            SourceKind::Linear => "\u{25C6}",  // ◆
            SourceKind::Cursor => "\u{276F}",  // ❯
            SourceKind::Feedback => "\u{2709}", // ✉
            SourceKind::Commit => "\u{2299}",  // ⊙
        }
    }

    /// ASCII fallback icon for limited terminals.
    #[must_use]
    pub fn ascii_icon(self) -> &'static str {
        match self {
            SourceKind::Github => "[G]",
            SourceKind::Linear => "[L]",
            SourceKind::Cursor => "[C]",
            SourceKind::Feedback => "[F]",
            SourceKind::Commit => "[K]",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The person or agent an event is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name.
    pub name: String,

    /// Optional avatar image reference (URL or asset key). The feed renders
    /// initials either way; the reference is carried for richer frontends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Actor {
    /// Creates an actor with no avatar reference.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            avatar: None,
        }
    }
}

/// A single row in an entity's activity timeline.
///
/// Used by the GitHub, Linear and Feedback drawer timelines. Cursor sessions
/// carry the richer [`SessionEvent`] union instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// What happened.
    pub label: String,

    /// Human-relative time of the step (e.g. `"2h ago"`).
    pub time: String,

    /// Optional free-text elaboration rendered under the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Optional status tag, resolved through the badge vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Fields shared by every feed entity, flattened into each variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    /// Unique event identifier, `evt_` followed by 20 alphanumeric characters.
    pub id: String,

    /// Who the event is attributed to.
    pub actor: Actor,

    /// Project or context label shown on the card header.
    pub project: String,

    /// Optional client/organization logo reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_logo: Option<String>,

    /// When the event occurred. Rendered relative to "now" in the feed.
    pub occurred_at: DateTime<Utc>,

    /// Ordered activity timeline, oldest first. Empty means "no timeline".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<TimelineEntry>,
}

impl EventMeta {
    /// Creates metadata with a freshly generated event ID and no timeline.
    #[must_use]
    pub fn new(actor: Actor, project: &str, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_event_id(),
            actor,
            project: project.to_string(),
            client_logo: None,
            occurred_at,
            timeline: Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), FixtureError> {
        if self.actor.name.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.id.clone(),
                field: "actor.name",
            });
        }
        if self.project.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.id.clone(),
                field: "project",
            });
        }
        Ok(())
    }
}

/// A feed entity from one of the five integration sources.
///
/// The `source` tag discriminates the union; only the active variant's
/// fields are meaningful. All variants expose the shared [`EventMeta`]
/// through [`ActivityEvent::meta`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ActivityEvent {
    Github(GithubEvent),
    Linear(LinearEvent),
    Cursor(CursorSession),
    Feedback(FeedbackSubmission),
    Commit(CommitEvent),
}

impl ActivityEvent {
    /// The source discriminant of this entity.
    #[must_use]
    pub fn source(&self) -> SourceKind {
        match self {
            ActivityEvent::Github(_) => SourceKind::Github,
            ActivityEvent::Linear(_) => SourceKind::Linear,
            ActivityEvent::Cursor(_) => SourceKind::Cursor,
            ActivityEvent::Feedback(_) => SourceKind::Feedback,
            ActivityEvent::Commit(_) => SourceKind::Commit,
        }
    }

    /// The shared metadata carried by every variant.
    #[must_use]
    pub fn meta(&self) -> &EventMeta {
        match self {
            ActivityEvent::Github(e) => &e.meta,
            ActivityEvent::Linear(e) => &e.meta,
            ActivityEvent::Cursor(e) => &e.meta,
            ActivityEvent::Feedback(e) => &e.meta,
            ActivityEvent::Commit(e) => &e.meta,
        }
    }

    /// Validates fixture shape for this entity.
    ///
    /// # Errors
    ///
    /// Returns the first [`FixtureError`] found. Validation is for fixture
    /// authoring; renderers never rely on it having run.
    pub fn validate(&self) -> Result<(), FixtureError> {
        self.meta().validate()?;
        match self {
            ActivityEvent::Github(e) => e.validate(),
            ActivityEvent::Linear(e) => e.validate(),
            ActivityEvent::Cursor(e) => e.validate(),
            ActivityEvent::Feedback(e) => e.validate(),
            ActivityEvent::Commit(e) => e.validate(),
        }
    }
}

/// Generates a unique event ID with the format `evt_` followed by 20
/// alphanumeric characters.
pub(crate) fn generate_event_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();
    let suffix: String = (0..EVENT_ID_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    format!("{EVENT_ID_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_has_correct_format() {
        let id = generate_event_id();
        assert!(id.starts_with("evt_"));
        assert_eq!(id.len(), 24); // "evt_" (4) + 20 alphanumeric
        assert!(id[4..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn source_kind_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&SourceKind::Github).unwrap(),
            "\"github\""
        );
        assert_eq!(
            serde_json::to_string(&SourceKind::Feedback).unwrap(),
            "\"feedback\""
        );
    }

    #[test]
    fn source_kind_labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            SourceKind::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), SourceKind::ALL.len());
    }

    #[test]
    fn source_kind_ascii_icons_are_bracketed() {
        for source in SourceKind::ALL {
            let icon = source.ascii_icon();
            assert!(icon.starts_with('[') && icon.ends_with(']'));
        }
    }

    #[test]
    fn meta_validate_rejects_blank_actor() {
        let mut meta = EventMeta::new(Actor::named("  "), "website", Utc::now());
        assert!(matches!(
            meta.validate(),
            Err(FixtureError::EmptyField { field: "actor.name", .. })
        ));

        meta.actor = Actor::named("Dana");
        meta.project = String::new();
        assert!(matches!(
            meta.validate(),
            Err(FixtureError::EmptyField { field: "project", .. })
        ));
    }

    #[test]
    fn activity_event_tag_roundtrip() {
        let feed = Feed::sample();
        for source in SourceKind::ALL {
            for entity in feed.collection(source) {
                let json = serde_json::to_value(entity).unwrap();
                assert_eq!(
                    json["source"],
                    serde_json::to_value(source).unwrap(),
                    "source tag should match the collection"
                );
                let back: ActivityEvent = serde_json::from_value(json).unwrap();
                assert_eq!(back.source(), source);
            }
        }
    }

    #[test]
    fn timeline_entry_optional_fields_skip_when_absent() {
        let entry = TimelineEntry {
            label: "Run queued".to_string(),
            time: "3h ago".to_string(),
            detail: None,
            status: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("detail").is_none());
        assert!(json.get("status").is_none());
    }
}
