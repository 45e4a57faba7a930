//! GitHub webhook-style events and their preview payloads.

use serde::{Deserialize, Serialize};

use super::{EventMeta, FixtureError};

/// A GitHub integration event (workflow run, pull request, issue, release,
/// security advisory, push, review).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubEvent {
    #[serde(flatten)]
    pub meta: EventMeta,

    /// Webhook event type, e.g. `"workflow_run"` or `"pull_request"`.
    pub event_type: String,

    /// Webhook action, e.g. `"completed"` or `"opened"`.
    pub action: String,

    /// Repository in `owner/name` form.
    pub repo: String,

    /// Final outcome for runs and checks (`"success"`, `"failure"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_number: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u64>,

    /// Optional rich preview rendered in the card body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<GithubPreview>,
}

impl GithubEvent {
    pub(crate) fn validate(&self) -> Result<(), FixtureError> {
        if self.repo.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "repo",
            });
        }
        if self.event_type.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "event_type",
            });
        }
        if matches!(self.preview, Some(GithubPreview::Unknown)) {
            return Err(FixtureError::UnknownTag {
                id: self.meta.id.clone(),
                context: "github preview",
            });
        }
        Ok(())
    }
}

/// Preview payloads scoped to GitHub events.
///
/// The `kind` tag discriminates the union. [`GithubPreview::Unknown`] absorbs
/// tags introduced by newer producers; renderers treat it as "no preview".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GithubPreview {
    /// Step checklist for a workflow run.
    WorkflowSteps { steps: Vec<WorkflowStep> },

    /// Short log of commits in a push.
    CommitList { commits: Vec<CommitRef> },

    /// Per-file diffstat for a pull request.
    FileChanges { files: Vec<FileChange> },

    /// Review verdict and comment body.
    ReviewBody { state: String, body: String },

    /// Release tag and notes.
    ReleaseNotes {
        tag: String,
        body: String,
    },

    /// Security advisory record.
    Vulnerability {
        severity: String,
        package: String,
        summary: String,
    },

    /// Issue body with labels.
    IssueBody {
        body: String,
        #[serde(default)]
        labels: Vec<String>,
    },

    /// Forward-compatibility catch-all for unrecognized `kind` tags.
    #[serde(other)]
    Unknown,
}

/// One step of a workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,

    /// Step outcome, resolved through the badge vocabulary.
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// A commit reference inside a push preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    pub message: String,
}

/// A changed file inside a pull-request preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub additions: u32,
    pub deletions: u32,
}
