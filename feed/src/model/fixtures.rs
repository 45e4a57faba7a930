//! Fixture feed: per-source entity collections and sample data.
//!
//! The feed is supplied as static collections — a JSON file loaded at
//! startup, or the built-in sample feed when none is configured. Collections
//! are read-only for the duration of rendering; the TUI never mutates them.

use std::path::Path;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::FeedError;

use super::{
    Actor, ActivityEvent, CommitEvent, CostBreakdown, CursorSession, EventMeta,
    FeedbackSubmission, FixtureError, GithubEvent, GithubPreview, LinearEvent, LinearPreview,
    SessionEvent, SourceKind, TimelineEntry,
};
use super::github::{CommitRef, FileChange, WorkflowStep};
use super::linear::{IssueLabel, SubIssue};

/// The full fixture feed, one ordered collection per source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub github: Vec<ActivityEvent>,
    #[serde(default)]
    pub linear: Vec<ActivityEvent>,
    #[serde(default)]
    pub cursor: Vec<ActivityEvent>,
    #[serde(default)]
    pub feedback: Vec<ActivityEvent>,
    #[serde(default)]
    pub commits: Vec<ActivityEvent>,
}

impl Feed {
    /// Loads a feed from a JSON file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Io`] if the file cannot be read,
    /// [`FeedError::Json`] if it is not valid feed JSON, or
    /// [`FeedError::Fixture`] if an entity fails shape validation.
    pub fn from_path(path: &Path) -> Result<Self, FeedError> {
        let contents = std::fs::read_to_string(path)?;
        let feed: Feed = serde_json::from_str(&contents)?;
        feed.validate()?;
        info!(
            path = %path.display(),
            events = feed.total(),
            "fixture feed loaded"
        );
        Ok(feed)
    }

    /// The collection for one source.
    #[must_use]
    pub fn collection(&self, source: SourceKind) -> &[ActivityEvent] {
        match source {
            SourceKind::Github => &self.github,
            SourceKind::Linear => &self.linear,
            SourceKind::Cursor => &self.cursor,
            SourceKind::Feedback => &self.feedback,
            SourceKind::Commit => &self.commits,
        }
    }

    /// Looks up one entity by source and index.
    #[must_use]
    pub fn get(&self, source: SourceKind, index: usize) -> Option<&ActivityEvent> {
        self.collection(source).get(index)
    }

    /// Total entity count across all sources.
    #[must_use]
    pub fn total(&self) -> usize {
        SourceKind::ALL
            .iter()
            .map(|s| self.collection(*s).len())
            .sum()
    }

    /// Flattened card order for feed navigation: sources in display order,
    /// each collection in fixture order.
    #[must_use]
    pub fn order(&self) -> Vec<(SourceKind, usize)> {
        let mut order = Vec::with_capacity(self.total());
        for source in SourceKind::ALL {
            for index in 0..self.collection(source).len() {
                order.push((source, index));
            }
        }
        order
    }

    /// Validates every entity and that each sits in its own source's
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns the first [`FixtureError`] found.
    pub fn validate(&self) -> Result<(), FixtureError> {
        for source in SourceKind::ALL {
            for entity in self.collection(source) {
                if entity.source() != source {
                    return Err(FixtureError::SourceMismatch {
                        id: entity.meta().id.clone(),
                        expected: source,
                        actual: entity.source(),
                    });
                }
                entity.validate()?;
            }
        }
        Ok(())
    }

    /// The built-in sample feed used when no fixture file is configured.
    #[must_use]
    pub fn sample() -> Self {
        let now = Utc::now();
        let meta = |name: &str, project: &str, ago_minutes: i64| {
            EventMeta::new(Actor::named(name), project, now - Duration::minutes(ago_minutes))
        };

        let github = vec![
            ActivityEvent::Github(GithubEvent {
                meta: EventMeta {
                    client_logo: Some("acme".to_string()),
                    timeline: vec![
                        TimelineEntry {
                            label: "Run queued".to_string(),
                            time: "28m ago".to_string(),
                            detail: None,
                            status: Some("pending".to_string()),
                        },
                        TimelineEntry {
                            label: "Run started".to_string(),
                            time: "27m ago".to_string(),
                            detail: Some("runner ubuntu-24.04".to_string()),
                            status: Some("running".to_string()),
                        },
                        TimelineEntry {
                            label: "Run completed".to_string(),
                            time: "24m ago".to_string(),
                            detail: None,
                            status: Some("success".to_string()),
                        },
                    ],
                    ..meta("ci-bot", "website", 24)
                },
                event_type: "workflow_run".to_string(),
                action: "completed".to_string(),
                repo: "acme/website".to_string(),
                conclusion: Some("success".to_string()),
                branch: Some("main".to_string()),
                run_number: Some(412),
                pr_number: None,
                issue_number: None,
                preview: Some(GithubPreview::WorkflowSteps {
                    steps: vec![
                        step("checkout", "success", 4_000),
                        step("setup toolchain", "success", 21_000),
                        step("build", "success", 96_000),
                        step("test", "success", 54_000),
                        step("lint", "success", 12_000),
                        step("deploy preview", "success", 33_000),
                    ],
                }),
            }),
            ActivityEvent::Github(GithubEvent {
                meta: meta("Dana Wei", "website", 95),
                event_type: "pull_request".to_string(),
                action: "opened".to_string(),
                repo: "acme/website".to_string(),
                conclusion: None,
                branch: Some("fix/search-debounce".to_string()),
                run_number: None,
                pr_number: Some(318),
                issue_number: None,
                preview: Some(GithubPreview::FileChanges {
                    files: vec![
                        FileChange {
                            path: "src/search/input.tsx".to_string(),
                            additions: 42,
                            deletions: 9,
                        },
                        FileChange {
                            path: "src/search/useDebounce.ts".to_string(),
                            additions: 31,
                            deletions: 0,
                        },
                    ],
                }),
            }),
            ActivityEvent::Github(GithubEvent {
                meta: meta("Miguel Torres", "api", 180),
                event_type: "push".to_string(),
                action: "pushed".to_string(),
                repo: "acme/api".to_string(),
                conclusion: None,
                branch: Some("main".to_string()),
                run_number: None,
                pr_number: None,
                issue_number: None,
                preview: Some(GithubPreview::CommitList {
                    commits: vec![
                        CommitRef {
                            sha: "a1b2c3d4e5f6".to_string(),
                            message: "fix: clamp page size in list endpoints".to_string(),
                        },
                        CommitRef {
                            sha: "9f8e7d6c5b4a".to_string(),
                            message: "chore: bump tokio to 1.43".to_string(),
                        },
                    ],
                }),
            }),
            ActivityEvent::Github(GithubEvent {
                meta: EventMeta {
                    timeline: vec![
                        TimelineEntry {
                            label: "Advisory published".to_string(),
                            time: "6h ago".to_string(),
                            detail: None,
                            status: Some("high".to_string()),
                        },
                        TimelineEntry {
                            label: "Dependabot PR opened".to_string(),
                            time: "5h ago".to_string(),
                            detail: Some("bumps openssl to 3.0.16".to_string()),
                            status: Some("open".to_string()),
                        },
                    ],
                    ..meta("github-advisories", "api", 360)
                },
                event_type: "security_advisory".to_string(),
                action: "published".to_string(),
                repo: "acme/api".to_string(),
                conclusion: None,
                branch: None,
                run_number: None,
                pr_number: None,
                issue_number: None,
                preview: Some(GithubPreview::Vulnerability {
                    severity: "high".to_string(),
                    package: "openssl".to_string(),
                    summary: "Out-of-bounds read in X.509 name constraints".to_string(),
                }),
            }),
        ];

        let linear = vec![
            ActivityEvent::Linear(LinearEvent {
                meta: EventMeta {
                    timeline: vec![
                        TimelineEntry {
                            label: "Issue created".to_string(),
                            time: "2d ago".to_string(),
                            detail: None,
                            status: None,
                        },
                        TimelineEntry {
                            label: "Triage complete".to_string(),
                            time: "1d ago".to_string(),
                            detail: Some("assigned to mobile crew".to_string()),
                            status: Some("done".to_string()),
                        },
                    ],
                    ..meta("Priya Shah", "mobile-app", 2 * 24 * 60)
                },
                action: "created".to_string(),
                identifier: "ENG-142".to_string(),
                title: "Crash on cold start when offline".to_string(),
                state: Some("Todo".to_string()),
                priority: Some("Urgent".to_string()),
                assignee: Some("Miguel Torres".to_string()),
                team: Some("Engineering".to_string()),
                preview: Some(LinearPreview::IssueDescription {
                    body: "Cold starting with airplane mode on crashes before the splash \
                           screen finishes. Reproduces on iOS 18 and Android 15."
                        .to_string(),
                    sub_issues: vec![
                        SubIssue {
                            identifier: "ENG-143".to_string(),
                            title: "Guard network client init".to_string(),
                            done: true,
                        },
                        SubIssue {
                            identifier: "ENG-144".to_string(),
                            title: "Add offline smoke test".to_string(),
                            done: false,
                        },
                    ],
                }),
            }),
            ActivityEvent::Linear(LinearEvent {
                meta: meta("Sam Okafor", "mobile-app", 4 * 60),
                action: "moved".to_string(),
                identifier: "ENG-137".to_string(),
                title: "Migrate push tokens to v2".to_string(),
                state: Some("In Review".to_string()),
                priority: Some("High".to_string()),
                assignee: Some("Sam Okafor".to_string()),
                team: Some("Engineering".to_string()),
                preview: Some(LinearPreview::StateTransition {
                    from: "In Progress".to_string(),
                    to: "In Review".to_string(),
                }),
            }),
            ActivityEvent::Linear(LinearEvent {
                meta: meta("Linear", "mobile-app", 8 * 60),
                action: "updated".to_string(),
                identifier: "CYC-14".to_string(),
                title: "Cycle 14".to_string(),
                state: None,
                priority: None,
                assignee: None,
                team: Some("Engineering".to_string()),
                preview: Some(LinearPreview::CycleProgress {
                    cycle: "Cycle 14".to_string(),
                    completed: 8,
                    total: 12,
                }),
            }),
            ActivityEvent::Linear(LinearEvent {
                meta: meta("Priya Shah", "mobile-app", 26 * 60),
                action: "labeled".to_string(),
                identifier: "ENG-129".to_string(),
                title: "Settings screen jank on scroll".to_string(),
                state: Some("Backlog".to_string()),
                priority: Some("Medium".to_string()),
                assignee: None,
                team: Some("Engineering".to_string()),
                preview: Some(LinearPreview::Labels {
                    labels: vec![
                        IssueLabel {
                            name: "performance".to_string(),
                            color: Some("#5e6ad2".to_string()),
                        },
                        IssueLabel {
                            name: "mobile".to_string(),
                            color: Some("#26b5ce".to_string()),
                        },
                    ],
                }),
            }),
        ];

        let cursor = vec![
            ActivityEvent::Cursor(CursorSession {
                meta: EventMeta {
                    client_logo: Some("acme".to_string()),
                    ..meta("Cursor Agent", "website", 50)
                },
                session_id: Uuid::new_v4(),
                summary: "Fix flaky checkout test and tighten retry logic".to_string(),
                model: "claude-sonnet-4".to_string(),
                status: "completed".to_string(),
                duration_ms: Some(9 * 60 * 1000 + 40 * 1000),
                files_changed: Some(4),
                lines_added: Some(118),
                lines_removed: Some(42),
                events: vec![
                    SessionEvent::SessionStart {
                        model: "claude-sonnet-4".to_string(),
                        cwd: Some("~/work/website".to_string()),
                    },
                    SessionEvent::UserPrompt {
                        text: "The checkout integration test fails about once in five runs \
                               with a timeout waiting for the payment iframe. Find the race \
                               and fix it properly instead of bumping the timeout."
                            .to_string(),
                    },
                    SessionEvent::AgentThought {
                        text: "The timeout points at an unawaited navigation. I should look \
                               at how the iframe ready signal is wired before touching the \
                               test itself."
                            .to_string(),
                        duration_ms: Some(4_200),
                    },
                    SessionEvent::GrepSearch {
                        pattern: "payment.*iframe".to_string(),
                        matches: Some(14),
                    },
                    SessionEvent::FileRead {
                        path: "tests/checkout.spec.ts".to_string(),
                        lines: Some(212),
                    },
                    SessionEvent::SemanticSearch {
                        query: "iframe ready event handshake".to_string(),
                        results: Some(6),
                    },
                    SessionEvent::FileEdit {
                        path: "src/checkout/iframe-bridge.ts".to_string(),
                        additions: Some(38),
                        deletions: Some(11),
                    },
                    SessionEvent::ShellCommand {
                        command: "pnpm test checkout --repeat 25".to_string(),
                        exit_code: Some(0),
                        duration_ms: Some(184_000),
                        output: Some(
                            "25 runs, 25 passed\nslowest run 6.1s, median 3.4s".to_string(),
                        ),
                    },
                    SessionEvent::TodoWrite { completed: 3, total: 3 },
                    SessionEvent::SessionEnd {
                        duration_ms: Some(9 * 60 * 1000 + 40 * 1000),
                        outcome: Some("completed".to_string()),
                    },
                ],
                cost: Some(CostBreakdown {
                    input_tokens: 184_000,
                    output_tokens: 22_500,
                    cache_read_tokens: Some(96_000),
                    total_cost_usd: 1.84,
                }),
            }),
            ActivityEvent::Cursor(CursorSession {
                meta: meta("Cursor Agent", "api", 7 * 60),
                session_id: Uuid::new_v4(),
                summary: "Attempt schema migration for audit log".to_string(),
                model: "claude-haiku-4".to_string(),
                status: "failed".to_string(),
                duration_ms: Some(3 * 60 * 1000),
                files_changed: Some(1),
                lines_added: Some(12),
                lines_removed: Some(0),
                events: vec![
                    SessionEvent::SessionStart {
                        model: "claude-haiku-4".to_string(),
                        cwd: Some("~/work/api".to_string()),
                    },
                    SessionEvent::UserPrompt {
                        text: "Add a partitioned audit_log table migration".to_string(),
                    },
                    SessionEvent::FileWrite {
                        path: "migrations/0042_audit_log.sql".to_string(),
                        lines: Some(36),
                    },
                    SessionEvent::ShellCommand {
                        command: "make migrate-dry-run".to_string(),
                        exit_code: Some(2),
                        duration_ms: Some(5_600),
                        output: Some(
                            "ERROR: partition key must be part of primary key".to_string(),
                        ),
                    },
                    SessionEvent::SessionEnd {
                        duration_ms: Some(3 * 60 * 1000),
                        outcome: Some("failed".to_string()),
                    },
                ],
                cost: None,
            }),
        ];

        let feedback = vec![
            ActivityEvent::Feedback(FeedbackSubmission {
                meta: EventMeta {
                    timeline: vec![TimelineEntry {
                        label: "Submitted via docs footer".to_string(),
                        time: "3h ago".to_string(),
                        detail: None,
                        status: None,
                    }],
                    ..meta("anonymous", "docs-site", 3 * 60)
                },
                category: "bug".to_string(),
                rating: Some(2),
                message: "Search results show an article that was deleted last month."
                    .to_string(),
                contact: None,
                page: Some("/docs/search".to_string()),
            }),
            ActivityEvent::Feedback(FeedbackSubmission {
                meta: meta("jordan@northwind.io", "docs-site", 30 * 60),
                category: "praise".to_string(),
                rating: Some(5),
                message: "The new quickstart got us deployed in under ten minutes. Lovely."
                    .to_string(),
                contact: Some("jordan@northwind.io".to_string()),
                page: Some("/docs/quickstart".to_string()),
            }),
        ];

        let commits = vec![
            ActivityEvent::Commit(CommitEvent {
                meta: meta("Dana Wei", "website", 110),
                sha: "4c9f2ab81d6e03a7b5c4d2e1f0a9b8c7d6e5f4a3".to_string(),
                message: "fix: debounce search input before querying".to_string(),
                repo: "acme/website".to_string(),
                branch: Some("main".to_string()),
                additions: Some(42),
                deletions: Some(9),
                files_changed: Some(2),
            }),
            ActivityEvent::Commit(CommitEvent {
                meta: meta("Miguel Torres", "api", 200),
                sha: "b7e1c0d9f8a7b6c5d4e3f2a1b0c9d8e7f6a5b4c3".to_string(),
                message: "chore: bump tokio to 1.43".to_string(),
                repo: "acme/api".to_string(),
                branch: Some("main".to_string()),
                additions: Some(3),
                deletions: Some(3),
                files_changed: Some(1),
            }),
        ];

        Self {
            github,
            linear,
            cursor,
            feedback,
            commits,
        }
    }
}

fn step(name: &str, status: &str, duration_ms: u64) -> WorkflowStep {
    WorkflowStep {
        name: name.to_string(),
        status: status.to_string(),
        duration_ms: Some(duration_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sample_feed_validates() {
        Feed::sample().validate().expect("sample feed should be well-formed");
    }

    #[test]
    fn sample_feed_has_every_source() {
        let feed = Feed::sample();
        for source in SourceKind::ALL {
            assert!(
                !feed.collection(source).is_empty(),
                "sample feed should include {source} entities"
            );
        }
    }

    #[test]
    fn order_is_grouped_by_source() {
        let feed = Feed::sample();
        let order = feed.order();
        assert_eq!(order.len(), feed.total());

        // Entries for one source are contiguous and indexed 0..len.
        let mut seen = std::collections::HashMap::new();
        for (source, index) in &order {
            let next = seen.entry(*source).or_insert(0usize);
            assert_eq!(index, next, "indices should count up from zero per source");
            *next += 1;
        }
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let feed = Feed::sample();
        assert!(feed.get(SourceKind::Commit, 999).is_none());
    }

    #[test]
    fn validate_rejects_misfiled_entity() {
        let mut feed = Feed::sample();
        let commit = feed.commits[0].clone();
        feed.github.push(commit);
        assert!(matches!(
            feed.validate(),
            Err(FixtureError::SourceMismatch { .. })
        ));
    }

    #[test]
    fn feed_json_roundtrip() {
        let feed = Feed::sample();
        let json = serde_json::to_string_pretty(&feed).unwrap();
        let back: Feed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, feed);
    }

    #[test]
    fn from_path_loads_and_validates() {
        let feed = Feed::sample();
        let json = serde_json::to_string_pretty(&feed).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = Feed::from_path(file.path()).expect("should load valid feed");
        assert_eq!(loaded.total(), feed.total());
    }

    #[test]
    fn from_path_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(Feed::from_path(file.path()).is_err());
    }

    #[test]
    fn from_path_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(Feed::from_path(&missing).is_err());
    }
}
