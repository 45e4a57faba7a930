//! Badge vocabulary: the single place status/severity/vendor strings map to
//! visual variants.
//!
//! Entity fields carry arbitrary strings ("success", "Urgent", "high", ...).
//! [`resolve_badge`] folds them into the closed [`BadgeVariant`] set; every
//! card renderer and the drawer style badges through it rather than deriving
//! colors locally. Unmapped values fall back to [`BadgeVariant::Neutral`] —
//! resolution never fails and never yields an empty result.

use ratatui::style::Style;
use ratatui::text::Span;

use crate::tui::app::{Symbols, Theme};

/// Which vocabulary a raw string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    /// Lifecycle outcomes: conclusions, workflow states, session status.
    Status,
    /// Security/priority severity ladders.
    Severity,
    /// Integration vendor chips.
    Vendor,
}

/// The closed set of visual treatments a badge can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    Success,
    Failure,
    Warning,
    Info,
    Accent,
    #[default]
    Neutral,
}

impl BadgeVariant {
    /// The style for this variant under the given theme.
    #[must_use]
    pub fn style(self, theme: &Theme) -> Style {
        match self {
            BadgeVariant::Success => theme.badge_success,
            BadgeVariant::Failure => theme.badge_failure,
            BadgeVariant::Warning => theme.badge_warning,
            BadgeVariant::Info => theme.badge_info,
            BadgeVariant::Accent => theme.badge_accent,
            BadgeVariant::Neutral => theme.badge_neutral,
        }
    }

    /// A status glyph rendered next to the label where one applies.
    #[must_use]
    pub fn symbol(self, symbols: &Symbols) -> &'static str {
        match self {
            BadgeVariant::Success => symbols.success,
            BadgeVariant::Failure => symbols.failure,
            BadgeVariant::Warning => symbols.warning,
            BadgeVariant::Info | BadgeVariant::Accent | BadgeVariant::Neutral => symbols.bullet,
        }
    }
}

/// Resolves an arbitrary string into a badge variant.
///
/// Matching is case-insensitive; underscores and hyphens are treated alike.
/// Values outside the closed vocabulary resolve to [`BadgeVariant::Neutral`].
#[must_use]
pub fn resolve_badge(kind: BadgeKind, value: &str) -> BadgeVariant {
    let normalized: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    match kind {
        BadgeKind::Status => match normalized.as_str() {
            "success" | "succeeded" | "completed" | "done" | "merged" | "passed" | "resolved"
            | "deployed" => BadgeVariant::Success,
            "failure" | "failed" | "error" | "crashed" | "timed_out" | "broken" => {
                BadgeVariant::Failure
            }
            "warning" | "needs_review" | "changes_requested" | "action_required" | "flaky" => {
                BadgeVariant::Warning
            }
            "pending" | "queued" | "running" | "in_progress" | "in_review" | "active"
            | "started" => BadgeVariant::Info,
            "open" | "opened" | "created" | "published" | "pushed" | "new" => BadgeVariant::Accent,
            "closed" | "cancelled" | "canceled" | "skipped" | "archived" | "backlog" | "todo" => {
                BadgeVariant::Neutral
            }
            _ => BadgeVariant::Neutral,
        },
        BadgeKind::Severity => match normalized.as_str() {
            "critical" | "urgent" | "high" => BadgeVariant::Failure,
            "medium" | "moderate" => BadgeVariant::Warning,
            "low" | "minor" => BadgeVariant::Info,
            "none" | "info" | "informational" => BadgeVariant::Neutral,
            _ => BadgeVariant::Neutral,
        },
        BadgeKind::Vendor => match normalized.as_str() {
            "github" => BadgeVariant::Accent,
            "linear" => BadgeVariant::Info,
            "cursor" => BadgeVariant::Success,
            "feedback" => BadgeVariant::Warning,
            "commit" | "git" => BadgeVariant::Neutral,
            _ => BadgeVariant::Neutral,
        },
    }
}

/// A resolved badge ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl Badge {
    /// Resolves a status string into a badge.
    #[must_use]
    pub fn status(label: &str) -> Self {
        Self {
            label: label.to_string(),
            variant: resolve_badge(BadgeKind::Status, label),
        }
    }

    /// Resolves a severity string into a badge.
    #[must_use]
    pub fn severity(label: &str) -> Self {
        Self {
            label: label.to_string(),
            variant: resolve_badge(BadgeKind::Severity, label),
        }
    }

    /// Builds the vendor chip for a feed source.
    #[must_use]
    pub fn vendor(source: crate::model::SourceKind) -> Self {
        let label = source.label();
        Self {
            label: label.to_string(),
            variant: resolve_badge(BadgeKind::Vendor, label),
        }
    }

    /// Renders the badge as a styled span, glyph included.
    #[must_use]
    pub fn span<'a>(&self, theme: &Theme, symbols: &Symbols) -> Span<'a> {
        Span::styled(
            format!("{} {}", self.variant.symbol(symbols), self.label),
            self.variant.style(theme),
        )
    }
}
