//! Cursor agent-session events.
//!
//! A [`CursorSession`] is the richest feed entity: alongside the shared
//! metadata it carries the full agent transcript as a sequence of
//! [`SessionEvent`]s (an 18-case tagged union) and an optional
//! [`CostBreakdown`] for the Cost tab.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventMeta, FixtureError};

/// A recorded Cursor agent session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorSession {
    #[serde(flatten)]
    pub meta: EventMeta,

    /// Stable session identifier.
    pub session_id: Uuid,

    /// One-line description of what the session did.
    pub summary: String,

    /// Model that drove the session.
    pub model: String,

    /// Session outcome, resolved through the badge vocabulary
    /// (`"completed"`, `"active"`, `"failed"`).
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_changed: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_added: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_removed: Option<u32>,

    /// Transcript events, oldest first.
    #[serde(default)]
    pub events: Vec<SessionEvent>,

    /// Token usage and spend, when the session has been metered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostBreakdown>,
}

impl CursorSession {
    pub(crate) fn validate(&self) -> Result<(), FixtureError> {
        if self.summary.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "summary",
            });
        }
        if self.model.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: self.meta.id.clone(),
                field: "model",
            });
        }
        if self.events.iter().any(|e| matches!(e, SessionEvent::Other)) {
            return Err(FixtureError::UnknownTag {
                id: self.meta.id.clone(),
                context: "session event",
            });
        }
        Ok(())
    }
}

/// Token usage and spend for a metered session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub input_tokens: u64,
    pub output_tokens: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_read_tokens: Option<u64>,

    /// Total spend in USD.
    pub total_cost_usd: f64,
}

/// One transcript event inside a Cursor session.
///
/// The `type` tag discriminates the union; each case carries its own field
/// set. [`SessionEvent::Other`] absorbs tags introduced by newer transcript
/// producers — validation flags it, and the timeline renderer degrades it to
/// a generic row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStart {
        model: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cwd: Option<String>,
    },
    UserPrompt {
        text: String,
    },
    AgentThought {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
    FileRead {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lines: Option<u32>,
    },
    FileWrite {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lines: Option<u32>,
    },
    FileEdit {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        additions: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deletions: Option<u32>,
    },
    ShellCommand {
        command: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<String>,
    },
    GrepSearch {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matches: Option<u32>,
    },
    GlobSearch {
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matches: Option<u32>,
    },
    SemanticSearch {
        query: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        results: Option<u32>,
    },
    WebSearch {
        query: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        results: Option<u32>,
    },
    TodoWrite {
        completed: u32,
        total: u32,
    },
    ReadLints {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        files: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        issues: Option<u32>,
    },
    SubagentLaunch {
        description: String,
    },
    SubagentResult {
        summary: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
    EditNotebook {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cell: Option<u32>,
    },
    McpTool {
        server: String,
        tool: String,
    },
    SessionEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outcome: Option<String>,
    },

    /// Forward-compatibility catch-all for unrecognized `type` tags.
    #[serde(other)]
    Other,
}

impl SessionEvent {
    /// Short label for the event kind, shown in timeline rows.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SessionEvent::SessionStart { .. } => "session start",
            SessionEvent::UserPrompt { .. } => "prompt",
            SessionEvent::AgentThought { .. } => "thought",
            SessionEvent::FileRead { .. } => "read",
            SessionEvent::FileWrite { .. } => "write",
            SessionEvent::FileEdit { .. } => "edit",
            SessionEvent::ShellCommand { .. } => "shell",
            SessionEvent::GrepSearch { .. } => "grep",
            SessionEvent::GlobSearch { .. } => "glob",
            SessionEvent::SemanticSearch { .. } => "semantic search",
            SessionEvent::WebSearch { .. } => "web search",
            SessionEvent::TodoWrite { .. } => "todos",
            SessionEvent::ReadLints { .. } => "lints",
            SessionEvent::SubagentLaunch { .. } => "subagent",
            SessionEvent::SubagentResult { .. } => "subagent result",
            SessionEvent::EditNotebook { .. } => "notebook",
            SessionEvent::McpTool { .. } => "mcp",
            SessionEvent::SessionEnd { .. } => "session end",
            SessionEvent::Other => "event",
        }
    }

    /// Unicode icon for the event kind.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            SessionEvent::SessionStart { .. } => "\u{25B6}",    // ▶
            SessionEvent::UserPrompt { .. } => "\u{276F}",      // ❯
            SessionEvent::AgentThought { .. } => "\u{273B}",    // ✻
            SessionEvent::FileRead { .. } => "\u{25B8}",        // ▸
            SessionEvent::FileWrite { .. } => "\u{25AA}",       // ▪
            SessionEvent::FileEdit { .. } => "\u{270E}",        // ✎
            SessionEvent::ShellCommand { .. } => "$",
            SessionEvent::GrepSearch { .. } => "\u{2315}",      // ⌕
            SessionEvent::GlobSearch { .. } => "\u{2042}",      // ⁂
            SessionEvent::SemanticSearch { .. } => "\u{224B}",  // ≋
            SessionEvent::WebSearch { .. } => "\u{2316}",       // ⌖
            SessionEvent::TodoWrite { .. } => "\u{2611}",       // ☑
            SessionEvent::ReadLints { .. } => "\u{26A0}",       // ⚠
            SessionEvent::SubagentLaunch { .. } => "\u{2442}",  // ⑂
            SessionEvent::SubagentResult { .. } => "\u{2443}",  // ⑃
            SessionEvent::EditNotebook { .. } => "\u{25A4}",    // ▤
            SessionEvent::McpTool { .. } => "\u{2699}",         // ⚙
            SessionEvent::SessionEnd { .. } => "\u{25A0}",      // ■
            SessionEvent::Other => "\u{2022}",                  // •
        }
    }

    /// ASCII fallback icon for limited terminals.
    #[must_use]
    pub fn ascii_icon(&self) -> &'static str {
        match self {
            SessionEvent::SessionStart { .. } => "[>]",
            SessionEvent::UserPrompt { .. } => "[?]",
            SessionEvent::AgentThought { .. } => "[~]",
            SessionEvent::FileRead { .. } => "[r]",
            SessionEvent::FileWrite { .. } => "[w]",
            SessionEvent::FileEdit { .. } => "[e]",
            SessionEvent::ShellCommand { .. } => "[$]",
            SessionEvent::GrepSearch { .. } => "[/]",
            SessionEvent::GlobSearch { .. } => "[*]",
            SessionEvent::SemanticSearch { .. } => "[s]",
            SessionEvent::WebSearch { .. } => "[w]",
            SessionEvent::TodoWrite { .. } => "[t]",
            SessionEvent::ReadLints { .. } => "[!]",
            SessionEvent::SubagentLaunch { .. } => "[a]",
            SessionEvent::SubagentResult { .. } => "[A]",
            SessionEvent::EditNotebook { .. } => "[n]",
            SessionEvent::McpTool { .. } => "[m]",
            SessionEvent::SessionEnd { .. } => "[.]",
            SessionEvent::Other => "[-]",
        }
    }
}
