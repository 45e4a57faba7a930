//! Timeline row renderers for the drawer's Timeline tab.
//!
//! Two shapes come through here: plain [`TimelineEntry`] rows (GitHub,
//! Linear, Feedback) and the 18-case [`SessionEvent`] union for Cursor
//! sessions. Session rows with long free text (`user_prompt`,
//! `agent_thought`, `shell_command` output) clamp at
//! [`TRUNCATE_THRESHOLD`] characters; the expansion flag for each row lives
//! in [`DrawerState::expanded`](crate::tui::app::DrawerState) — UI state,
//! never entity data — and toggling twice restores the clamped rendering.

use std::collections::HashSet;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::badge::Badge;
use crate::format;
use crate::model::{SessionEvent, TimelineEntry};
use crate::tui::app::{Symbols, Theme};

/// Character threshold past which free text is clamped behind an expand
/// toggle.
pub const TRUNCATE_THRESHOLD: usize = 120;

/// Renders plain timeline entries, one labelled row each (plus an indented
/// detail row where present).
#[must_use]
pub fn simple_rows(
    entries: &[TimelineEntry],
    theme: &Theme,
    symbols: &Symbols,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in entries {
        let mut spans = vec![
            Span::styled(format!("{} ", symbols.bullet), theme.text_muted),
            Span::styled(entry.label.clone(), theme.text_primary),
            Span::styled(format!("  {}", entry.time), theme.card_timestamp),
        ];
        if let Some(status) = &entry.status {
            spans.push(Span::raw("  "));
            spans.push(Badge::status(status).span(theme, symbols));
        }
        lines.push(Line::from(spans));

        if let Some(detail) = &entry.detail {
            lines.push(Line::from(Span::styled(
                format!("    {detail}"),
                theme.text_muted,
            )));
        }
    }
    lines
}

/// Renders session events, one row group per event.
///
/// `expanded` holds the row indices whose long text is currently unfolded;
/// `cursor` highlights the row under the timeline cursor.
#[must_use]
pub fn session_rows(
    events: &[SessionEvent],
    expanded: &HashSet<usize>,
    cursor: usize,
    theme: &Theme,
    symbols: &Symbols,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (row, event) in events.iter().enumerate() {
        let style = event_style(event, theme);
        let icon = if symbols.is_unicode() {
            event.icon()
        } else {
            event.ascii_icon()
        };

        let mut spans = vec![
            Span::styled(format!("{icon} "), style),
            Span::styled(format!("{:<16}", event.label()), style),
            Span::styled(event_summary(event), theme.text_primary),
        ];
        for extra in event_annotations(event, theme) {
            spans.push(extra);
        }

        let mut header = Line::from(spans);
        if row == cursor {
            header.style = theme.row_selected;
        }
        lines.push(header);

        if let Some(text) = detail_text(event) {
            lines.extend(detail_lines(text, expanded.contains(&row), theme, symbols));
        }
    }
    lines
}

/// Maps an event kind to its theme style class. The mapping is a closed
/// table over the union's tags; the catch-all shares the generic style.
#[must_use]
pub fn event_style(event: &SessionEvent, theme: &Theme) -> Style {
    match event {
        SessionEvent::UserPrompt { .. } => theme.timeline_prompt,
        SessionEvent::AgentThought { .. } => theme.timeline_thought,
        SessionEvent::FileRead { .. }
        | SessionEvent::FileWrite { .. }
        | SessionEvent::FileEdit { .. }
        | SessionEvent::EditNotebook { .. } => theme.timeline_file,
        SessionEvent::ShellCommand { .. } => theme.timeline_shell,
        SessionEvent::GrepSearch { .. }
        | SessionEvent::GlobSearch { .. }
        | SessionEvent::SemanticSearch { .. }
        | SessionEvent::WebSearch { .. } => theme.timeline_search,
        SessionEvent::TodoWrite { .. } | SessionEvent::ReadLints { .. } => theme.timeline_todo,
        SessionEvent::SubagentLaunch { .. }
        | SessionEvent::SubagentResult { .. }
        | SessionEvent::McpTool { .. } => theme.timeline_agent,
        SessionEvent::SessionStart { .. } | SessionEvent::SessionEnd { .. } => {
            theme.timeline_lifecycle
        }
        SessionEvent::Other => theme.timeline_generic,
    }
}

/// One-line summary of an event's own fields.
fn event_summary(event: &SessionEvent) -> String {
    match event {
        SessionEvent::SessionStart { model, cwd } => match cwd {
            Some(cwd) => format!("{model} in {cwd}"),
            None => model.clone(),
        },
        // Long text renders through the detail rows below.
        SessionEvent::UserPrompt { .. } | SessionEvent::AgentThought { .. } => String::new(),
        SessionEvent::FileRead { path, lines } => match lines {
            Some(n) => format!("{path} ({n} lines)"),
            None => path.clone(),
        },
        SessionEvent::FileWrite { path, lines } => match lines {
            Some(n) => format!("{path} ({n} lines)"),
            None => path.clone(),
        },
        SessionEvent::FileEdit {
            path,
            additions,
            deletions,
        } => {
            let mut text = path.clone();
            if let (Some(a), Some(d)) = (additions, deletions) {
                text.push_str(&format!(" (+{a} -{d})"));
            }
            text
        }
        SessionEvent::ShellCommand { command, .. } => command.clone(),
        SessionEvent::GrepSearch { pattern, matches } => match matches {
            Some(n) => format!("/{pattern}/ ({n} matches)"),
            None => format!("/{pattern}/"),
        },
        SessionEvent::GlobSearch { pattern, matches } => match matches {
            Some(n) => format!("{pattern} ({n} matches)"),
            None => pattern.clone(),
        },
        SessionEvent::SemanticSearch { query, results } => match results {
            Some(n) => format!("\"{query}\" ({n} results)"),
            None => format!("\"{query}\""),
        },
        SessionEvent::WebSearch { query, results } => match results {
            Some(n) => format!("\"{query}\" ({n} results)"),
            None => format!("\"{query}\""),
        },
        SessionEvent::TodoWrite { completed, total } => format!("{completed}/{total} done"),
        SessionEvent::ReadLints { files, issues } => {
            format!(
                "{} files, {} issues",
                files.map_or_else(|| "?".to_string(), |n| n.to_string()),
                issues.map_or_else(|| "?".to_string(), |n| n.to_string()),
            )
        }
        SessionEvent::SubagentLaunch { description } => description.clone(),
        SessionEvent::SubagentResult { summary, .. } => summary.clone(),
        SessionEvent::EditNotebook { path, cell } => match cell {
            Some(c) => format!("{path} (cell {c})"),
            None => path.clone(),
        },
        SessionEvent::McpTool { server, tool } => format!("{server}/{tool}"),
        SessionEvent::SessionEnd { outcome, .. } => {
            outcome.clone().unwrap_or_else(|| "ended".to_string())
        }
        SessionEvent::Other => "unrecognized event".to_string(),
    }
}

/// Trailing annotations: durations and exit codes.
fn event_annotations(event: &SessionEvent, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    match event {
        SessionEvent::ShellCommand {
            exit_code,
            duration_ms,
            ..
        } => {
            if let Some(code) = exit_code {
                let style = if *code == 0 {
                    theme.badge_success
                } else {
                    theme.badge_failure
                };
                spans.push(Span::styled(format!("  exit {code}"), style));
            }
            if let Some(ms) = duration_ms {
                spans.push(Span::styled(
                    format!("  {}", format::duration_ms(*ms)),
                    theme.text_muted,
                ));
            }
        }
        SessionEvent::AgentThought {
            duration_ms: Some(ms),
            ..
        }
        | SessionEvent::SubagentResult {
            duration_ms: Some(ms),
            ..
        }
        | SessionEvent::SessionEnd {
            duration_ms: Some(ms),
            ..
        } => {
            spans.push(Span::styled(
                format!("  {}", format::duration_ms(*ms)),
                theme.text_muted,
            ));
        }
        _ => {}
    }
    spans
}

/// The truncatable free text carried by an event, if any.
fn detail_text(event: &SessionEvent) -> Option<&str> {
    match event {
        SessionEvent::UserPrompt { text } | SessionEvent::AgentThought { text, .. } => Some(text),
        SessionEvent::ShellCommand {
            output: Some(output),
            ..
        } => Some(output),
        _ => None,
    }
}

/// Renders detail text either clamped to one row or fully unfolded.
fn detail_lines(
    text: &str,
    expanded: bool,
    theme: &Theme,
    symbols: &Symbols,
) -> Vec<Line<'static>> {
    let flat = format::single_line(text);
    let needs_toggle = flat.chars().count() > TRUNCATE_THRESHOLD;

    if !needs_toggle {
        return vec![Line::from(Span::styled(
            format!("    {flat}"),
            theme.text_secondary,
        ))];
    }

    if expanded {
        let mut lines: Vec<Line<'static>> = text
            .lines()
            .map(|l| Line::from(Span::styled(format!("    {l}"), theme.text_secondary)))
            .collect();
        lines.push(Line::from(Span::styled(
            format!("    {} e to collapse", symbols.expanded),
            theme.text_muted,
        )));
        lines
    } else {
        vec![Line::from(vec![
            Span::styled(
                format!("    {}", format::truncate_chars(&flat, TRUNCATE_THRESHOLD)),
                theme.text_secondary,
            ),
            Span::styled(
                format!(" {} e to expand", symbols.collapsed),
                theme.text_muted,
            ),
        ])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::UNICODE_SYMBOLS;

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn long_prompt() -> SessionEvent {
        SessionEvent::UserPrompt {
            text: "word ".repeat(60).trim_end().to_string(),
        }
    }

    #[test]
    fn simple_rows_render_labels_times_and_status() {
        let entries = vec![TimelineEntry {
            label: "Run started".to_string(),
            time: "27m ago".to_string(),
            detail: Some("runner ubuntu-24.04".to_string()),
            status: Some("running".to_string()),
        }];
        let lines = simple_rows(&entries, &Theme::default(), &UNICODE_SYMBOLS);
        let text = text_of(&lines);
        assert!(text.contains("Run started"));
        assert!(text.contains("27m ago"));
        assert!(text.contains("running"));
        assert!(text.contains("runner ubuntu-24.04"));
    }

    #[test]
    fn long_prompt_is_clamped_with_expand_affordance() {
        let events = vec![long_prompt()];
        let lines = session_rows(
            &events,
            &HashSet::new(),
            0,
            &Theme::default(),
            &UNICODE_SYMBOLS,
        );
        let text = text_of(&lines);
        assert!(text.contains("..."), "clamped text should carry an ellipsis");
        assert!(text.contains("e to expand"));
    }

    #[test]
    fn expanded_prompt_shows_full_text() {
        let events = vec![long_prompt()];
        let expanded: HashSet<usize> = [0].into_iter().collect();
        let lines = session_rows(&events, &expanded, 0, &Theme::default(), &UNICODE_SYMBOLS);
        let text = text_of(&lines);
        assert!(!text.contains("e to expand"));
        assert!(text.contains("e to collapse"));
        // Full word count survives expansion.
        assert_eq!(text.matches("word").count(), 60);
    }

    #[test]
    fn toggle_round_trip_restores_clamped_rendering() {
        let events = vec![long_prompt()];
        let theme = Theme::default();

        let before = text_of(&session_rows(
            &events,
            &HashSet::new(),
            0,
            &theme,
            &UNICODE_SYMBOLS,
        ));

        // Toggle on, then off, through the same state container the drawer
        // uses.
        let mut state = crate::tui::app::DrawerState::default();
        state.toggle_expanded(0);
        state.toggle_expanded(0);

        let after = text_of(&session_rows(
            &events,
            &state.expanded,
            0,
            &theme,
            &UNICODE_SYMBOLS,
        ));
        assert_eq!(before, after, "double toggle should be a no-op");
    }

    #[test]
    fn short_text_has_no_toggle_affordance() {
        let events = vec![SessionEvent::UserPrompt {
            text: "short ask".to_string(),
        }];
        let lines = session_rows(
            &events,
            &HashSet::new(),
            0,
            &Theme::default(),
            &UNICODE_SYMBOLS,
        );
        let text = text_of(&lines);
        assert!(text.contains("short ask"));
        assert!(!text.contains("e to expand"));
    }

    #[test]
    fn shell_exit_codes_style_success_and_failure() {
        let theme = Theme::default();
        let ok = SessionEvent::ShellCommand {
            command: "cargo test".to_string(),
            exit_code: Some(0),
            duration_ms: Some(2_300),
            output: None,
        };
        let bad = SessionEvent::ShellCommand {
            command: "make deploy".to_string(),
            exit_code: Some(2),
            duration_ms: None,
            output: None,
        };

        let ok_spans = event_annotations(&ok, &theme);
        assert_eq!(ok_spans[0].style, theme.badge_success);
        assert!(ok_spans[0].content.contains("exit 0"));
        assert!(ok_spans[1].content.contains("2.3s"));

        let bad_spans = event_annotations(&bad, &theme);
        assert_eq!(bad_spans[0].style, theme.badge_failure);
        assert!(bad_spans[0].content.contains("exit 2"));
    }

    #[test]
    fn unrecognized_event_renders_generic_row() {
        let events = vec![SessionEvent::Other];
        let lines = session_rows(
            &events,
            &HashSet::new(),
            0,
            &Theme::default(),
            &UNICODE_SYMBOLS,
        );
        assert_eq!(lines.len(), 1, "catch-all still gets a row");
        assert!(text_of(&lines).contains("unrecognized event"));
    }

    #[test]
    fn cursor_row_is_highlighted() {
        let theme = Theme::default();
        let events = vec![
            SessionEvent::TodoWrite { completed: 1, total: 2 },
            SessionEvent::TodoWrite { completed: 2, total: 2 },
        ];
        let lines = session_rows(&events, &HashSet::new(), 1, &theme, &UNICODE_SYMBOLS);
        assert_eq!(lines[1].style, theme.row_selected);
        assert_ne!(lines[0].style, theme.row_selected);
    }
}
