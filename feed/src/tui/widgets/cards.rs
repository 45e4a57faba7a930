//! Per-source card content builders and the preview content dispatcher.
//!
//! [`card_content`] dispatches on the entity's `source` tag to one builder
//! per source; each builder maps only its own variant's fields into
//! [`CardContent`] slots. The GitHub and Linear builders nest a second
//! dispatch on the preview payload's `kind` tag — the preview content
//! dispatcher — with a safe default branch for unrecognized kinds.

use chrono::{DateTime, Utc};
use ratatui::text::{Line, Span};

use crate::badge::Badge;
use crate::format;
use crate::model::{
    ActivityEvent, CommitEvent, CursorSession, EventMeta, FeedbackSubmission, GithubEvent,
    GithubPreview, LinearEvent, LinearPreview, SourceKind,
};
use crate::tui::app::{Symbols, Theme};

use super::card::CardContent;

/// Character budget for one body line of free text.
const BODY_TEXT_WIDTH: usize = 72;

/// Cell count of the cycle progress bar.
const PROGRESS_BAR_WIDTH: u32 = 16;

/// Builds card slot content for any feed entity.
#[must_use]
pub fn card_content(
    entity: &ActivityEvent,
    theme: &Theme,
    symbols: &Symbols,
    now: DateTime<Utc>,
) -> CardContent {
    match entity {
        ActivityEvent::Github(e) => github_card(e, theme, symbols, now),
        ActivityEvent::Linear(e) => linear_card(e, theme, symbols, now),
        ActivityEvent::Cursor(e) => cursor_card(e, theme, symbols, now),
        ActivityEvent::Feedback(e) => feedback_card(e, theme, symbols, now),
        ActivityEvent::Commit(e) => commit_card(e, theme, symbols, now),
    }
}

/// Shared header line: actor, project, optional client chip, relative time.
fn header_line(meta: &EventMeta, theme: &Theme, now: DateTime<Utc>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(meta.actor.name.clone(), theme.card_actor),
        Span::styled(" · ", theme.text_muted),
        Span::styled(meta.project.clone(), theme.card_context),
    ];
    if let Some(client) = &meta.client_logo {
        spans.push(Span::styled(" · ", theme.text_muted));
        spans.push(Span::styled(format!("@{client}"), theme.text_secondary));
    }
    spans.push(Span::styled(" · ", theme.text_muted));
    spans.push(Span::styled(
        format::relative_time(meta.occurred_at, now),
        theme.card_timestamp,
    ));
    Line::from(spans)
}

fn rail(source: SourceKind, meta: &EventMeta, symbols: &Symbols) -> (String, String) {
    let icon = if symbols.is_unicode() {
        source.icon()
    } else {
        source.ascii_icon()
    };
    (icon.to_string(), format::initials(&meta.actor.name))
}

fn body_text_line(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format::truncate_chars(&format::single_line(text), BODY_TEXT_WIDTH),
        theme.text_primary,
    ))
}

// =============================================================================
// GitHub
// =============================================================================

fn github_card(
    event: &GithubEvent,
    theme: &Theme,
    symbols: &Symbols,
    now: DateTime<Utc>,
) -> CardContent {
    // Fallback body first: the preview dispatch only runs when a preview is
    // actually present.
    let body = match &event.preview {
        None => vec![body_text_line(&github_fallback_text(event), theme)],
        Some(preview) => github_preview_lines(preview, theme, symbols),
    };

    let mut footer = vec![Badge::vendor(SourceKind::Github).span(theme, symbols)];
    if let Some(conclusion) = &event.conclusion {
        footer.push(Span::raw("  "));
        footer.push(Badge::status(conclusion).span(theme, symbols));
    } else {
        footer.push(Span::raw("  "));
        footer.push(Badge::status(&event.action).span(theme, symbols));
    }
    footer.push(Span::styled(
        format!("  {}", event.repo),
        theme.card_context,
    ));
    if let Some(n) = event.run_number {
        footer.push(Span::styled(format!("  run #{n}"), theme.text_muted));
    }
    if let Some(n) = event.pr_number {
        footer.push(Span::styled(format!("  PR #{n}"), theme.text_muted));
    }
    if let Some(n) = event.issue_number {
        footer.push(Span::styled(format!("  issue #{n}"), theme.text_muted));
    }

    let (rail_icon, rail_tag) = rail(SourceKind::Github, &event.meta, symbols);
    CardContent {
        rail_icon,
        rail_tag,
        header: header_line(&event.meta, theme, now),
        body,
        footer: Line::from(footer),
    }
}

fn github_fallback_text(event: &GithubEvent) -> String {
    let mut text = format!("{} {} on {}", event.event_type, event.action, event.repo);
    if let Some(branch) = &event.branch {
        text.push_str(&format!(" ({branch})"));
    }
    text
}

/// The GitHub preview content dispatcher: one mini-layout per preview kind,
/// and nothing at all for kinds this build does not recognize.
#[must_use]
pub fn github_preview_lines(
    preview: &GithubPreview,
    theme: &Theme,
    symbols: &Symbols,
) -> Vec<Line<'static>> {
    match preview {
        GithubPreview::WorkflowSteps { steps } => steps
            .iter()
            .map(|step| {
                let badge = Badge::status(&step.status);
                let mut spans = vec![
                    Span::styled(
                        format!("{} ", badge.variant.symbol(symbols)),
                        badge.variant.style(theme),
                    ),
                    Span::styled(step.name.clone(), theme.text_primary),
                ];
                if let Some(ms) = step.duration_ms {
                    spans.push(Span::styled(
                        format!("  {}", format::duration_ms(ms)),
                        theme.text_muted,
                    ));
                }
                Line::from(spans)
            })
            .collect(),

        GithubPreview::CommitList { commits } => commits
            .iter()
            .map(|commit| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", format::short_sha(&commit.sha)),
                        theme.badge_accent,
                    ),
                    Span::styled(
                        format::truncate_chars(&commit.message, BODY_TEXT_WIDTH),
                        theme.text_primary,
                    ),
                ])
            })
            .collect(),

        GithubPreview::FileChanges { files } => files
            .iter()
            .map(|file| {
                Line::from(vec![
                    Span::styled(file.path.clone(), theme.text_primary),
                    Span::styled(format!("  +{}", file.additions), theme.badge_success),
                    Span::styled(format!(" -{}", file.deletions), theme.badge_failure),
                ])
            })
            .collect(),

        GithubPreview::ReviewBody { state, body } => vec![
            Line::from(vec![
                Span::styled("review ".to_string(), theme.text_secondary),
                Badge::status(state).span(theme, symbols),
            ]),
            body_text_line(body, theme),
        ],

        GithubPreview::ReleaseNotes { tag, body } => vec![
            Line::from(Span::styled(tag.clone(), theme.badge_accent)),
            body_text_line(body, theme),
        ],

        GithubPreview::Vulnerability {
            severity,
            package,
            summary,
        } => vec![
            Line::from(vec![
                Badge::severity(severity).span(theme, symbols),
                Span::styled(format!("  {package}"), theme.text_primary),
            ]),
            body_text_line(summary, theme),
        ],

        GithubPreview::IssueBody { body, labels } => {
            let mut lines = vec![body_text_line(body, theme)];
            if !labels.is_empty() {
                let chips = labels
                    .iter()
                    .map(|l| format!("{} {l}", symbols.bullet))
                    .collect::<Vec<_>>()
                    .join("  ");
                lines.push(Line::from(Span::styled(chips, theme.badge_accent)));
            }
            lines
        }

        // Unrecognized kinds render nothing for the slot.
        GithubPreview::Unknown => Vec::new(),
    }
}

// =============================================================================
// Linear
// =============================================================================

fn linear_card(
    event: &LinearEvent,
    theme: &Theme,
    symbols: &Symbols,
    now: DateTime<Utc>,
) -> CardContent {
    let body = match &event.preview {
        None => vec![body_text_line(&event.title, theme)],
        Some(preview) => linear_preview_lines(preview, theme, symbols),
    };

    let mut footer = vec![
        Badge::vendor(SourceKind::Linear).span(theme, symbols),
        Span::styled(format!("  {}", event.identifier), theme.badge_accent),
    ];
    if let Some(state) = &event.state {
        footer.push(Span::raw("  "));
        footer.push(Badge::status(state).span(theme, symbols));
    }
    if let Some(priority) = &event.priority {
        footer.push(Span::raw("  "));
        footer.push(Badge::severity(priority).span(theme, symbols));
    }
    if let Some(assignee) = &event.assignee {
        footer.push(Span::styled(format!("  {assignee}"), theme.text_muted));
    }

    let (rail_icon, rail_tag) = rail(SourceKind::Linear, &event.meta, symbols);
    CardContent {
        rail_icon,
        rail_tag,
        header: header_line(&event.meta, theme, now),
        body,
        footer: Line::from(footer),
    }
}

/// The Linear preview content dispatcher.
#[must_use]
pub fn linear_preview_lines(
    preview: &LinearPreview,
    theme: &Theme,
    symbols: &Symbols,
) -> Vec<Line<'static>> {
    match preview {
        LinearPreview::IssueDescription { body, sub_issues } => {
            let mut lines = vec![body_text_line(body, theme)];
            for sub in sub_issues {
                let (glyph, style) = if sub.done {
                    (symbols.success, theme.badge_success)
                } else {
                    (symbols.bullet, theme.text_secondary)
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{glyph} "), style),
                    Span::styled(format!("{} ", sub.identifier), theme.badge_accent),
                    Span::styled(sub.title.clone(), theme.text_primary),
                ]));
            }
            lines
        }

        LinearPreview::Comment { author, body } => {
            let who = author.clone().unwrap_or_else(|| "someone".to_string());
            vec![
                Line::from(Span::styled(
                    format!("{who} commented"),
                    theme.text_secondary,
                )),
                body_text_line(body, theme),
            ]
        }

        LinearPreview::CycleProgress {
            cycle,
            completed,
            total,
        } => {
            let filled = if *total == 0 {
                0
            } else {
                (completed * PROGRESS_BAR_WIDTH / total).min(PROGRESS_BAR_WIDTH)
            };
            let bar: String = symbols.bar_full.repeat(filled as usize)
                + &symbols.bar_empty.repeat((PROGRESS_BAR_WIDTH - filled) as usize);
            vec![
                Line::from(Span::styled(cycle.clone(), theme.text_primary)),
                Line::from(vec![
                    Span::styled(bar, theme.badge_info),
                    Span::styled(format!(" {completed}/{total}"), theme.text_secondary),
                ]),
            ]
        }

        LinearPreview::StateTransition { from, to } => vec![Line::from(vec![
            Span::styled(from.clone(), theme.badge_neutral),
            Span::styled(format!(" {} ", symbols.arrow), theme.text_muted),
            Badge::status(to).span(theme, symbols),
        ])],

        LinearPreview::Labels { labels } => {
            let chips = labels
                .iter()
                .map(|l| format!("{} {}", symbols.bullet, l.name))
                .collect::<Vec<_>>()
                .join("  ");
            vec![Line::from(Span::styled(chips, theme.badge_accent))]
        }

        LinearPreview::Unknown => Vec::new(),
    }
}

// =============================================================================
// Cursor
// =============================================================================

fn cursor_card(
    session: &CursorSession,
    theme: &Theme,
    symbols: &Symbols,
    now: DateTime<Utc>,
) -> CardContent {
    let mut stats = vec![Span::styled(
        format!("{} events", session.events.len()),
        theme.text_secondary,
    )];
    if let Some(files) = session.files_changed {
        stats.push(Span::styled(
            format!(" · {files} files"),
            theme.text_secondary,
        ));
    }
    if let Some(added) = session.lines_added {
        stats.push(Span::styled(format!(" · +{added}"), theme.badge_success));
    }
    if let Some(removed) = session.lines_removed {
        stats.push(Span::styled(format!(" -{removed}"), theme.badge_failure));
    }

    let mut footer = vec![
        Badge::vendor(SourceKind::Cursor).span(theme, symbols),
        Span::raw("  "),
        Badge::status(&session.status).span(theme, symbols),
        Span::styled(format!("  {}", session.model), theme.card_context),
    ];
    if let Some(ms) = session.duration_ms {
        footer.push(Span::styled(
            format!("  {}", format::duration_ms(ms)),
            theme.text_muted,
        ));
    }

    let (rail_icon, rail_tag) = rail(SourceKind::Cursor, &session.meta, symbols);
    CardContent {
        rail_icon,
        rail_tag,
        header: header_line(&session.meta, theme, now),
        body: vec![body_text_line(&session.summary, theme), Line::from(stats)],
        footer: Line::from(footer),
    }
}

// =============================================================================
// Feedback
// =============================================================================

fn feedback_card(
    submission: &FeedbackSubmission,
    theme: &Theme,
    symbols: &Symbols,
    now: DateTime<Utc>,
) -> CardContent {
    let mut body = vec![body_text_line(&submission.message, theme)];
    if let Some(page) = &submission.page {
        body.push(Line::from(Span::styled(
            format!("on {page}"),
            theme.text_muted,
        )));
    }

    let mut footer = vec![
        Badge::vendor(SourceKind::Feedback).span(theme, symbols),
        Span::raw("  "),
        Badge::status(&submission.category).span(theme, symbols),
    ];
    if let Some(rating) = submission.rating {
        footer.push(Span::styled(
            format!("  {}", rating_stars(rating, symbols)),
            theme.badge_warning,
        ));
    }

    let (rail_icon, rail_tag) = rail(SourceKind::Feedback, &submission.meta, symbols);
    CardContent {
        rail_icon,
        rail_tag,
        header: header_line(&submission.meta, theme, now),
        body,
        footer: Line::from(footer),
    }
}

/// Renders a 1-5 rating as stars, clamping out-of-range fixture values.
fn rating_stars(rating: u8, symbols: &Symbols) -> String {
    let rating = rating.min(5) as usize;
    let (full, empty) = if symbols.is_unicode() {
        ('★', '☆')
    } else {
        ('*', '.')
    };
    let mut stars = String::new();
    for i in 0..5 {
        stars.push(if i < rating { full } else { empty });
    }
    stars
}

// =============================================================================
// Commit
// =============================================================================

fn commit_card(
    commit: &CommitEvent,
    theme: &Theme,
    symbols: &Symbols,
    now: DateTime<Utc>,
) -> CardContent {
    let mut diffstat = Vec::new();
    if let Some(added) = commit.additions {
        diffstat.push(Span::styled(format!("+{added}"), theme.badge_success));
    }
    if let Some(removed) = commit.deletions {
        diffstat.push(Span::styled(format!(" -{removed}"), theme.badge_failure));
    }
    if let Some(files) = commit.files_changed {
        diffstat.push(Span::styled(
            format!(" in {files} files"),
            theme.text_secondary,
        ));
    }
    if diffstat.is_empty() {
        diffstat.push(Span::styled("no diffstat".to_string(), theme.text_muted));
    }

    let mut footer = vec![
        Badge::vendor(SourceKind::Commit).span(theme, symbols),
        Span::styled(
            format!("  {}", format::short_sha(&commit.sha)),
            theme.badge_accent,
        ),
        Span::styled(format!("  {}", commit.repo), theme.card_context),
    ];
    if let Some(branch) = &commit.branch {
        footer.push(Span::styled(format!("  {branch}"), theme.text_muted));
    }

    let (rail_icon, rail_tag) = rail(SourceKind::Commit, &commit.meta, symbols);
    CardContent {
        rail_icon,
        rail_tag,
        header: header_line(&commit.meta, theme, now),
        body: vec![body_text_line(&commit.message, theme), Line::from(diffstat)],
        footer: Line::from(footer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::github::{CommitRef, FileChange, WorkflowStep};
    use crate::model::linear::{IssueLabel, SubIssue};
    use crate::model::Feed;
    use crate::tui::app::{ASCII_SYMBOLS, UNICODE_SYMBOLS};

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn every_sample_entity_builds_card_content() {
        let feed = Feed::sample();
        let theme = Theme::default();
        let now = Utc::now();
        for source in SourceKind::ALL {
            for entity in feed.collection(source) {
                let content = card_content(entity, &theme, &UNICODE_SYMBOLS, now);
                assert!(!content.rail_icon.is_empty());
                assert!(!line_text(&content.header).is_empty());
                assert!(!line_text(&content.footer).is_empty());
            }
        }
    }

    #[test]
    fn workflow_steps_render_one_row_per_step() {
        let steps = (0..6)
            .map(|i| WorkflowStep {
                name: format!("step {i}"),
                status: "success".to_string(),
                duration_ms: Some(1_000),
            })
            .collect();
        let preview = GithubPreview::WorkflowSteps { steps };

        let lines = github_preview_lines(&preview, &Theme::default(), &UNICODE_SYMBOLS);
        assert_eq!(lines.len(), 6, "six steps should yield six rows");
        for line in &lines {
            assert!(line_text(line).contains("step"));
        }
    }

    #[test]
    fn all_known_github_preview_kinds_render_non_empty() {
        let theme = Theme::default();
        let previews = vec![
            GithubPreview::WorkflowSteps {
                steps: vec![WorkflowStep {
                    name: "build".to_string(),
                    status: "success".to_string(),
                    duration_ms: None,
                }],
            },
            GithubPreview::CommitList {
                commits: vec![CommitRef {
                    sha: "a1b2c3d4".to_string(),
                    message: "fix".to_string(),
                }],
            },
            GithubPreview::FileChanges {
                files: vec![FileChange {
                    path: "src/lib.rs".to_string(),
                    additions: 1,
                    deletions: 2,
                }],
            },
            GithubPreview::ReviewBody {
                state: "approved".to_string(),
                body: "looks good".to_string(),
            },
            GithubPreview::ReleaseNotes {
                tag: "v1.2.0".to_string(),
                body: "notes".to_string(),
            },
            GithubPreview::Vulnerability {
                severity: "high".to_string(),
                package: "openssl".to_string(),
                summary: "bad".to_string(),
            },
            GithubPreview::IssueBody {
                body: "something broke".to_string(),
                labels: vec!["bug".to_string()],
            },
        ];
        for preview in &previews {
            let lines = github_preview_lines(preview, &theme, &UNICODE_SYMBOLS);
            assert!(!lines.is_empty(), "{preview:?} should render a sub-layout");
        }
    }

    #[test]
    fn unknown_github_preview_renders_nothing() {
        let lines =
            github_preview_lines(&GithubPreview::Unknown, &Theme::default(), &UNICODE_SYMBOLS);
        assert!(lines.is_empty());
    }

    #[test]
    fn all_known_linear_preview_kinds_render_non_empty() {
        let theme = Theme::default();
        let previews = vec![
            LinearPreview::IssueDescription {
                body: "desc".to_string(),
                sub_issues: vec![SubIssue {
                    identifier: "ENG-1".to_string(),
                    title: "sub".to_string(),
                    done: true,
                }],
            },
            LinearPreview::Comment {
                author: Some("Priya".to_string()),
                body: "ping".to_string(),
            },
            LinearPreview::CycleProgress {
                cycle: "Cycle 14".to_string(),
                completed: 8,
                total: 12,
            },
            LinearPreview::StateTransition {
                from: "Todo".to_string(),
                to: "In Progress".to_string(),
            },
            LinearPreview::Labels {
                labels: vec![IssueLabel {
                    name: "perf".to_string(),
                    color: None,
                }],
            },
        ];
        for preview in &previews {
            let lines = linear_preview_lines(preview, &theme, &UNICODE_SYMBOLS);
            assert!(!lines.is_empty(), "{preview:?} should render a sub-layout");
        }
    }

    #[test]
    fn unknown_linear_preview_renders_nothing() {
        let lines =
            linear_preview_lines(&LinearPreview::Unknown, &Theme::default(), &UNICODE_SYMBOLS);
        assert!(lines.is_empty());
    }

    #[test]
    fn cycle_progress_handles_zero_total() {
        let preview = LinearPreview::CycleProgress {
            cycle: "Empty".to_string(),
            completed: 0,
            total: 0,
        };
        let lines = linear_preview_lines(&preview, &Theme::default(), &UNICODE_SYMBOLS);
        assert_eq!(lines.len(), 2);
        assert!(line_text(&lines[1]).contains("0/0"));
    }

    #[test]
    fn missing_preview_falls_back_to_body_text() {
        let feed = Feed::sample();
        let theme = Theme::default();
        let now = Utc::now();

        // Strip the preview off a sample GitHub event.
        let ActivityEvent::Github(mut event) = feed.github[0].clone() else {
            panic!("sample github collection should hold github events");
        };
        event.preview = None;
        let content = card_content(
            &ActivityEvent::Github(event),
            &theme,
            &UNICODE_SYMBOLS,
            now,
        );
        let body = line_text(&content.body[0]);
        assert!(
            body.contains("workflow_run"),
            "fallback body should describe the event: {body}"
        );
    }

    #[test]
    fn rating_stars_clamp_and_switch_symbol_sets() {
        assert_eq!(rating_stars(3, &UNICODE_SYMBOLS), "★★★☆☆");
        assert_eq!(rating_stars(9, &UNICODE_SYMBOLS), "★★★★★");
        assert_eq!(rating_stars(2, &ASCII_SYMBOLS), "**...");
    }

    #[test]
    fn github_footer_shows_success_conclusion_badge() {
        let feed = Feed::sample();
        let theme = Theme::default();
        let content = card_content(&feed.github[0], &theme, &UNICODE_SYMBOLS, Utc::now());
        let footer = line_text(&content.footer);
        assert!(footer.contains("success"), "footer was: {footer}");
        assert!(footer.contains("acme/website"));
    }
}
