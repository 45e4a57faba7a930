//! The detail inspector: a tabbed overlay panel for the selected entity.
//!
//! Exactly one drawer is ever mounted; retargeting the selection swaps its
//! content in place. Every tab body is a pure projection of the entity —
//! the drawer holds no entity data of its own, so closing it needs no
//! cleanup. Tab sets are source-dependent (see
//! [`tabs_for`](crate::tui::app::tabs_for)).

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Widget},
};

use crate::badge::Badge;
use crate::format;
use crate::model::ActivityEvent;
use crate::tui::app::{tabs_for, DrawerState, DrawerTab, Symbols, Theme};

use super::timeline;

/// Placeholder shown when an optional sequence has nothing to render.
const NO_TIMELINE: &str = "No timeline data available";
const NO_COST: &str = "No cost data available";

/// The drawer widget.
#[derive(Debug)]
pub struct DrawerWidget<'a> {
    entity: &'a ActivityEvent,
    state: &'a DrawerState,
    theme: &'a Theme,
    symbols: &'a Symbols,
    now: DateTime<Utc>,
}

impl<'a> DrawerWidget<'a> {
    /// Creates a drawer over the selected entity.
    #[must_use]
    pub fn new(
        entity: &'a ActivityEvent,
        state: &'a DrawerState,
        theme: &'a Theme,
        symbols: &'a Symbols,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            entity,
            state,
            theme,
            symbols,
            now,
        }
    }

    fn active_tab(&self) -> DrawerTab {
        let tabs = tabs_for(self.entity.source());
        tabs.get(self.state.tab_index)
            .copied()
            .unwrap_or(DrawerTab::Overview)
    }

    /// Lines for the active tab's content area.
    fn content_lines(&self) -> Vec<Line<'static>> {
        match self.active_tab() {
            DrawerTab::Overview => overview_lines(self.entity, self.theme, self.symbols, self.now),
            DrawerTab::Timeline => timeline_lines(self.entity, self.state, self.theme, self.symbols),
            DrawerTab::Cost => cost_lines(self.entity, self.theme),
            DrawerTab::Raw => raw_dump(self.entity)
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), self.theme.text_primary)))
                .collect(),
        }
    }
}

impl Widget for DrawerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 6 {
            return;
        }

        // The drawer paints over the feed.
        Clear.render(area, buf);

        let source = self.entity.source();
        let title = format!(" {} · {} ", source.label(), self.entity.meta().actor.name);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.drawer_border)
            .title(Span::styled(title, self.theme.drawer_title));
        let inner = block.inner(area);
        block.render(area, buf);

        let [tab_area, content_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let tabs = tabs_for(source);
        let titles: Vec<Line<'_>> = tabs.iter().map(|t| Line::from(t.title())).collect();
        Tabs::new(titles)
            .select(self.state.tab_index)
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .render(tab_area, buf);

        Paragraph::new(self.content_lines())
            .scroll((self.state.scroll, 0))
            .render(content_area, buf);

        let hint = match self.active_tab() {
            DrawerTab::Timeline => "tab switch · j/k rows · e expand · n/p entity · esc close",
            _ => "tab switch · j/k scroll · n/p entity · esc close",
        };
        Paragraph::new(Line::from(Span::styled(hint, self.theme.text_muted)))
            .render(hint_area, buf);
    }
}

fn kv(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<14}"), theme.text_secondary),
        Span::styled(value, theme.text_primary),
    ])
}

fn kv_badge(label: &str, badge: &Badge, theme: &Theme, symbols: &Symbols) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<14}"), theme.text_secondary),
        badge.span(theme, symbols),
    ])
}

/// Overview tab: client/project identity header plus a per-source
/// key/value block.
#[must_use]
pub fn overview_lines(
    entity: &ActivityEvent,
    theme: &Theme,
    symbols: &Symbols,
    now: DateTime<Utc>,
) -> Vec<Line<'static>> {
    let meta = entity.meta();

    let mut identity = vec![
        Span::styled(meta.actor.name.clone(), theme.card_actor),
        Span::styled(format!("  {}", meta.project), theme.card_context),
    ];
    if let Some(client) = &meta.client_logo {
        identity.push(Span::styled(format!("  @{client}"), theme.text_secondary));
    }
    identity.push(Span::styled(
        format!("  {}", format::relative_time(meta.occurred_at, now)),
        theme.card_timestamp,
    ));

    let mut lines = vec![Line::from(identity), Line::default()];

    match entity {
        ActivityEvent::Github(e) => {
            lines.push(kv("Event Type", e.event_type.clone(), theme));
            lines.push(kv("Action", e.action.clone(), theme));
            lines.push(kv("Repository", e.repo.clone(), theme));
            if let Some(conclusion) = &e.conclusion {
                lines.push(kv_badge("Conclusion", &Badge::status(conclusion), theme, symbols));
            }
            if let Some(branch) = &e.branch {
                lines.push(kv("Branch", branch.clone(), theme));
            }
            if let Some(n) = e.run_number {
                lines.push(kv("Run", format!("#{n}"), theme));
            }
            if let Some(n) = e.pr_number {
                lines.push(kv("Pull Request", format!("#{n}"), theme));
            }
            if let Some(n) = e.issue_number {
                lines.push(kv("Issue", format!("#{n}"), theme));
            }
        }
        ActivityEvent::Linear(e) => {
            lines.push(kv("Identifier", e.identifier.clone(), theme));
            lines.push(kv("Title", e.title.clone(), theme));
            lines.push(kv("Action", e.action.clone(), theme));
            if let Some(state) = &e.state {
                lines.push(kv_badge("State", &Badge::status(state), theme, symbols));
            }
            if let Some(priority) = &e.priority {
                lines.push(kv_badge("Priority", &Badge::severity(priority), theme, symbols));
            }
            if let Some(assignee) = &e.assignee {
                lines.push(kv("Assignee", assignee.clone(), theme));
            }
            if let Some(team) = &e.team {
                lines.push(kv("Team", team.clone(), theme));
            }
        }
        ActivityEvent::Cursor(e) => {
            lines.push(kv("Session", e.session_id.to_string(), theme));
            lines.push(kv("Summary", e.summary.clone(), theme));
            lines.push(kv("Model", e.model.clone(), theme));
            lines.push(kv_badge("Status", &Badge::status(&e.status), theme, symbols));
            if let Some(ms) = e.duration_ms {
                lines.push(kv("Duration", format::duration_ms(ms), theme));
            }
            if let Some(files) = e.files_changed {
                lines.push(kv("Files", files.to_string(), theme));
            }
            if let (Some(a), Some(r)) = (e.lines_added, e.lines_removed) {
                lines.push(kv("Lines", format!("+{a} -{r}"), theme));
            }
        }
        ActivityEvent::Feedback(e) => {
            lines.push(kv_badge("Category", &Badge::status(&e.category), theme, symbols));
            if let Some(rating) = e.rating {
                lines.push(kv("Rating", format!("{rating}/5"), theme));
            }
            if let Some(contact) = &e.contact {
                lines.push(kv("Contact", contact.clone(), theme));
            }
            if let Some(page) = &e.page {
                lines.push(kv("Page", page.clone(), theme));
            }
            lines.push(kv("Message", e.message.clone(), theme));
        }
        ActivityEvent::Commit(e) => {
            lines.push(kv("SHA", e.sha.clone(), theme));
            lines.push(kv("Repository", e.repo.clone(), theme));
            if let Some(branch) = &e.branch {
                lines.push(kv("Branch", branch.clone(), theme));
            }
            lines.push(kv("Message", e.message.clone(), theme));
            if let (Some(a), Some(d)) = (e.additions, e.deletions) {
                lines.push(kv("Diffstat", format!("+{a} -{d}"), theme));
            }
        }
    }

    lines
}

/// Timeline tab: session-event rows for Cursor, plain entries otherwise,
/// and an explicit placeholder when there is nothing to show.
#[must_use]
pub fn timeline_lines(
    entity: &ActivityEvent,
    state: &DrawerState,
    theme: &Theme,
    symbols: &Symbols,
) -> Vec<Line<'static>> {
    match entity {
        ActivityEvent::Cursor(session) if !session.events.is_empty() => timeline::session_rows(
            &session.events,
            &state.expanded,
            state.timeline_cursor,
            theme,
            symbols,
        ),
        ActivityEvent::Cursor(_) => placeholder(NO_TIMELINE, theme),
        other => {
            let entries = &other.meta().timeline;
            if entries.is_empty() {
                placeholder(NO_TIMELINE, theme)
            } else {
                timeline::simple_rows(entries, theme, symbols)
            }
        }
    }
}

/// Cost tab: token counts and spend for metered Cursor sessions.
#[must_use]
pub fn cost_lines(entity: &ActivityEvent, theme: &Theme) -> Vec<Line<'static>> {
    let ActivityEvent::Cursor(session) = entity else {
        return placeholder(NO_COST, theme);
    };
    let Some(cost) = &session.cost else {
        return placeholder(NO_COST, theme);
    };

    let total_tokens =
        cost.input_tokens + cost.output_tokens + cost.cache_read_tokens.unwrap_or(0);

    let mut lines = vec![
        kv("Input", format::compact_count(cost.input_tokens), theme),
        kv("Output", format::compact_count(cost.output_tokens), theme),
    ];
    if let Some(cached) = cost.cache_read_tokens {
        lines.push(kv("Cache reads", format::compact_count(cached), theme));
    }
    lines.push(kv("Total tokens", format::compact_count(total_tokens), theme));
    lines.push(Line::default());
    lines.push(kv("Spend", format!("${:.2}", cost.total_cost_usd), theme));
    lines
}

/// Raw tab: the entity's full structural dump.
///
/// The serialization contract is the entity's serde representation,
/// pretty-printed — the same bytes fixture files and the `dump` subcommand
/// use, for every source.
#[must_use]
pub fn raw_dump(entity: &ActivityEvent) -> String {
    serde_json::to_string_pretty(entity)
        .unwrap_or_else(|e| format!("serialization failed: {e}"))
}

fn placeholder(text: &'static str, theme: &Theme) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(text, theme.text_muted))]
}
