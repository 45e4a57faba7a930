//! Frame rendering for the Pulsefeed TUI.
//!
//! Composes the header bar, the scrollable card feed and the hint footer,
//! and overlays the single drawer when a card is selected. Rendering is a
//! projection of [`App`] state; the only thing it writes back is the feed
//! scroll offset, which tracks the cursor.

use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::SourceKind;
use crate::tui::app::App;
use crate::tui::widgets::{card_content, CardShell, DrawerWidget, CARD_HEIGHT};

/// Minimum terminal size the feed can lay out.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 14;

/// Renders one frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_size_warning(frame, area);
        return;
    }

    let [header_area, feed_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, app, header_area);
    render_feed(frame, app, feed_area);
    render_footer(frame, app, footer_area);

    if let Some(entity) = app.selected_entity() {
        let popup = popup_area(area);
        let drawer = DrawerWidget::new(entity, &app.drawer, &app.theme, &app.symbols, Utc::now());
        frame.render_widget(drawer, popup);
    }
}

fn render_size_warning(frame: &mut Frame, area: Rect) {
    let warning = Paragraph::new(format!(
        "Terminal too small ({}x{}), need at least {}x{}",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    ))
    .alignment(Alignment::Center);
    frame.render_widget(warning, area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(" Pulsefeed ", app.theme.title)];
    for source in SourceKind::ALL {
        let count = app.feed.collection(source).len();
        spans.push(Span::styled(
            format!(" {} {count} ", source.label()),
            app.theme.text_secondary,
        ));
        spans.push(Span::styled("·", app.theme.text_muted));
    }
    spans.pop();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_feed(frame: &mut Frame, app: &mut App, area: Rect) {
    let order = app.order().to_vec();
    if order.is_empty() {
        let empty = Paragraph::new("No events yet...")
            .alignment(Alignment::Center)
            .style(app.theme.text_muted);
        frame.render_widget(empty, area);
        return;
    }

    let per_page = ((area.height / CARD_HEIGHT) as usize).max(1);

    // Keep the cursor in view.
    if app.cursor < app.feed_scroll {
        app.feed_scroll = app.cursor;
    } else if app.cursor >= app.feed_scroll + per_page {
        app.feed_scroll = app.cursor + 1 - per_page;
    }

    let now = Utc::now();
    let visible = order
        .iter()
        .enumerate()
        .skip(app.feed_scroll)
        .take(per_page);
    for (slot, (position, &(source, index))) in visible.enumerate() {
        let Some(entity) = app.feed.get(source, index) else {
            continue;
        };
        let content = card_content(entity, &app.theme, &app.symbols, now);
        let highlighted = position == app.cursor;
        let card_area = Rect {
            x: area.x,
            y: area.y + (slot as u16) * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT.min(area.height.saturating_sub((slot as u16) * CARD_HEIGHT)),
        };
        if card_area.height == 0 {
            break;
        }
        frame.render_widget(
            CardShell::new(content, highlighted, &app.theme),
            card_area,
        );
    }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.order().len();
    let position = if total == 0 { 0 } else { app.cursor + 1 };
    let hints = if app.selection.is_selected() {
        "drawer open".to_string()
    } else {
        format!("j/k move · enter inspect · q quit   {position}/{total}")
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, app.theme.text_muted))),
        area,
    );
}

/// Centered popup rectangle for the drawer, roughly 80% of the frame.
fn popup_area(area: Rect) -> Rect {
    let width = (area.width * 4) / 5;
    let height = (area.height * 4) / 5;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Feed;
    use crate::tui::app::{Selection, Theme, UNICODE_SYMBOLS};
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        App::new(Feed::sample(), Theme::default(), UNICODE_SYMBOLS)
    }

    fn terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(width, height)).unwrap()
    }

    fn backend_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn renders_header_counts_and_cards() {
        let mut terminal = terminal(100, 40);
        let mut app = test_app();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = backend_text(&terminal);
        assert!(text.contains("Pulsefeed"));
        assert!(text.contains("GitHub 4"));
        assert!(text.contains("Commit 2"));
        assert!(text.contains("ci-bot"), "first card should be visible");
    }

    #[test]
    fn drawer_overlays_feed_when_selected() {
        let mut terminal = terminal(100, 40);
        let mut app = test_app();
        app.activate(SourceKind::Github, 0);

        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = backend_text(&terminal);
        assert!(text.contains("Overview"));
        assert!(text.contains("workflow_run"));
    }

    #[test]
    fn no_drawer_when_idle() {
        let mut terminal = terminal(100, 40);
        let mut app = test_app();
        assert_eq!(app.selection, Selection::Idle);

        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = backend_text(&terminal);
        assert!(!text.contains("Overview"));
    }

    #[test]
    fn small_terminal_shows_size_warning() {
        let mut terminal = terminal(30, 8);
        let mut app = test_app();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = backend_text(&terminal);
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn scroll_follows_cursor_to_the_end() {
        let mut terminal = terminal(100, 20); // room for ~3 cards
        let mut app = test_app();
        app.cursor = app.order().len() - 1;

        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(app.feed_scroll > 0, "scroll should chase the cursor");

        // Jump back to the top; the window follows again.
        app.cursor = 0;
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert_eq!(app.feed_scroll, 0);
    }

    #[test]
    fn renders_at_exactly_minimum_size() {
        let mut terminal = terminal(MIN_WIDTH, MIN_HEIGHT);
        let mut app = test_app();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = backend_text(&terminal);
        assert!(!text.contains("Terminal too small"));
    }
}
