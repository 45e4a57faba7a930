//! End-to-end behavior of the selection state machine and the drawer.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use pulsefeed::badge::{resolve_badge, BadgeKind, BadgeVariant};
use pulsefeed::model::{ActivityEvent, Feed, GithubPreview, SourceKind};
use pulsefeed::tui::app::{tabs_for, DrawerTab, UNICODE_SYMBOLS};
use pulsefeed::tui::widgets::cards::github_preview_lines;
use pulsefeed::tui::widgets::drawer;
use pulsefeed::tui::{App, DrawerState, Selection, Symbols, Theme};

fn app() -> App {
    App::new(Feed::sample(), Theme::default(), UNICODE_SYMBOLS)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn text_of(lines: &[ratatui::text::Line<'_>]) -> String {
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

#[test]
fn switching_selection_never_passes_through_idle() {
    let mut app = app();

    app.activate(SourceKind::Github, 0);
    assert_eq!(
        app.selection.target(),
        Some((SourceKind::Github, 0)),
        "first activation selects A"
    );

    // Activate B directly; there is no intermediate Idle frame to observe
    // because activate() is a single synchronous transition.
    app.activate(SourceKind::Cursor, 1);
    assert_eq!(app.selection.target(), Some((SourceKind::Cursor, 1)));

    app.close_drawer();
    assert_eq!(app.selection, Selection::Idle);
}

#[test]
fn closing_from_every_tab_yields_idle() {
    for tab in 0..4 {
        let mut app = app();
        app.activate(SourceKind::Cursor, 0);
        app.select_tab(tab);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.selection, Selection::Idle, "close from tab {tab}");
    }
}

#[test]
fn tab_sets_per_source_are_exact() {
    let cases: [(SourceKind, &[DrawerTab]); 5] = [
        (
            SourceKind::Github,
            &[DrawerTab::Overview, DrawerTab::Timeline, DrawerTab::Raw],
        ),
        (
            SourceKind::Linear,
            &[DrawerTab::Overview, DrawerTab::Timeline, DrawerTab::Raw],
        ),
        (
            SourceKind::Cursor,
            &[
                DrawerTab::Overview,
                DrawerTab::Timeline,
                DrawerTab::Cost,
                DrawerTab::Raw,
            ],
        ),
        (
            SourceKind::Feedback,
            &[DrawerTab::Overview, DrawerTab::Timeline, DrawerTab::Raw],
        ),
        (SourceKind::Commit, &[DrawerTab::Overview, DrawerTab::Raw]),
    ];

    // Verified against actual fixture entities, not just the table.
    let feed = Feed::sample();
    for (source, expected) in cases {
        assert!(!feed.collection(source).is_empty());
        assert_eq!(tabs_for(source), expected, "{source} tab set");
    }
}

#[test]
fn retargeting_resets_the_tab_to_overview() {
    let mut app = app();
    app.activate(SourceKind::Cursor, 0);
    app.select_tab(2); // Cost

    app.activate(SourceKind::Github, 1);
    assert_eq!(app.drawer.tab_index, 0);
    assert_eq!(app.current_tab(), Some(DrawerTab::Overview));
}

#[test]
fn unknown_badge_value_is_neutral_not_an_error() {
    assert_eq!(
        resolve_badge(BadgeKind::Status, "TotallyUnknownValue"),
        BadgeVariant::Neutral
    );
}

/// The concrete end-to-end scenario: a completed workflow run with a
/// six-step preview, inspected across all of its drawer tabs.
#[test]
fn workflow_run_scenario() {
    let feed = Feed::sample();
    let theme = Theme::default();
    let symbols = Symbols::detect();

    let entity = &feed.github[0];
    let ActivityEvent::Github(event) = entity else {
        panic!("first github fixture should be a github event");
    };
    assert_eq!(event.event_type, "workflow_run");
    assert_eq!(event.action, "completed");
    assert_eq!(event.conclusion.as_deref(), Some("success"));

    // The conclusion badge resolves to the success variant.
    assert_eq!(
        resolve_badge(BadgeKind::Status, event.conclusion.as_deref().unwrap()),
        BadgeVariant::Success
    );

    // The preview dispatcher renders exactly one row per step.
    let preview = event.preview.as_ref().expect("fixture carries a preview");
    let GithubPreview::WorkflowSteps { steps } = preview else {
        panic!("fixture preview should be workflow steps");
    };
    assert_eq!(steps.len(), 6);
    let rows = github_preview_lines(preview, &theme, &UNICODE_SYMBOLS);
    assert_eq!(rows.len(), 6);

    // Overview names the event type.
    let overview = text_of(&drawer::overview_lines(
        entity,
        &theme,
        &symbols,
        Utc::now(),
    ));
    assert!(overview.contains("Event Type"));
    assert!(overview.contains("workflow_run"));

    // Timeline shows the three fixture entries in their original order.
    let timeline = text_of(&drawer::timeline_lines(
        entity,
        &DrawerState::default(),
        &theme,
        &symbols,
    ));
    let queued = timeline.find("Run queued").expect("first entry");
    let started = timeline.find("Run started").expect("second entry");
    let completed = timeline.find("Run completed").expect("third entry");
    assert!(queued < started && started < completed, "order preserved");

    // Raw carries the full entity structure.
    let raw: serde_json::Value = serde_json::from_str(&drawer::raw_dump(entity)).unwrap();
    assert_eq!(raw, serde_json::to_value(entity).unwrap());
}

#[test]
fn drawer_projection_is_pure_across_renders() {
    let feed = Feed::sample();
    let theme = Theme::default();
    let state = DrawerState::default();
    let entity = &feed.cursor[0];

    let first = text_of(&drawer::timeline_lines(entity, &state, &theme, &UNICODE_SYMBOLS));
    let second = text_of(&drawer::timeline_lines(entity, &state, &theme, &UNICODE_SYMBOLS));
    assert_eq!(first, second, "same entity and state must render identically");
}
