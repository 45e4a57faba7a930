//! Application state and event management for the Pulsefeed TUI.
//!
//! This module contains the core application state and the business logic
//! that drives the feed. The main types are:
//!
//! - [`App`]: central state container (feed, selection, drawer, theme)
//! - [`Selection`]: the single-selection state machine connecting cards to
//!   the drawer
//! - [`DrawerState`]: tab index and per-row expansion flags for the one
//!   drawer instance
//! - [`TuiEvent`] / [`EventHandler`]: async event loop multiplexing terminal
//!   input, ticks and shutdown via `tokio::select!`
//!
//! # Architecture
//!
//! All state transitions happen synchronously inside [`App::handle_key`],
//! one discrete user action at a time; the event loop never overlaps
//! handlers. Rendering (in [`crate::tui::ui`]) is a pure projection of this
//! state.

use std::collections::HashSet;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use tokio::sync::{mpsc, oneshot};

use crate::model::{ActivityEvent, Feed, SourceKind};

// =============================================================================
// Selection State Machine
// =============================================================================

/// Which card, if any, is currently selected.
///
/// Exactly one value of this type exists, owned by [`App`]. The drawer is
/// open exactly when the state is [`Selection::Selected`]; activating a card
/// while another is selected retargets the single drawer directly, without
/// passing through [`Selection::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// No card selected; the drawer is closed.
    #[default]
    Idle,

    /// One card selected; the drawer shows that entity.
    Selected { source: SourceKind, index: usize },
}

impl Selection {
    /// Returns `true` when a card is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected { .. })
    }

    /// The selected (source, index) pair, if any.
    #[must_use]
    pub fn target(&self) -> Option<(SourceKind, usize)> {
        match self {
            Selection::Idle => None,
            Selection::Selected { source, index } => Some((*source, *index)),
        }
    }
}

// =============================================================================
// Drawer State
// =============================================================================

/// The detail-inspector tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerTab {
    Overview,
    Timeline,
    Cost,
    Raw,
}

impl DrawerTab {
    /// Tab title shown in the tab bar.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            DrawerTab::Overview => "Overview",
            DrawerTab::Timeline => "Timeline",
            DrawerTab::Cost => "Cost",
            DrawerTab::Raw => "Raw",
        }
    }
}

/// The tab set exposed for a source.
///
/// Commits are atomic events and carry no timeline; only Cursor sessions are
/// metered, so only they expose a Cost tab.
#[must_use]
pub fn tabs_for(source: SourceKind) -> &'static [DrawerTab] {
    match source {
        SourceKind::Cursor => &[
            DrawerTab::Overview,
            DrawerTab::Timeline,
            DrawerTab::Cost,
            DrawerTab::Raw,
        ],
        SourceKind::Commit => &[DrawerTab::Overview, DrawerTab::Raw],
        _ => &[DrawerTab::Overview, DrawerTab::Timeline, DrawerTab::Raw],
    }
}

/// UI state owned by the single drawer instance.
///
/// Holds no entity data of its own: drawer content is a pure projection of
/// the selected entity, so closing needs no cleanup beyond a reset.
#[derive(Debug, Clone, Default)]
pub struct DrawerState {
    /// Index into [`tabs_for`] for the selected source.
    pub tab_index: usize,

    /// Cursor row inside the Timeline tab.
    pub timeline_cursor: usize,

    /// Timeline rows currently expanded past the truncation threshold.
    pub expanded: HashSet<usize>,

    /// Vertical scroll of the active tab's content.
    pub scroll: u16,
}

impl DrawerState {
    /// Resets to the Overview tab with no expansion or scroll, as when a new
    /// entity is opened.
    pub fn reset(&mut self) {
        self.tab_index = 0;
        self.timeline_cursor = 0;
        self.expanded.clear();
        self.scroll = 0;
    }

    /// Toggles the expansion flag for a timeline row.
    pub fn toggle_expanded(&mut self, row: usize) {
        if !self.expanded.remove(&row) {
            self.expanded.insert(row);
        }
    }
}

// =============================================================================
// Theme and Symbols
// =============================================================================

/// Theme configuration for the TUI.
///
/// Colors and styles used throughout the interface. Badge styles are only
/// reached through the badge vocabulary ([`crate::badge`]), which keeps the
/// status/severity/vendor mapping in one place.
#[derive(Debug, Clone)]
pub struct Theme {
    // Badges
    pub badge_success: Style,
    pub badge_failure: Style,
    pub badge_warning: Style,
    pub badge_info: Style,
    pub badge_accent: Style,
    pub badge_neutral: Style,

    // Cards
    pub card_border: Style,
    pub card_border_selected: Style,
    pub card_rail: Style,
    pub card_actor: Style,
    pub card_timestamp: Style,
    pub card_context: Style,

    // Drawer
    pub drawer_border: Style,
    pub drawer_title: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // Timeline event classes
    pub timeline_prompt: Style,
    pub timeline_thought: Style,
    pub timeline_file: Style,
    pub timeline_shell: Style,
    pub timeline_search: Style,
    pub timeline_todo: Style,
    pub timeline_agent: Style,
    pub timeline_lifecycle: Style,
    pub timeline_generic: Style,
    pub row_selected: Style,

    // Text
    pub title: Style,
    pub text_primary: Style,
    pub text_secondary: Style,
    pub text_muted: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            badge_success: Style::default().fg(Color::Green),
            badge_failure: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            badge_warning: Style::default().fg(Color::Yellow),
            badge_info: Style::default().fg(Color::Blue),
            badge_accent: Style::default().fg(Color::Magenta),
            badge_neutral: Style::default().fg(Color::Gray),

            card_border: Style::default().fg(Color::DarkGray),
            card_border_selected: Style::default().fg(Color::Cyan),
            card_rail: Style::default().fg(Color::Cyan),
            card_actor: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_timestamp: Style::default().fg(Color::DarkGray),
            card_context: Style::default().fg(Color::Gray),

            drawer_border: Style::default().fg(Color::Cyan),
            drawer_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            timeline_prompt: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            timeline_thought: Style::default().fg(Color::Magenta),
            timeline_file: Style::default().fg(Color::Blue),
            timeline_shell: Style::default().fg(Color::Yellow),
            timeline_search: Style::default().fg(Color::Cyan),
            timeline_todo: Style::default().fg(Color::Green),
            timeline_agent: Style::default().fg(Color::LightMagenta),
            timeline_lifecycle: Style::default().fg(Color::Gray),
            timeline_generic: Style::default().fg(Color::Gray),
            row_selected: Style::default().add_modifier(Modifier::REVERSED),

            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().fg(Color::Gray),
            text_muted: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Creates a monochrome theme for `NO_COLOR` support.
    ///
    /// Uses only modifiers (bold, dim, italic, reversed), per the
    /// [NO_COLOR standard](https://no-color.org/).
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            badge_success: Style::default().add_modifier(Modifier::BOLD),
            badge_failure: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            badge_warning: Style::default().add_modifier(Modifier::ITALIC),
            badge_info: Style::default(),
            badge_accent: Style::default().add_modifier(Modifier::BOLD),
            badge_neutral: Style::default().add_modifier(Modifier::DIM),

            card_border: Style::default().add_modifier(Modifier::DIM),
            card_border_selected: Style::default().add_modifier(Modifier::BOLD),
            card_rail: Style::default().add_modifier(Modifier::BOLD),
            card_actor: Style::default().add_modifier(Modifier::BOLD),
            card_timestamp: Style::default().add_modifier(Modifier::DIM),
            card_context: Style::default(),

            drawer_border: Style::default().add_modifier(Modifier::BOLD),
            drawer_title: Style::default().add_modifier(Modifier::BOLD),
            tab_active: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            tab_inactive: Style::default().add_modifier(Modifier::DIM),

            timeline_prompt: Style::default().add_modifier(Modifier::BOLD),
            timeline_thought: Style::default().add_modifier(Modifier::ITALIC),
            timeline_file: Style::default(),
            timeline_shell: Style::default(),
            timeline_search: Style::default(),
            timeline_todo: Style::default(),
            timeline_agent: Style::default().add_modifier(Modifier::ITALIC),
            timeline_lifecycle: Style::default().add_modifier(Modifier::DIM),
            timeline_generic: Style::default().add_modifier(Modifier::DIM),
            row_selected: Style::default().add_modifier(Modifier::REVERSED),

            title: Style::default().add_modifier(Modifier::BOLD),
            text_primary: Style::default(),
            text_secondary: Style::default().add_modifier(Modifier::DIM),
            text_muted: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Creates a theme based on the environment: monochrome when `NO_COLOR`
    /// is set (to any value), the default colorful theme otherwise.
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }
}

/// Symbol set for the TUI (unicode or ASCII).
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    /// Success glyph for badges and checklists.
    pub success: &'static str,
    /// Failure glyph.
    pub failure: &'static str,
    /// Warning glyph.
    pub warning: &'static str,
    /// Bullet for neutral list rows.
    pub bullet: &'static str,
    /// Arrow for transitions.
    pub arrow: &'static str,
    /// Marker for an expanded timeline row.
    pub expanded: &'static str,
    /// Marker for a collapsed timeline row.
    pub collapsed: &'static str,
    /// Filled progress-bar cell.
    pub bar_full: &'static str,
    /// Empty progress-bar cell.
    pub bar_empty: &'static str,
}

/// Unicode symbol set for modern terminals.
pub const UNICODE_SYMBOLS: Symbols = Symbols {
    success: "✓",
    failure: "✗",
    warning: "⚠",
    bullet: "•",
    arrow: "→",
    expanded: "▾",
    collapsed: "▸",
    bar_full: "█",
    bar_empty: "░",
};

/// ASCII symbol set for maximum compatibility.
pub const ASCII_SYMBOLS: Symbols = Symbols {
    success: "[+]",
    failure: "[x]",
    warning: "[!]",
    bullet: "*",
    arrow: "->",
    expanded: "v",
    collapsed: ">",
    bar_full: "#",
    bar_empty: "-",
};

impl Symbols {
    /// Detects the appropriate symbol set for the current terminal.
    ///
    /// Returns [`ASCII_SYMBOLS`] when `TERM` names a limited environment
    /// (`linux` console, `vt100`), [`UNICODE_SYMBOLS`] otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if std::env::var("TERM")
            .map(|t| t.contains("linux") || t.contains("vt100"))
            .unwrap_or(false)
        {
            ASCII_SYMBOLS
        } else {
            UNICODE_SYMBOLS
        }
    }

    /// Returns `true` when this is the unicode set.
    #[must_use]
    pub fn is_unicode(&self) -> bool {
        self.success == UNICODE_SYMBOLS.success
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::detect()
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Central state container for the Pulsefeed TUI.
///
/// Owns the read-only fixture [`Feed`], the single [`Selection`], the one
/// [`DrawerState`], and the feed navigation cursor. Cards and the drawer
/// receive this state by reference; nothing here is globally shared.
#[derive(Debug)]
pub struct App {
    /// The fixture feed. Read-only for the lifetime of the app.
    pub feed: Feed,

    /// Flattened card order for navigation.
    order: Vec<(SourceKind, usize)>,

    /// Feed cursor position as an index into `order`.
    pub cursor: usize,

    /// First visible card row, maintained by the renderer to keep the cursor
    /// in view.
    pub feed_scroll: usize,

    /// The single selection.
    pub selection: Selection,

    /// UI state for the single drawer instance.
    pub drawer: DrawerState,

    /// Theme configuration.
    pub theme: Theme,

    /// Symbol set (unicode or ASCII).
    pub symbols: Symbols,

    /// Flag indicating the user requested exit.
    should_quit: bool,
}

impl App {
    /// Creates an app over a fixture feed.
    #[must_use]
    pub fn new(feed: Feed, theme: Theme, symbols: Symbols) -> Self {
        let order = feed.order();
        Self {
            feed,
            order,
            cursor: 0,
            feed_scroll: 0,
            selection: Selection::Idle,
            drawer: DrawerState::default(),
            theme,
            symbols,
            should_quit: false,
        }
    }

    /// The flattened card order.
    #[must_use]
    pub fn order(&self) -> &[(SourceKind, usize)] {
        &self.order
    }

    /// Returns `true` if the application should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Signals that the application should quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The entity under the feed cursor, if the feed is non-empty.
    #[must_use]
    pub fn cursor_target(&self) -> Option<(SourceKind, usize)> {
        self.order.get(self.cursor).copied()
    }

    /// The currently selected entity, if any.
    #[must_use]
    pub fn selected_entity(&self) -> Option<&ActivityEvent> {
        let (source, index) = self.selection.target()?;
        self.feed.get(source, index)
    }

    /// The tab set for the current selection, or `None` when idle.
    #[must_use]
    pub fn current_tabs(&self) -> Option<&'static [DrawerTab]> {
        self.selection.target().map(|(source, _)| tabs_for(source))
    }

    /// The active drawer tab, or `None` when idle.
    #[must_use]
    pub fn current_tab(&self) -> Option<DrawerTab> {
        let tabs = self.current_tabs()?;
        tabs.get(self.drawer.tab_index).copied()
    }

    /// Activates a card: `Idle` or any `Selected` transitions directly to
    /// `Selected(source, index)` and the drawer resets to Overview.
    ///
    /// Activation against an index outside the source's collection is
    /// ignored; the selection invariant (always a valid index) holds.
    pub fn activate(&mut self, source: SourceKind, index: usize) {
        if self.feed.get(source, index).is_none() {
            return;
        }
        self.selection = Selection::Selected { source, index };
        self.drawer.reset();
        // Keep the feed cursor on the activated card so closing the drawer
        // leaves navigation where the user was.
        if let Some(pos) = self.order.iter().position(|&o| o == (source, index)) {
            self.cursor = pos;
        }
    }

    /// Closes the drawer: any `Selected` state yields `Idle`.
    pub fn close_drawer(&mut self) {
        self.selection = Selection::Idle;
        self.drawer.reset();
    }

    /// Selects a drawer tab by index into the source's tab set, keeping the
    /// entity untouched. Out-of-range indices are ignored.
    pub fn select_tab(&mut self, tab_index: usize) {
        if let Some(tabs) = self.current_tabs() {
            if tab_index < tabs.len() {
                self.drawer.tab_index = tab_index;
                self.drawer.scroll = 0;
            }
        }
    }

    fn step_tab(&mut self, forward: bool) {
        if let Some(tabs) = self.current_tabs() {
            let len = tabs.len();
            let next = if forward {
                (self.drawer.tab_index + 1) % len
            } else {
                (self.drawer.tab_index + len - 1) % len
            };
            self.drawer.tab_index = next;
            self.drawer.scroll = 0;
        }
    }

    /// Retargets the drawer to the next/previous card in feed order.
    fn step_selection(&mut self, forward: bool) {
        if self.order.is_empty() {
            return;
        }
        let len = self.order.len();
        let next = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
        let (source, index) = self.order[next];
        self.activate(source, index);
    }

    /// Number of rows in the selected entity's timeline (session events for
    /// Cursor, plain timeline entries otherwise).
    fn timeline_len(&self) -> usize {
        match self.selected_entity() {
            Some(ActivityEvent::Cursor(session)) => session.events.len(),
            Some(entity) => entity.meta().timeline.len(),
            None => 0,
        }
    }

    /// Processes one key press. All transitions run to completion before the
    /// next event is handled.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }
        if self.selection.is_selected() {
            self.handle_drawer_key(key);
        } else {
            self.handle_feed_key(key);
        }
    }

    fn handle_feed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < self.order.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.cursor = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.cursor = self.order.len().saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some((source, index)) = self.cursor_target() {
                    self.activate(source, index);
                }
            }
            _ => {}
        }
    }

    fn handle_drawer_key(&mut self, key: KeyEvent) {
        match key.code {
            // Cancel from any tab goes straight to Idle.
            KeyCode::Esc | KeyCode::Char('q') => self.close_drawer(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.step_tab(true),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.step_tab(false),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                self.select_tab(idx);
            }
            KeyCode::Char('n') => self.step_selection(true),
            KeyCode::Char('p') => self.step_selection(false),
            KeyCode::Char('j') | KeyCode::Down => {
                if self.current_tab() == Some(DrawerTab::Timeline) {
                    let len = self.timeline_len();
                    if len > 0 && self.drawer.timeline_cursor + 1 < len {
                        self.drawer.timeline_cursor += 1;
                    }
                } else {
                    self.drawer.scroll = self.drawer.scroll.saturating_add(1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.current_tab() == Some(DrawerTab::Timeline) {
                    self.drawer.timeline_cursor = self.drawer.timeline_cursor.saturating_sub(1);
                } else {
                    self.drawer.scroll = self.drawer.scroll.saturating_sub(1);
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if self.current_tab() == Some(DrawerTab::Timeline) {
                    let row = self.drawer.timeline_cursor;
                    self.drawer.toggle_expanded(row);
                }
            }
            _ => {}
        }
    }
}

// =============================================================================
// Event Loop
// =============================================================================

/// Events that drive the TUI event loop.
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Periodic tick for redraws and timers.
    Tick,

    /// Terminal key press.
    Key(KeyEvent),

    /// Terminal resize to (columns, rows).
    Resize(u16, u16),
}

/// Poll timeout for checking terminal input.
const POLL_TIMEOUT_MS: u64 = 10;

/// Handles terminal input and generates periodic tick events.
///
/// A `tokio::select!` loop multiplexes the tick interval with a oneshot
/// shutdown signal, while terminal polling runs on a `spawn_blocking`
/// thread so crossterm's synchronous calls stay off the async runtime.
/// Everything is forwarded to the main loop over one MPSC channel.
#[derive(Debug)]
pub struct EventHandler {
    event_tx: mpsc::Sender<TuiEvent>,
    shutdown_rx: oneshot::Receiver<()>,
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new `EventHandler`.
    pub fn new(
        event_tx: mpsc::Sender<TuiEvent>,
        shutdown_rx: oneshot::Receiver<()>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate,
        }
    }

    /// Returns the configured tick rate.
    #[must_use]
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Runs the event loop until shutdown is signalled or the receiving side
    /// of the event channel goes away.
    ///
    /// Terminal polling runs on a dedicated blocking thread so crossterm's
    /// synchronous calls never stall the tick loop; the thread winds down
    /// once the event channel closes.
    pub async fn run(mut self) -> std::io::Result<()> {
        let input_tx = self.event_tx.clone();
        tokio::task::spawn_blocking(move || poll_terminal_loop(&input_tx));

        let mut tick = tokio::time::interval(self.tick_rate);
        loop {
            tokio::select! {
                _ = &mut self.shutdown_rx => return Ok(()),
                _ = tick.tick() => {
                    if self.event_tx.send(TuiEvent::Tick).await.is_err() {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Forwards terminal events into the channel until it closes or polling
/// fails. Poll errors terminate the loop silently; the main loop keeps
/// ticking, which is the best a TUI can do without a terminal.
fn poll_terminal_loop(tx: &mpsc::Sender<TuiEvent>) {
    loop {
        if tx.is_closed() {
            return;
        }
        let ready = match event::poll(Duration::from_millis(POLL_TIMEOUT_MS)) {
            Ok(ready) => ready,
            Err(_) => return,
        };
        if !ready {
            continue;
        }
        let forwarded = match event::read() {
            Ok(CrosstermEvent::Key(key)) => tx.blocking_send(TuiEvent::Key(key)),
            Ok(CrosstermEvent::Resize(w, h)) => tx.blocking_send(TuiEvent::Resize(w, h)),
            Ok(_) => Ok(()),
            Err(_) => return,
        };
        if forwarded.is_err() {
            return;
        }
    }
}
