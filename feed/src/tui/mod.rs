//! Terminal user interface for Pulsefeed.
//!
//! Built with [`ratatui`], following a Model-View-Controller split:
//!
//! - [`app`]: application state, selection state machine, event loop (Model/Controller)
//! - [`ui`]: frame composition and layout (View)
//! - [`terminal`]: raw-mode setup, teardown and panic handling
//! - [`widgets`]: the card shell, per-source renderers, drawer and timeline
//!
//! # Usage
//!
//! ```ignore
//! use pulsefeed::model::Feed;
//! use pulsefeed::tui::{App, Theme, Symbols};
//!
//! let mut app = App::new(Feed::sample(), Theme::from_env(), Symbols::detect());
//! ```

pub mod app;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use app::{App, DrawerState, DrawerTab, EventHandler, Selection, Symbols, Theme, TuiEvent};
pub use terminal::{install_panic_hook, Tui};
