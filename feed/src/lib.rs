//! Pulsefeed - unified integration activity feed.
//!
//! This crate renders a feed of heterogeneous integration events — GitHub,
//! Linear, Cursor agent sessions, user feedback and plain commits — as
//! fixed-height summary cards that expand into a tabbed detail inspector.
//!
//! # Overview
//!
//! Entities are supplied as static fixture collections (a JSON file or the
//! built-in samples) and are read-only while rendering. A single selection
//! state machine connects cards to the one drawer instance; all state
//! transitions run synchronously inside discrete key handlers.
//!
//! # Modules
//!
//! - [`model`]: tagged-union entity model for the five sources
//! - [`badge`]: the closed status/severity/vendor badge vocabulary
//! - [`format`]: pure formatting helpers (durations, relative times, truncation)
//! - [`config`]: configuration from environment variables
//! - [`error`]: error types
//! - [`tui`]: terminal user interface (cards, drawer, timeline, event loop)

pub mod badge;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod tui;

pub use badge::{resolve_badge, Badge, BadgeKind, BadgeVariant};
pub use config::Config;
pub use error::{FeedError, Result, TuiError};
pub use model::{ActivityEvent, Feed, FixtureError, SourceKind};
