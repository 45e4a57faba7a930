//! Error types for Pulsefeed.
//!
//! This module defines the error types used throughout the crate, providing
//! structured error handling with clear, human-readable messages.

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::FixtureError;

/// Errors that can occur while running Pulsefeed.
///
/// This is the primary error type for the crate, encompassing configuration,
/// fixture loading and TUI failure modes.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fixture shape validation error.
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// TUI-related error.
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),

    /// The event channel closed while the TUI was still running.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,

    /// Terminal size is below the minimum the feed can lay out.
    #[error("terminal too small: {width}x{height} (minimum {min_width}x{min_height})")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// A specialized `Result` type for Pulsefeed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
