//! Pulsefeed - unified integration activity feed.
//!
//! # Commands
//!
//! - `pulsefeed run`: start the interactive feed TUI
//! - `pulsefeed validate <path>`: shape-check a fixture feed file
//! - `pulsefeed dump`: print the feed's JSON to stdout
//!
//! # Environment Variables
//!
//! See the [`config`](pulsefeed::config) module for available options.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pulsefeed::config::Config;
use pulsefeed::error::TuiError;
use pulsefeed::model::{Feed, SourceKind};
use pulsefeed::tui::{app::TuiEvent, install_panic_hook, ui, App, EventHandler, Symbols, Theme, Tui};

/// Capacity of the TUI event channel.
const EVENT_CHANNEL_CAPACITY: usize = 128;

/// Pulsefeed - unified integration activity feed.
///
/// Renders GitHub, Linear, Cursor, feedback and commit activity as summary
/// cards with a tabbed detail inspector.
#[derive(Parser, Debug)]
#[command(name = "pulsefeed")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    PULSEFEED_FIXTURES       Fixture feed JSON file (default: built-in samples)
    PULSEFEED_DATA_DIR       Directory for logs (default: ~/.pulsefeed)
    PULSEFEED_TICK_RATE_MS   TUI tick interval in ms (default: 60)
    NO_COLOR                 Disable colors (monochrome theme)

EXAMPLES:
    # Browse the built-in sample feed
    pulsefeed run

    # Browse a recorded feed
    pulsefeed run --fixtures team-feed.json

    # Check a fixture file before committing it
    pulsefeed validate team-feed.json

    # Inspect the serialized form of one source
    pulsefeed dump --source cursor
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive feed TUI.
    Run {
        /// Fixture feed JSON file; overrides PULSEFEED_FIXTURES.
        #[arg(short, long)]
        fixtures: Option<PathBuf>,
    },

    /// Shape-check a fixture feed file and report the first problem.
    Validate {
        /// Fixture feed JSON file to check.
        path: PathBuf,
    },

    /// Print the feed's JSON to stdout.
    Dump {
        /// Fixture feed JSON file; overrides PULSEFEED_FIXTURES.
        #[arg(short, long)]
        fixtures: Option<PathBuf>,

        /// Restrict output to one source (github, linear, cursor, feedback,
        /// commit).
        #[arg(short, long)]
        source: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { path } => run_validate(path),
        Command::Dump { fixtures, source } => run_dump(fixtures, source),
        Command::Run { fixtures } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to create tokio runtime")?;
            runtime.block_on(run_feed(fixtures))
        }
    }
}

/// Validates a fixture file, exiting non-zero on the first shape error.
fn run_validate(path: PathBuf) -> Result<()> {
    init_stderr_logging();

    let feed = Feed::from_path(&path)
        .with_context(|| format!("failed to load fixture feed from {}", path.display()))?;

    println!(
        "{}: {} events across {} sources, all well-formed",
        path.display(),
        feed.total(),
        SourceKind::ALL.len()
    );
    Ok(())
}

/// Dumps the feed (or one source's collection) as pretty JSON.
fn run_dump(fixtures: Option<PathBuf>, source: Option<String>) -> Result<()> {
    init_stderr_logging();

    let feed = load_feed(fixtures)?;
    let json = match source {
        None => serde_json::to_string_pretty(&feed)?,
        Some(name) => {
            let source = parse_source(&name)?;
            serde_json::to_string_pretty(feed.collection(source))?
        }
    };
    println!("{json}");
    Ok(())
}

/// Runs the interactive TUI.
async fn run_feed(fixtures: Option<PathBuf>) -> Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    // The TUI owns the terminal, so logs go to a file.
    init_file_logging(&config).context("failed to initialize logging")?;

    info!("starting Pulsefeed");

    let fixtures = fixtures.or_else(|| config.fixtures_path.clone());
    let feed = load_feed(fixtures)?;
    info!(events = feed.total(), "feed ready");

    let mut app = App::new(feed, Theme::from_env(), Symbols::detect());

    install_panic_hook();
    let mut tui = Tui::new().map_err(TuiError::TerminalInit)?;

    // Refuse to start below the minimum layout size; resizes below it while
    // running degrade to a warning screen instead.
    let (width, height) = tui.size().map_err(TuiError::TerminalInit)?;
    if width < ui::MIN_WIDTH || height < ui::MIN_HEIGHT {
        tui.restore().map_err(TuiError::TerminalInit)?;
        return Err(TuiError::TerminalTooSmall {
            width,
            height,
            min_width: ui::MIN_WIDTH,
            min_height: ui::MIN_HEIGHT,
        }
        .into());
    }

    let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handler = EventHandler::new(
        event_tx,
        shutdown_rx,
        Duration::from_millis(config.tick_rate_ms),
    );
    let handler_task = tokio::spawn(handler.run());

    tui.draw(|frame| ui::render(frame, &mut app))
        .map_err(TuiError::Render)?;

    // Each event is handled to completion before the next is received.
    let mut closed_early = true;
    while let Some(event) = event_rx.recv().await {
        match event {
            TuiEvent::Key(key) => app.handle_key(key),
            TuiEvent::Tick | TuiEvent::Resize(_, _) => {}
        }
        if app.should_quit() {
            closed_early = false;
            break;
        }
        tui.draw(|frame| ui::render(frame, &mut app))
            .map_err(TuiError::Render)?;
    }

    let _ = shutdown_tx.send(());
    drop(event_rx);
    if let Err(e) = handler_task.await {
        warn!(error = %e, "event handler did not shut down cleanly");
    }

    tui.restore().context("failed to restore terminal")?;

    if closed_early {
        return Err(TuiError::ChannelClosed.into());
    }
    info!("Pulsefeed stopped");
    Ok(())
}

/// Loads the fixture feed from a path, or the built-in samples.
fn load_feed(fixtures: Option<PathBuf>) -> Result<Feed> {
    match fixtures {
        Some(path) => Feed::from_path(&path)
            .with_context(|| format!("failed to load fixture feed from {}", path.display())),
        None => {
            info!("no fixture file configured, using built-in samples");
            Ok(Feed::sample())
        }
    }
}

/// Maps a CLI source name to a [`SourceKind`].
fn parse_source(name: &str) -> Result<SourceKind> {
    match name.to_ascii_lowercase().as_str() {
        "github" => Ok(SourceKind::Github),
        "linear" => Ok(SourceKind::Linear),
        "cursor" => Ok(SourceKind::Cursor),
        "feedback" => Ok(SourceKind::Feedback),
        "commit" | "commits" => Ok(SourceKind::Commit),
        other => bail!("unknown source '{other}' (expected github, linear, cursor, feedback or commit)"),
    }
}

/// Logging to stderr, for the non-TUI subcommands.
fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Logging to a file under the data dir, for the TUI.
fn init_file_logging(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.data_dir)?;
    let file = File::create(config.log_path())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
