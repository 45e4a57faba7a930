//! Configuration module for Pulsefeed.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `PULSEFEED_FIXTURES` | No | built-in samples | Path to a fixture feed JSON file |
//! | `PULSEFEED_DATA_DIR` | No | `~/.pulsefeed` | Directory for logs and state |
//! | `PULSEFEED_TICK_RATE_MS` | No | 60 | TUI tick interval in milliseconds |
//!
//! `NO_COLOR` and `TERM` are honored by the theme and symbol detection in the
//! TUI layer, not here.
//!
//! # Example
//!
//! ```no_run
//! use pulsefeed::config::Config;
//!
//! let config = Config::from_env().expect("failed to load configuration");
//! println!("tick rate: {}ms", config.tick_rate_ms);
//! ```

use std::env;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Default tick interval for the TUI event loop.
const DEFAULT_TICK_RATE_MS: u64 = 60;

/// Default data directory name relative to home.
const DEFAULT_DATA_DIR: &str = ".pulsefeed";

/// Log file name inside the data directory.
const LOG_FILE_NAME: &str = "pulsefeed.log";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for Pulsefeed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to a fixture feed JSON file. `None` selects the built-in samples.
    pub fixtures_path: Option<PathBuf>,

    /// Directory for logs and state.
    pub data_dir: PathBuf,

    /// TUI tick interval in milliseconds.
    pub tick_rate_ms: u64,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `PULSEFEED_TICK_RATE_MS` is set but is
    /// not a positive integer, or if the home directory cannot be determined
    /// (needed for the default data dir).
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
        let home_dir = base_dirs.home_dir();

        let fixtures_path = env::var("PULSEFEED_FIXTURES").ok().map(PathBuf::from);

        let data_dir = env::var("PULSEFEED_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_dir.join(DEFAULT_DATA_DIR));

        let tick_rate_ms = match env::var("PULSEFEED_TICK_RATE_MS") {
            Ok(val) => {
                let rate = val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "PULSEFEED_TICK_RATE_MS".to_string(),
                    message: format!("expected positive integer, got '{val}'"),
                })?;
                if rate == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "PULSEFEED_TICK_RATE_MS".to_string(),
                        message: "tick rate must be greater than 0".to_string(),
                    });
                }
                rate
            }
            Err(_) => DEFAULT_TICK_RATE_MS,
        };

        Ok(Self {
            fixtures_path,
            data_dir,
            tick_rate_ms,
        })
    }

    /// Path of the log file the `run` subcommand writes to.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Restores an environment variable to its previous value on drop.
    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var(key).ok();
            env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = env::var(key).ok();
            env::remove_var(key);
            Self { key, previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.previous {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_env_is_empty() {
        let _fixtures = EnvGuard::unset("PULSEFEED_FIXTURES");
        let _data = EnvGuard::unset("PULSEFEED_DATA_DIR");
        let _tick = EnvGuard::unset("PULSEFEED_TICK_RATE_MS");

        let config = Config::from_env().unwrap();
        assert!(config.fixtures_path.is_none());
        assert!(config.data_dir.ends_with(".pulsefeed"));
        assert_eq!(config.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert!(config.log_path().ends_with("pulsefeed.log"));
    }

    #[test]
    #[serial]
    fn fixtures_path_comes_from_env() {
        let _fixtures = EnvGuard::set("PULSEFEED_FIXTURES", "/tmp/feed.json");

        let config = Config::from_env().unwrap();
        assert_eq!(config.fixtures_path, Some(PathBuf::from("/tmp/feed.json")));
    }

    #[test]
    #[serial]
    fn invalid_tick_rate_is_rejected() {
        let _tick = EnvGuard::set("PULSEFEED_TICK_RATE_MS", "fast");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    #[serial]
    fn zero_tick_rate_is_rejected() {
        let _tick = EnvGuard::set("PULSEFEED_TICK_RATE_MS", "0");
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn custom_tick_rate_is_parsed() {
        let _tick = EnvGuard::set("PULSEFEED_TICK_RATE_MS", "33");
        let config = Config::from_env().unwrap();
        assert_eq!(config.tick_rate_ms, 33);
    }
}
