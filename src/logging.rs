//! Logging through `tracing` and `tracing-subscriber`.
//!
//! While the game owns the terminal nothing may be written to stdout or
//! stderr, so the interactive session either logs to a file or not at all.
//! The non-interactive subcommands log to stderr.
//!
//! `RUST_LOG` overrides the level chosen on the command line.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
    Discard,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub sink: LogSink,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            sink: LogSink::Stderr,
        }
    }
}

impl LogConfig {
    /// - 0 (no `-v`): warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy()
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = build_env_filter(config.level);

    match &config.sink {
        LogSink::Discard => Ok(()),
        LogSink::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .try_init()
            .context("Failed to install logger"),
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .try_init()
                .context("Failed to install logger")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(2).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(9).level, Level::TRACE);
    }

    #[test]
    fn discard_installs_nothing() {
        let config = LogConfig::default().with_sink(LogSink::Discard);
        init_logging(&config).unwrap();
    }
}
