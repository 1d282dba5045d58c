//! Configuration for the logging backend.
//!
//! This module provides the types used to configure how records are emitted:
//! the severity scale, the output stream, the sink kind, and the builder that
//! ties them together.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Environment variable consulted when no explicit level is configured.
pub const LEVEL_ENV_VAR: &str = "TAGLOG_LEVEL";

/// Severity of a log record.
///
/// Ordered from most verbose (`Debug`) to most severe (`Error`). A backend
/// configured at a given level emits records at that level and above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Verbose diagnostic output.
    Debug,

    /// Routine operational messages.
    Info,

    /// Something unexpected that the process can continue past.
    Warn,

    /// A failure the caller should know about.
    Error,
}

impl Level {
    /// The lowercase name of the level, as it appears on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// Whether middleware may be registered for this level.
    pub const fn supports_middleware(&self) -> bool {
        matches!(self, Level::Warn | Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

/// Log output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Write to standard output
    Stdout,

    /// Write to standard error
    Stderr,
}

/// Which sink implementation `init_with_config` installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    /// One JSON record per line on the configured output stream.
    #[default]
    Console,

    /// Forward records as `tracing` events to the process subscriber.
    Tracing,
}

/// Configuration for the logging backend.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum severity to emit.
    /// If `None`, resolved from the `TAGLOG_LEVEL` environment variable.
    pub level: Option<Level>,

    /// Output destination (stdout by default)
    pub output: LogOutput,

    /// Whether to include timestamps in emitted records
    pub use_timestamps: bool,

    /// Sink implementation to install
    pub sink: SinkKind,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: None,
            output: LogOutput::Stdout,
            use_timestamps: true,
            sink: SinkKind::Console,
        }
    }
}

impl LogConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum severity
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the output destination
    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Enable or disable timestamps
    pub fn with_timestamps(mut self, use_timestamps: bool) -> Self {
        self.use_timestamps = use_timestamps;
        self
    }

    /// Set the sink implementation
    pub fn with_sink(mut self, sink: SinkKind) -> Self {
        self.sink = sink;
        self
    }

    /// Resolve the effective level from the explicit setting, the
    /// `TAGLOG_LEVEL` environment variable, or the `info` default.
    pub fn effective_level(&self) -> Result<Level, LogError> {
        if let Some(level) = self.level {
            return Ok(level);
        }
        match std::env::var(LEVEL_ENV_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Level::Info),
        }
    }
}
