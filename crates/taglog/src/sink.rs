// Copyright (C) 2026  TagLog Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Sink implementations for the logging backend.
//!
//! A sink is the downstream collaborator behind the narrow
//! `log_at(level, message, tags)` interface. It owns formatting,
//! timestamping and transport; the rest of the crate only merges tags and
//! forwards records.

use std::io::{self, Write};

use chrono::Utc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{Level, LogConfig, LogOutput};
use crate::error::{LogError, LogResult};
use crate::tags::TagMap;

/// The wire contract with the downstream sink.
///
/// Implementations must treat `tags` as already fully merged and scalar-only;
/// the record's timestamp and final encoding are the sink's responsibility.
pub trait LogSink: Send + Sync {
    /// Deliver one record.
    fn log_at(&self, level: Level, message: &str, tags: &TagMap);
}

/// Get the writer for the specified output
fn writer_for(output: LogOutput) -> fn() -> Box<dyn io::Write + Send> {
    match output {
        LogOutput::Stderr => || Box::new(io::stderr()),
        LogOutput::Stdout => || Box::new(io::stdout()),
    }
}

/// Default production sink: one JSON record per line on a console stream.
///
/// Records below the configured minimum severity are dropped here, not by
/// the callers forwarding them.
pub struct ConsoleSink {
    min_level: Level,
    use_timestamps: bool,
    make_writer: fn() -> Box<dyn io::Write + Send>,
}

impl ConsoleSink {
    /// Create a sink emitting at `min_level` and above to `output`.
    pub fn new(min_level: Level, output: LogOutput, use_timestamps: bool) -> Self {
        Self {
            min_level,
            use_timestamps,
            make_writer: writer_for(output),
        }
    }

    /// Whether a record at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn encode(&self, level: Level, message: &str, tags: &TagMap) -> serde_json::Value {
        let mut record = serde_json::Map::new();
        if self.use_timestamps {
            record.insert(
                "timestamp".to_string(),
                serde_json::Value::String(Utc::now().to_rfc3339()),
            );
        }
        record.insert(
            "level".to_string(),
            serde_json::Value::String(level.as_str().to_string()),
        );
        record.insert(
            "message".to_string(),
            serde_json::Value::String(message.to_string()),
        );
        for (key, value) in tags {
            record.insert(key.clone(), value.to_wire());
        }
        serde_json::Value::Object(record)
    }
}

impl LogSink for ConsoleSink {
    fn log_at(&self, level: Level, message: &str, tags: &TagMap) {
        if !self.enabled(level) {
            return;
        }
        let record = self.encode(level, message, tags);
        let mut writer = (self.make_writer)();
        // console write failures are not the caller's problem
        let _ = writeln!(writer, "{record}");
    }
}

/// Sink forwarding records as `tracing` events.
///
/// Filtering is left to the subscriber; tags travel as one pre-serialized
/// `tags` field because event field names must be known at compile time.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a tracing-backed sink.
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn log_at(&self, level: Level, message: &str, tags: &TagMap) {
        let tags_json = serde_json::to_string(tags).unwrap_or_default();
        match level {
            Level::Debug => {
                tracing::debug!(target: "taglog", tags = %tags_json, "{}", message);
            }
            Level::Info => {
                tracing::info!(target: "taglog", tags = %tags_json, "{}", message);
            }
            Level::Warn => {
                tracing::warn!(target: "taglog", tags = %tags_json, "{}", message);
            }
            Level::Error => {
                tracing::error!(target: "taglog", tags = %tags_json, "{}", message);
            }
        }
    }
}

/// Install a JSON `tracing` subscriber for processes that pair
/// [`TracingSink`] with no subscriber of their own.
///
/// Call once at startup. Fails if another global subscriber is already set.
pub fn install_tracing_subscriber(config: &LogConfig) -> LogResult<()> {
    let env_filter = build_env_filter(config)?;
    let registry = Registry::default().with(env_filter);

    let layer = fmt::layer()
        .with_writer(writer_for(config.output))
        .json()
        .with_target(true);

    let result = if config.use_timestamps {
        registry.with(layer.with_timer(fmt::time::SystemTime)).try_init()
    } else {
        registry.with(layer.without_time()).try_init()
    };

    result.map_err(|e| {
        LogError::config_error(format!("failed to install tracing subscriber: {e}"))
    })
}

/// Build an environment filter for the given configuration
fn build_env_filter(config: &LogConfig) -> LogResult<EnvFilter> {
    let level = config.effective_level()?;

    EnvFilter::try_new(level.as_str()).map_err(|e| {
        LogError::config_error(format!("failed to parse log filter '{level}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagValue;

    #[test]
    fn test_env_filter_parsing() {
        let config = LogConfig::new().with_level(Level::Debug);
        assert!(build_env_filter(&config).is_ok());
    }

    #[test]
    fn test_console_sink_level_filter() {
        let sink = ConsoleSink::new(Level::Warn, LogOutput::Stdout, true);
        assert!(!sink.enabled(Level::Debug));
        assert!(!sink.enabled(Level::Info));
        assert!(sink.enabled(Level::Warn));
        assert!(sink.enabled(Level::Error));
    }

    #[test]
    fn test_console_record_shape() {
        let sink = ConsoleSink::new(Level::Debug, LogOutput::Stdout, false);

        let mut tags = TagMap::new();
        tags.insert("moduleName".to_string(), TagValue::from("test"));
        tags.insert(
            "someKey".to_string(),
            TagValue::from(serde_json::json!({"someValue": "value"})),
        );

        let record = sink.encode(Level::Warn, "msg", &tags);
        assert_eq!(record["level"], "warn");
        assert_eq!(record["message"], "msg");
        assert_eq!(record["moduleName"], "test");
        assert_eq!(record["someKey"], "{\"someValue\":\"value\"}");
        assert!(record.get("timestamp").is_none());
    }

    #[test]
    fn test_console_record_timestamp() {
        let sink = ConsoleSink::new(Level::Debug, LogOutput::Stdout, true);
        let record = sink.encode(Level::Info, "msg", &TagMap::new());
        assert!(record["timestamp"].is_string());
    }
}
