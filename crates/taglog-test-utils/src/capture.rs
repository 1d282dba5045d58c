// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 TagLog Contributors

//! In-memory sink for intercepting emitted records in tests.

use std::sync::{Arc, Mutex, PoisonError};

use taglog::{Level, LogSink, TagMap};

/// One record as it crossed the sink boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    /// Severity of the record.
    pub level: Level,

    /// The message text.
    pub message: String,

    /// The fully merged tag map.
    pub tags: TagMap,
}

/// Sink that records every `log_at` call instead of emitting anywhere.
///
/// Install with `init_with_sink(level, sink.clone())`, then assert on
/// [`CaptureSink::records`].
#[derive(Default)]
pub struct CaptureSink {
    records: Mutex<Vec<CapturedRecord>>,
}

impl CaptureSink {
    /// Create an empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a capture sink ready to hand to `init_with_sink`.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of everything captured so far.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock().clone()
    }

    /// Drain and return everything captured so far.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.lock())
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<CapturedRecord> {
        self.lock().last().cloned()
    }

    /// Number of captured records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CapturedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSink for CaptureSink {
    fn log_at(&self, level: Level, message: &str, tags: &TagMap) {
        self.lock().push(CapturedRecord {
            level,
            message: message.to_string(),
            tags: tags.clone(),
        });
    }
}
