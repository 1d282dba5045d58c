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
//! Module-scoped loggers.
//!
//! A [`ModuleLogger`] is a lightweight handle bound to a fixed base tag set
//! (the module name plus optional extra tags). It holds a reference to its
//! registry rather than to the backend, so a re-initialized backend is
//! picked up by existing loggers without any action on their part.

use std::error::Error as StdError;

use crate::config::Level;
use crate::error::LogResult;
use crate::middleware::{HookScope, HookSlots};
use crate::registry::LogRegistry;
use crate::tags::{self, TagMap, TagValue, MODULE_NAME_KEY};

/// Tag key carrying the rendered error chain on `error` records.
const STACK_TAG: &str = "stack";

/// A logger bound to one logical module.
///
/// Obtained from [`crate::get_logger`] or [`LogRegistry::logger`]; the
/// factory fails if the backend has not been initialized yet.
pub struct ModuleLogger {
    registry: LogRegistry,
    module: String,
    base_tags: TagMap,
    hooks: HookSlots,
}

impl ModuleLogger {
    pub(crate) fn new(registry: LogRegistry, module: &str, extra_tags: TagMap) -> Self {
        let mut base_tags = extra_tags;
        // the module name always wins over a colliding extra tag
        base_tags.insert(MODULE_NAME_KEY.to_string(), TagValue::from(module));
        Self {
            registry,
            module: module.to_string(),
            base_tags,
            hooks: HookSlots::new(HookScope::Logger),
        }
    }

    /// The module name this logger was created for.
    pub fn module_name(&self) -> &str {
        &self.module
    }

    /// The tags attached to every record this logger emits.
    pub fn base_tags(&self) -> &TagMap {
        &self.base_tags
    }

    /// True iff the backend is configured at exactly debug verbosity.
    ///
    /// Lets callers skip building expensive payloads when debug output is
    /// off.
    pub fn is_debug(&self) -> bool {
        self.registry.is_debug()
    }

    /// Emit an info record.
    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message, TagMap::new());
    }

    /// Emit an info record with per-call tags merged over the base tags.
    pub fn info_with(&self, message: &str, extra_tags: TagMap) {
        self.emit(Level::Info, message, extra_tags);
    }

    /// Emit a debug record.
    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message, TagMap::new());
    }

    /// Emit a debug record with per-call tags.
    pub fn debug_with(&self, message: &str, extra_tags: TagMap) {
        self.emit(Level::Debug, message, extra_tags);
    }

    /// Emit a warn record, firing the global and per-logger warn middleware
    /// first.
    pub fn warn(&self, message: &str) {
        self.emit(Level::Warn, message, TagMap::new());
    }

    /// Emit a warn record with per-call tags.
    pub fn warn_with(&self, message: &str, extra_tags: TagMap) {
        self.emit(Level::Warn, message, extra_tags);
    }

    /// Emit an error record, firing the global and per-logger error
    /// middleware first.
    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message, TagMap::new());
    }

    /// Emit an error record carrying an optional error value and per-call
    /// tags.
    ///
    /// With an error value present, its rendered chain is merged in as a
    /// `stack` tag before the explicit tags, so an explicit `stack` tag
    /// wins. With no error value the record carries the base tags only and
    /// `extra_tags` is not merged.
    pub fn error_with(
        &self,
        message: &str,
        error: Option<&(dyn StdError + 'static)>,
        extra_tags: TagMap,
    ) {
        self.fire_middlewares(Level::Error);
        let tags = match error {
            Some(err) => {
                let mut call_tags = TagMap::new();
                call_tags.insert(STACK_TAG.to_string(), TagValue::Str(error_chain(err)));
                call_tags.extend(extra_tags);
                tags::merged(&self.base_tags, call_tags)
            }
            None => self.base_tags.clone(),
        };
        self.forward(Level::Error, message, &tags);
    }

    /// Register a middleware for `level` on this logger instance.
    ///
    /// Only `Warn` and `Error` accept middleware; a slot already holding a
    /// callback must be cleared first. Both violations are typed errors.
    pub fn add_log_middleware(
        &self,
        level: Level,
        middleware: impl Fn() + Send + Sync + 'static,
    ) -> LogResult<()> {
        self.hooks.register(level, middleware)
    }

    /// Unset this logger's middleware for `level`. Idempotent.
    pub fn clear_log_middleware(&self, level: Level) {
        self.hooks.clear(level);
    }

    fn emit(&self, level: Level, message: &str, extra_tags: TagMap) {
        self.fire_middlewares(level);
        let tags = tags::merged(&self.base_tags, extra_tags);
        self.forward(level, message, &tags);
    }

    /// Global middleware first, then this logger's own.
    fn fire_middlewares(&self, level: Level) {
        if !level.supports_middleware() {
            return;
        }
        self.registry.fire_global_middleware(level);
        self.hooks.fire(level);
    }

    fn forward(&self, level: Level, message: &str, tags: &TagMap) {
        // Loggers exist only after init() and the backend is never unset
        // once installed.
        let backend = self
            .registry
            .backend()
            .expect("logging backend not initialized");
        backend.log_at(level, message, tags);
    }
}

/// Render an error and its source chain as the `stack` tag text.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str("\ncaused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Leaf;

    impl std::fmt::Display for Leaf {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("disk full")
        }
    }

    impl StdError for Leaf {}

    #[derive(Debug)]
    struct Wrapper(Leaf);

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("write failed")
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_single() {
        assert_eq!(error_chain(&Leaf), "disk full");
    }

    #[test]
    fn test_error_chain_with_source() {
        assert_eq!(
            error_chain(&Wrapper(Leaf)),
            "write failed\ncaused by: disk full"
        );
    }
}
