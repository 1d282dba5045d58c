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
//! The logging registry: backend handle plus global middleware slots.
//!
//! A [`LogRegistry`] is the explicit home of the process-wide mutable state
//! this system needs: the configured backend and the global warn/error
//! middleware. The expected lifecycle is single-writer-at-startup: one call
//! site initializes the backend before any logger is handed out, and
//! re-initialization afterwards simply replaces the handle — existing
//! loggers pick up the replacement because they hold the registry, not the
//! backend.
//!
//! The crate-level free functions ([`init`], [`get_logger`], ...) operate on
//! one process-wide default registry; embedders and tests can create private
//! registries and get the same behavior fully isolated.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::config::{Level, LogConfig, SinkKind};
use crate::error::{LogError, LogResult};
use crate::logger::ModuleLogger;
use crate::middleware::{HookScope, HookSlots};
use crate::sink::{ConsoleSink, LogSink, TracingSink};
use crate::tags::TagMap;

/// Handle to the configured backend: the sink plus its verbosity level.
///
/// Cheap to clone. Returned from the `init` family for advanced callers
/// (test instrumentation) that need to reach the sink directly.
#[derive(Clone)]
pub struct BackendHandle {
    level: Level,
    sink: Arc<dyn LogSink>,
}

impl BackendHandle {
    fn new(level: Level, sink: Arc<dyn LogSink>) -> Self {
        Self { level, sink }
    }

    /// The verbosity level the backend was configured with.
    pub fn level(&self) -> Level {
        self.level
    }

    /// True iff the configured level is exactly debug.
    pub fn is_debug(&self) -> bool {
        self.level == Level::Debug
    }

    /// The sink behind this handle.
    pub fn sink(&self) -> Arc<dyn LogSink> {
        Arc::clone(&self.sink)
    }

    /// Forward one record to the sink.
    pub fn log_at(&self, level: Level, message: &str, tags: &TagMap) {
        self.sink.log_at(level, message, tags);
    }
}

struct RegistryInner {
    backend: RwLock<Option<BackendHandle>>,
    global_hooks: HookSlots,
}

/// Registry owning the backend handle and the global middleware slots.
///
/// Clones share the same underlying state; a fresh [`LogRegistry::new`] is
/// fully independent.
#[derive(Clone)]
pub struct LogRegistry {
    inner: Arc<RegistryInner>,
}

impl LogRegistry {
    /// Create an uninitialized registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                backend: RwLock::new(None),
                global_hooks: HookSlots::new(HookScope::Global),
            }),
        }
    }

    /// Configure the backend to emit JSON records to stdout at the given
    /// minimum severity (`None` means `info`).
    ///
    /// Re-invocation replaces the previous backend.
    pub fn init(&self, level: Option<&str>) -> LogResult<BackendHandle> {
        let mut config = LogConfig::new();
        if let Some(level) = level {
            config = config.with_level(level.parse()?);
        } else {
            config = config.with_level(Level::Info);
        }
        self.init_with_config(config)
    }

    /// Configure the backend from a full [`LogConfig`].
    pub fn init_with_config(&self, config: LogConfig) -> LogResult<BackendHandle> {
        let level = config.effective_level()?;
        let sink: Arc<dyn LogSink> = match config.sink {
            SinkKind::Console => Arc::new(ConsoleSink::new(
                level,
                config.output,
                config.use_timestamps,
            )),
            SinkKind::Tracing => Arc::new(TracingSink::new()),
        };
        Ok(self.install(BackendHandle::new(level, sink)))
    }

    /// Install a caller-provided sink as the backend.
    pub fn init_with_sink(&self, level: Level, sink: Arc<dyn LogSink>) -> BackendHandle {
        self.install(BackendHandle::new(level, sink))
    }

    fn install(&self, handle: BackendHandle) -> BackendHandle {
        let mut slot = self
            .inner
            .backend
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(handle.clone());
        handle
    }

    /// The current backend handle, if initialized.
    pub fn backend(&self) -> Option<BackendHandle> {
        self.inner
            .backend
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether `init` has been called on this registry.
    pub fn is_initialized(&self) -> bool {
        self.backend().is_some()
    }

    /// True iff the backend is initialized at exactly debug verbosity.
    pub fn is_debug(&self) -> bool {
        self.backend().is_some_and(|handle| handle.is_debug())
    }

    /// Create a [`ModuleLogger`] bound to `module`.
    ///
    /// Errors with [`LogError::NotInitialized`] before `init`.
    pub fn logger(&self, module: &str) -> LogResult<ModuleLogger> {
        self.logger_with_tags(module, TagMap::new())
    }

    /// Create a [`ModuleLogger`] with extra base tags.
    ///
    /// The module name overwrites a colliding `moduleName` tag. The backend
    /// is not touched at construction time.
    pub fn logger_with_tags(&self, module: &str, extra_tags: TagMap) -> LogResult<ModuleLogger> {
        if !self.is_initialized() {
            return Err(LogError::NotInitialized);
        }
        Ok(ModuleLogger::new(self.clone(), module, extra_tags))
    }

    /// Register a middleware fired before every logger's warn/error record.
    pub fn add_global_log_middleware(
        &self,
        level: Level,
        middleware: impl Fn() + Send + Sync + 'static,
    ) -> LogResult<()> {
        self.inner.global_hooks.register(level, middleware)
    }

    /// Unset the global middleware for `level`. Idempotent.
    pub fn clear_global_log_middleware(&self, level: Level) {
        self.inner.global_hooks.clear(level);
    }

    /// Unset both global middleware slots.
    pub fn clear_all_global_middlewares(&self) {
        self.inner.global_hooks.clear_all();
    }

    pub(crate) fn fire_global_middleware(&self, level: Level) {
        self.inner.global_hooks.fire(level);
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_REGISTRY: LazyLock<LogRegistry> = LazyLock::new(LogRegistry::new);

/// The process-wide default registry backing the crate-level functions.
pub fn default_registry() -> &'static LogRegistry {
    &DEFAULT_REGISTRY
}

/// Initialize the default registry's backend. `None` means `info`.
pub fn init(level: Option<&str>) -> LogResult<BackendHandle> {
    default_registry().init(level)
}

/// Initialize the default registry's backend from a full [`LogConfig`].
pub fn init_with_config(config: LogConfig) -> LogResult<BackendHandle> {
    default_registry().init_with_config(config)
}

/// Install a caller-provided sink on the default registry.
pub fn init_with_sink(level: Level, sink: Arc<dyn LogSink>) -> BackendHandle {
    default_registry().init_with_sink(level, sink)
}

/// Create a [`ModuleLogger`] from the default registry.
pub fn get_logger(module: &str) -> LogResult<ModuleLogger> {
    default_registry().logger(module)
}

/// Create a [`ModuleLogger`] with extra base tags from the default registry.
pub fn get_logger_with_tags(module: &str, extra_tags: TagMap) -> LogResult<ModuleLogger> {
    default_registry().logger_with_tags(module, extra_tags)
}

/// True iff the default registry's backend is at exactly debug verbosity.
pub fn is_debug() -> bool {
    default_registry().is_debug()
}

/// Register a global middleware on the default registry.
pub fn add_global_log_middleware(
    level: Level,
    middleware: impl Fn() + Send + Sync + 'static,
) -> LogResult<()> {
    default_registry().add_global_log_middleware(level, middleware)
}

/// Unset the default registry's global middleware for `level`.
pub fn clear_global_log_middleware(level: Level) {
    default_registry().clear_global_log_middleware(level);
}

/// Unset both of the default registry's global middleware slots.
pub fn clear_all_global_middlewares() {
    default_registry().clear_all_global_middlewares();
}
