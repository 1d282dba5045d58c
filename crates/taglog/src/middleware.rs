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
//! Middleware registration and invocation.
//!
//! A middleware is a zero-argument side-effecting callback fired when a
//! warn/error record is about to be emitted. Each scope (global, per-logger)
//! holds at most one callback per hook level; registering into an occupied
//! slot is a typed error, clearing an empty slot is a no-op.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Level;
use crate::error::{LogError, LogResult};

type Hook = Arc<dyn Fn() + Send + Sync>;

/// Which slot set a middleware was registered into. Used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookScope {
    /// Shared across every module logger.
    Global,

    /// Private to one module logger instance.
    Logger,
}

impl fmt::Display for HookScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookScope::Global => f.write_str("global"),
            HookScope::Logger => f.write_str("logger"),
        }
    }
}

/// One optional callback per hook level (warn, error).
pub(crate) struct HookSlots {
    scope: HookScope,
    warn: RwLock<Option<Hook>>,
    error: RwLock<Option<Hook>>,
}

impl HookSlots {
    pub(crate) fn new(scope: HookScope) -> Self {
        Self {
            scope,
            warn: RwLock::new(None),
            error: RwLock::new(None),
        }
    }

    fn slot(&self, level: Level) -> Option<&RwLock<Option<Hook>>> {
        match level {
            Level::Warn => Some(&self.warn),
            Level::Error => Some(&self.error),
            _ => None,
        }
    }

    /// Register a callback for `level`. Errors unless the level supports
    /// middleware and the slot is empty.
    pub(crate) fn register(
        &self,
        level: Level,
        hook: impl Fn() + Send + Sync + 'static,
    ) -> LogResult<()> {
        let slot = self
            .slot(level)
            .ok_or(LogError::UnsupportedMiddlewareLevel(level))?;
        let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return Err(LogError::MiddlewareOccupied {
                scope: self.scope,
                level,
            });
        }
        *guard = Some(Arc::new(hook));
        Ok(())
    }

    /// Unset the slot for `level`. Idempotent; non-hook levels are a no-op.
    pub(crate) fn clear(&self, level: Level) {
        if let Some(slot) = self.slot(level) {
            *slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        }
    }

    /// Unset both slots.
    pub(crate) fn clear_all(&self) {
        self.clear(Level::Warn);
        self.clear(Level::Error);
    }

    /// Invoke the callback for `level`, if any.
    ///
    /// The slot lock is released before the callback runs, so a middleware
    /// may itself log or re-register without deadlocking. A panicking
    /// callback propagates to the caller of the triggering log call.
    pub(crate) fn fire(&self, level: Level) {
        let hook = self.slot(level).and_then(|slot| {
            slot.read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        });
        if let Some(hook) = hook {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_register_and_fire() {
        let slots = HookSlots::new(HookScope::Logger);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        slots
            .register(Level::Error, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        slots.fire(Level::Error);
        slots.fire(Level::Error);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // the warn slot is independent
        slots.fire(Level::Warn);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_register_rejects_non_hook_levels() {
        let slots = HookSlots::new(HookScope::Logger);
        let result = slots.register(Level::Info, || {});
        assert!(matches!(
            result,
            Err(LogError::UnsupportedMiddlewareLevel(Level::Info))
        ));
    }

    #[test]
    fn test_register_rejects_occupied_slot() {
        let slots = HookSlots::new(HookScope::Global);
        slots.register(Level::Warn, || {}).unwrap();

        let result = slots.register(Level::Warn, || {});
        assert!(matches!(
            result,
            Err(LogError::MiddlewareOccupied {
                scope: HookScope::Global,
                level: Level::Warn,
            })
        ));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let slots = HookSlots::new(HookScope::Logger);
        slots.clear(Level::Error);

        slots.register(Level::Error, || panic!("cleared hook fired")).unwrap();
        slots.clear(Level::Error);
        slots.fire(Level::Error);

        // slot is reusable after clearing
        slots.register(Level::Error, || {}).unwrap();
    }

    #[test]
    fn test_clear_all_unsets_both_slots() {
        let slots = HookSlots::new(HookScope::Global);
        slots.register(Level::Warn, || panic!("warn hook fired")).unwrap();
        slots.register(Level::Error, || panic!("error hook fired")).unwrap();

        slots.clear_all();
        slots.fire(Level::Warn);
        slots.fire(Level::Error);
    }

    #[test]
    fn test_middleware_may_reregister_from_callback() {
        let slots = Arc::new(HookSlots::new(HookScope::Logger));

        let inner = Arc::clone(&slots);
        slots
            .register(Level::Warn, move || {
                inner.clear(Level::Warn);
            })
            .unwrap();

        slots.fire(Level::Warn);
        slots.register(Level::Warn, || {}).unwrap();
    }
}
