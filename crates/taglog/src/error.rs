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
use thiserror::Error;

use crate::config::Level;
use crate::middleware::HookScope;

/// Errors surfaced by registration and initialization operations.
///
/// Every variant is a precondition violation at the call site: callers are
/// expected to fix the calling code, not retry.
#[derive(Error, Debug)]
pub enum LogError {
    #[error("logging backend not initialized: call init() before get_logger()")]
    NotInitialized,

    #[error("invalid log level: {0}. Expected one of: debug, info, warn, error")]
    InvalidLevel(String),

    #[error("middleware is only supported for the warn and error levels, got {0}")]
    UnsupportedMiddlewareLevel(Level),

    #[error("a {scope} middleware is already registered for level {level}: clear it before adding a new one")]
    MiddlewareOccupied { scope: HookScope, level: Level },

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl LogError {
    pub fn config_error(message: impl Into<String>) -> Self {
        LogError::ConfigError(message.into())
    }
}

pub type LogResult<T> = Result<T, LogError>;
