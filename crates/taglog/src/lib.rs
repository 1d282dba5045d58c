//! TagLog
//!
//! A thin tagging/middleware layer over a structured-logging sink.
//!
//! # Features
//!
//! - **Module loggers**: each logical module gets a logger carrying a fixed
//!   base tag set; per-call tags merge over it, call tags winning
//! - **Middleware hooks**: zero-argument callbacks fired before warn/error
//!   records, at global and per-logger scope, at most one per level
//! - **Pluggable sinks**: JSON-per-line console output by default, a
//!   `tracing` bridge, or any [`LogSink`] implementation
//! - **Scalar wire contract**: structured tag values are pre-serialized at
//!   the call boundary, so sinks only ever see shallow records
//!
//! # Example
//!
//! ```ignore
//! use taglog::{init, get_logger_with_tags, tags, Level};
//!
//! fn main() -> anyhow::Result<()> {
//!     init(Some("debug"))?;
//!
//!     let log = get_logger_with_tags("ingest", tags! { "region" => "eu-1" })?;
//!     log.info("pipeline started");
//!
//!     log.add_log_middleware(Level::Error, || {
//!         // notify a watchdog, bump a counter, ...
//!     })?;
//!     log.error("pipeline wedged");
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod macros;
pub mod middleware;
pub mod registry;
pub mod sink;
pub mod tags;

pub use config::{Level, LogConfig, LogOutput, SinkKind, LEVEL_ENV_VAR};
pub use error::{LogError, LogResult};
pub use logger::ModuleLogger;
pub use middleware::HookScope;
pub use registry::{
    add_global_log_middleware, clear_all_global_middlewares, clear_global_log_middleware,
    default_registry, get_logger, get_logger_with_tags, init, init_with_config, init_with_sink,
    is_debug, BackendHandle, LogRegistry,
};
pub use sink::{install_tracing_subscriber, ConsoleSink, LogSink, TracingSink};
pub use tags::{merged, TagMap, TagValue, MODULE_NAME_KEY};
