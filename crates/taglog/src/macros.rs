//! Convenience macros for tagged logging.
//!
//! This module provides macros for building tag maps inline and for
//! logging with per-call tags without spelling out the `_with` methods.

/// Build a [`crate::TagMap`] from `key => value` pairs.
///
/// Values go through [`crate::TagValue::from`], so scalars stay scalars and
/// `serde_json::Value` structures are pre-serialized.
///
/// # Example
///
/// ```ignore
/// let tags = tags! {
///     "requestId" => "abc123",
///     "attempt" => 2,
/// };
/// log.info_with("retrying", tags);
/// ```
#[macro_export]
macro_rules! tags {
    () => {
        $crate::TagMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::TagMap::new();
        $(
            map.insert(::std::string::String::from($key), $crate::TagValue::from($value));
        )+
        map
    }};
}

/// Log an info record, optionally with per-call tags
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $msg:expr) => {
        $logger.info($msg)
    };
    ($logger:expr, $msg:expr => { $($key:expr => $value:expr),* $(,)? }) => {
        $logger.info_with($msg, $crate::tags! { $($key => $value),* })
    };
}

/// Log a debug record, optionally with per-call tags
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $msg:expr) => {
        $logger.debug($msg)
    };
    ($logger:expr, $msg:expr => { $($key:expr => $value:expr),* $(,)? }) => {
        $logger.debug_with($msg, $crate::tags! { $($key => $value),* })
    };
}

/// Log a warn record, optionally with per-call tags
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $msg:expr) => {
        $logger.warn($msg)
    };
    ($logger:expr, $msg:expr => { $($key:expr => $value:expr),* $(,)? }) => {
        $logger.warn_with($msg, $crate::tags! { $($key => $value),* })
    };
}

/// Log an error record, optionally with an error value and per-call tags.
///
/// Per-call tags require an error value; without one the record carries the
/// base tags only, so no tag arm exists for that form.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $msg:expr) => {
        $logger.error($msg)
    };
    ($logger:expr, $msg:expr, $err:expr) => {
        $logger.error_with($msg, ::std::option::Option::Some($err), $crate::TagMap::new())
    };
    ($logger:expr, $msg:expr, $err:expr => { $($key:expr => $value:expr),* $(,)? }) => {
        $logger.error_with(
            $msg,
            ::std::option::Option::Some($err),
            $crate::tags! { $($key => $value),* },
        )
    };
}
