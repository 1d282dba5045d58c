//! Basic logging example demonstrating module loggers and tag merging.
//!
//! Run with: cargo run --example basic_logging -- <level>
//! Where <level> is one of: debug, info, warn, error

use std::env;

use taglog::{get_logger_with_tags, init, tags};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let level = args.get(1).map(|s| s.as_str());

    init(level)?;

    let log = get_logger_with_tags("example", tags! { "region" => "eu-1" })?;
    log.info("application started");

    if log.is_debug() {
        log.debug_with("verbose diagnostics enabled", tags! { "pid" => 4242 });
    }

    // Per-call tags merge over the base tags; structured values are
    // pre-serialized before they reach the sink.
    log.info_with(
        "processing request",
        tags! {
            "requestId" => "abc123",
            "payload" => serde_json::json!({"items": 3, "dryRun": false}),
        },
    );

    log.warn("queue depth above threshold");

    let err = std::io::Error::other("connection reset");
    log.error_with("upstream call failed", Some(&err), tags! { "attempt" => 2 });

    Ok(())
}
