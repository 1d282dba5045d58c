//! Middleware example: global and per-logger warn/error hooks.
//!
//! Run with: cargo run --example middleware_hooks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use taglog::{add_global_log_middleware, get_logger, init, Level};

fn main() -> anyhow::Result<()> {
    init(Some("info"))?;

    // Fires before every logger's error records.
    let error_count = Arc::new(AtomicUsize::new(0));
    {
        let error_count = Arc::clone(&error_count);
        add_global_log_middleware(Level::Error, move || {
            error_count.fetch_add(1, Ordering::SeqCst);
        })?;
    }

    let ingest = get_logger("ingest")?;
    let upload = get_logger("upload")?;

    // Fires only for this logger's warn records, after the global hook.
    ingest.add_log_middleware(Level::Warn, || {
        println!("(ingest watchdog poked)");
    })?;

    ingest.warn("falling behind");
    ingest.error("wedged");
    upload.error("bucket unreachable");

    println!(
        "global error hook fired {} times",
        error_count.load(Ordering::SeqCst)
    );

    Ok(())
}
