//! Diagnostic logging to stderr.
//!
//! Standard output carries only the JSON result, so every log line goes to
//! stderr through a non-blocking writer. The returned guard must outlive all
//! logging and be dropped before the process exits, or buffered lines are lost.

use std::env;
use std::io::IsTerminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEBUG_ENV_VAR: &str = "MAC_APPS_DEBUG_LOG";
const DEFAULT_FILTER: &str = "warn";

pub fn init() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(writer)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    guard
}

fn filter() -> EnvFilter {
    if debug_enabled(env::var(DEBUG_ENV_VAR).ok().as_deref()) {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

fn debug_enabled(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true" | "TRUE" | "yes" | "YES"))
}
