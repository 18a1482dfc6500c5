//! Diagnostics setup for consumers of the stage libraries.
//!
//! The stage and semantics crates emit `tracing` events (prim definitions,
//! schema applications, unreadable label values). Hosts that want them on
//! disk call [`init_logging`] once at startup; [`build_logging`] is the
//! reusable piece for hosts that manage their own dispatcher.

use std::path::Path;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Builds a dispatcher that writes env-filtered events to a daily-rolling
/// `<component>.YYYY-MM-DD` file under `log_dir`, optionally mirrored to
/// stderr. The returned guard must be kept alive for the non-blocking
/// writer to flush; dropping it flushes any buffered events.
pub fn build_logging(component: &str, log_dir: &Path, to_stderr: bool) -> (Dispatch, WorkerGuard) {
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        (Dispatch::new(registry.with(stderr_layer)), guard)
    } else {
        (Dispatch::new(registry), guard)
    }
}

/// Installs [`build_logging`]'s dispatcher globally, logging under
/// `~/.stagegraph/logs`. Later calls are no-ops: the first dispatcher
/// installed wins.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let log_dir = Path::new(&home).join(".stagegraph/logs");
    let (dispatch, guard) = build_logging(component, &log_dir, to_stderr);
    let _ = tracing::dispatcher::set_global_default(dispatch);
    guard
}
