//! Log output for the modfiles binaries.
//!
//! Lines go to `~/.modfiles/logs/<component>.<date>` and, when asked for, to
//! stderr. The filter is read from `MODFILES_LOG`, then `RUST_LOG`, and
//! defaults to `info`.

use crate::config::SiteConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "MODFILES_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = SiteConfig::default_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, component));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    // A subscriber installed earlier (tests, embedding hosts) keeps priority.
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    guard
}
