use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "dotchase.log";

/// Routes tracing output to `<dir>/dotchase.log`.
///
/// The terminal belongs to the game, so nothing is written to stdout or
/// stderr. `RUST_LOG` overrides the default `info` level. Keep the returned
/// guard alive until exit or buffered lines are lost.
pub fn init(dir: &Path) -> io::Result<(WorkerGuard, PathBuf)> {
    fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    Ok((guard, dir.join(LOG_FILE)))
}
