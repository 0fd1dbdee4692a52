use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoLocal};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

/// Sends logs to a daily rotating file in `log_dir`. The terminal belongs to
/// the UI, so nothing is written to stdout or stderr.
pub fn init_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("movie_finder=info"));

    // Files will be named: movie_finder.log.2026-10-17, etc.
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "movie_finder.log");

    let fmt_layer = fmt::layer()
        .with_timer(ChronoLocal::rfc_3339())
        .with_ansi(false)
        .with_writer(file_appender);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
