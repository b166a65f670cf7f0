//! Logging initialization for Agora components

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::error::{Error, Result};

/// Initialize logging with a console layer and a daily rolling file layer.
///
/// The filter honors `RUST_LOG` when set and falls back to `log_level`
/// otherwise. Returns an error if a global subscriber is already installed.
pub fn init_logging(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    log_level: &str,
) -> Result<()> {
    // Create file appender
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        log_dir.as_ref(),
        format!("{}.log", app_name),
    );

    // EnvFilter is not Clone, so build one per layer
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    // Create console layer
    let console_layer = fmt::layer()
        .with_target(true)
        .with_filter(console_filter);

    // Create file layer
    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(file_filter);

    // Combine layers and set as global default
    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::internal(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
