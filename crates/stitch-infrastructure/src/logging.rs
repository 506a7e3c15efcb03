//! Logging
//!
//! Installs the process-wide `tracing` subscriber.
//!
//! | Setting | Effect |
//! |---------|--------|
//! | `logging.level` | base filter, used when `STITCH_LOG` is unset |
//! | `logging.json_format` | JSON lines instead of text, on every output |
//! | `logging.file_output` | extra daily-rolling file beside stdout |
//!
//! Registry and bridge events are emitted under the `stitch_application`
//! target, so `STITCH_LOG=info,stitch_application::injection=trace` shows
//! each delivery and field emission without the rest of the trace noise.

use std::ffi::OsStr;
use std::path::Path;

use stitch_domain::error::{Error, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::{LOG_FILE_STEM, LOG_FILTER_ENV};
use crate::error_ext::ErrorContext;

pub use crate::config::LoggingConfig;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Install the global subscriber described by `config`
///
/// Fails when the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;

    let mut outputs: Vec<BoxedLayer> = vec![stdout_layer(config.json_format)];
    if let Some(path) = &config.file_output {
        outputs.push(file_layer(path, config.json_format));
    }

    Registry::default()
        .with(outputs)
        .with(log_filter(&config.level))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(
        %level,
        json = config.json_format,
        file = ?config.file_output,
        "logging initialized"
    );
    Ok(())
}

/// Filter for [`init_logging`]: `STITCH_LOG` when set, `level` otherwise
pub fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(level))
}

fn stdout_layer(json: bool) -> BoxedLayer {
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);
    if json { layer.json().boxed() } else { layer.boxed() }
}

fn file_layer(path: &Path, json: bool) -> BoxedLayer {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_else(|| OsStr::new(LOG_FILE_STEM));
    let layer = fmt::layer()
        .with_writer(tracing_appender::rolling::daily(directory, stem))
        .with_ansi(false)
        .with_target(true);
    if json { layer.json().boxed() } else { layer.boxed() }
}

/// Parse a configured level name (case-insensitive, `warning` accepted)
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Report where configuration came from
pub(crate) fn log_config_loaded(config_path: &Path, found: bool) {
    if found {
        info!(path = %config_path.display(), "configuration file loaded");
    } else {
        warn!(path = %config_path.display(), "configuration file not found; using defaults");
    }
}
