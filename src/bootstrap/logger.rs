//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after the effective level is resolved.

use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::error::AppError;

/// Initialise the global tracing subscriber.
///
/// With `prefer_level` set (a `-v` flag was given), `level` wins and
/// `RUST_LOG` is only a fallback for an unparsable level. Otherwise
/// `RUST_LOG` wins and `level` is the fallback.
///
/// Output goes to `log_file` (appended) when given, else stderr.
pub fn init(level: &str, prefer_level: bool, log_file: Option<&Path>) -> Result<(), AppError> {
    let filter = build_filter(level, prefer_level)?;
    let writer = build_writer(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

fn build_filter(level: &str, prefer_level: bool) -> Result<EnvFilter, AppError> {
    if prefer_level {
        return EnvFilter::try_new(level).or_else(|level_err| {
            EnvFilter::try_from_default_env().map_err(|env_err| {
                AppError::Logger(format!(
                    "invalid log level '{level}': {level_err}; RUST_LOG parse failed: {env_err}"
                ))
            })
        });
    }
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))
}

fn build_writer(log_file: Option<&Path>) -> Result<BoxMakeWriter, AppError> {
    let Some(path) = log_file else {
        return Ok(BoxMakeWriter::new(std::io::stderr));
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Logger(format!("failed to create log directory '{}': {e}", parent.display()))
        })?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Logger(format!("failed to open log file '{}': {e}", path.display())))?;
    Ok(BoxMakeWriter::new(file))
}

/// Parse a bare log level string into a [`LevelFilter`].
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}

/// Check a configured level before the subscriber exists.
///
/// Accepts a bare level (`debug`) or a filter directive list whose
/// comma-separated parts are each a bare level or `target=level`
/// (`warn,bca_expert=debug`). A bare word such as `verbose` is rejected:
/// `EnvFilter` would read it as a target name and silence this crate.
pub fn validate_level(level: &str) -> Result<(), AppError> {
    let invalid = |why: String| AppError::Config(format!("invalid log level '{level}': {why}"));

    for part in level.split(',') {
        if !part.contains('=') {
            parse_level(part.trim()).map_err(|_| invalid(format!("'{part}' is not a level")))?;
        }
    }
    EnvFilter::try_new(level).map(|_| ()).map_err(|e| invalid(e.to_string()))
}
