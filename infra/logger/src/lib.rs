//! # Logger
//!
//! Installs the global `tracing` subscriber of a Countersign process from a
//! [`LoggingConfig`]: a compact console layer, an optional rolling file layer written
//! through a non-blocking worker (plain text or JSON lines), and an [`EnvFilter`] built from
//! the configured level and directives, with `RUST_LOG` still honored when no explicit
//! directives are configured.
//!
//! ## Example
//!
//! ```rust
//! use csign_domain::config::LoggingConfig;
//! use csign_logger::Logger;
//!
//! let config = LoggingConfig { level: "debug".to_owned(), ..LoggingConfig::default() };
//! let _logger = Logger::init(&config).unwrap();
//! tracing::debug!("subscriber installed");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use csign_domain::config::{LogRotation, LoggingConfig};
use std::fs;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

/// A handle to the initialized logging system.
///
/// Holds the guard of the non-blocking file writer. Keep it alive for the lifetime of the
/// process; dropping it flushes and stops the background writer.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Installs the global subscriber described by `config`.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, a zero `max_files`, an
    ///   unknown level, malformed filter directives, or when no output is enabled.
    /// * [`LoggerError::Appender`] if the rolling file appender cannot be created.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(config: &LoggingConfig) -> Result<Self, LoggerError> {
        validate(config)?;
        let filter = env_filter(config)?;

        let mut layers = Vec::new();

        if config.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(directory) = &config.directory {
            fs::create_dir_all(directory).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create path: {}", directory.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(rotation(config.rotation))
                .filename_prefix(&config.name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(config.max_files)
                .build(directory)
                .context("Failed to build rolling file appender")?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);

            layers.push(if config.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable the console or set a directory.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Self { guard })
    }

    /// Returns the file writer guard, present only when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate(config: &LoggingConfig) -> Result<(), LoggerError> {
    if config.name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.directory.is_some() && config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn level(config: &LoggingConfig) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(&config.level).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid level '{}': {e}", config.level).into(),
        context: None,
    })
}

fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level(config)?.into());
    config.filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}

const fn rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        let config = LoggingConfig { level: "debug".to_owned(), ..LoggingConfig::default() };
        assert_eq!(level(&config).unwrap(), LevelFilter::DEBUG);

        let config = LoggingConfig { level: "loud".to_owned(), ..LoggingConfig::default() };
        assert!(matches!(level(&config), Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = LoggingConfig {
            filter: Some("csign_signature=[[".to_owned()),
            ..LoggingConfig::default()
        };
        assert!(matches!(env_filter(&config), Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_validation() {
        let config = LoggingConfig { name: "  ".to_owned(), ..LoggingConfig::default() };
        assert!(validate(&config).is_err());

        let config = LoggingConfig {
            directory: Some("logs".into()),
            max_files: 0,
            ..LoggingConfig::default()
        };
        assert!(validate(&config).is_err());

        assert!(validate(&LoggingConfig::default()).is_ok());
    }

    #[test]
    fn test_no_output_is_rejected() {
        let config = LoggingConfig { console: false, directory: None, ..LoggingConfig::default() };
        assert!(matches!(Logger::init(&config), Err(LoggerError::InvalidConfiguration { .. })));
    }
}
