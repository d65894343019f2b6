use crate::constants::{DEFAULT_LOOKAHEAD, DEFAULT_SAVE_ATTEMPTS};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of a Countersign deployment.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfigInner {
    pub signature: SignatureConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(flatten, default)]
    inner: Arc<ServiceConfigInner>,
}

impl Deref for ServiceConfig {
    type Target = ServiceConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ServiceConfig {
    fn deref_mut(&mut self) -> &mut ServiceConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Signature verification knobs.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Counter values probed ahead of the stored counter, `1..=MAX_LOOKAHEAD`.
    pub lookahead: u32,
    /// Read-verify-write cycles attempted before a revision conflict is reported.
    pub save_attempts: u32,
}

/// Rotation period for file logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

/// Logging output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Prefix of rolling log files.
    pub name: String,
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Explicit directives, e.g. `csign_signature=debug`; `RUST_LOG` is consulted when absent.
    pub filter: Option<String>,
    pub console: bool,
    /// Directory for rolling log files; file output is disabled when absent.
    pub directory: Option<PathBuf>,
    pub rotation: LogRotation,
    pub max_files: usize,
    /// Emit file logs as JSON lines.
    pub json: bool,
}

// --- Default ---

impl Default for SignatureConfig {
    fn default() -> Self {
        Self { lookahead: DEFAULT_LOOKAHEAD, save_attempts: DEFAULT_SAVE_ATTEMPTS }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "countersign".to_owned(),
            level: "info".to_owned(),
            filter: None,
            console: true,
            directory: None,
            rotation: LogRotation::Daily,
            max_files: 10,
            json: false,
        }
    }
}
