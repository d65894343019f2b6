use config::{Config, Environment, File};
use csign_domain::config::ServiceConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `CSIGN__SIGNATURE__LOOKAHEAD=5`.
pub const ENV_PREFIX: &str = "CSIGN";

/// File consulted (optionally, any supported extension) when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "countersign";

/// Custom error type for config loading.
#[csign_derive::csign_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration value from a file layered under environment overrides.
///
/// 1. **Base File**: `path` when given (must exist), otherwise the optional
///    [`DEFAULT_CONFIG_FILE`] in the working directory.
/// 2. **Environment Overrides**: variables prefixed with `CSIGN__`; nested keys use a
///    double underscore (`CSIGN__LOGGING__LEVEL` maps to `logging.level`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is malformed,
/// or the merged values do not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(p) => {
            info!("Loading config from {}", p.as_ref().display());
            File::from(p.as_ref()).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

/// Loads the [`ServiceConfig`] of a Countersign deployment.
///
/// # Errors
/// See [`load_config`].
pub fn load_service_config(path: Option<impl AsRef<Path>>) -> Result<ServiceConfig, ConfigError> {
    load_config(path)
}
