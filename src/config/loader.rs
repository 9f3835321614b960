//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `points.base_url`.
pub const ENV_POINT_SERVICE_URL: &str = "POINT_SERVICE_URL";
/// Environment variable overriding `faults.denominator`.
pub const ENV_FAULT_DENOMINATOR: &str = "FAULT_DENOMINATOR";
/// Environment variable overriding `observability.log_level`.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
/// Environment variable overriding `server.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective configuration.
///
/// Reads `path` when given and present, falls back to defaults otherwise,
/// then applies environment overrides and validates the result.
pub fn resolve_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    resolve_config_with(path, |name| std::env::var(name).ok())
}

/// [`resolve_config`] with an explicit variable lookup.
pub fn resolve_config_with<F>(path: Option<&Path>, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) if p.exists() => {
            let content = fs::read_to_string(p)?;
            toml::from_str(&content)?
        }
        Some(p) => {
            tracing::warn!(path = %p.display(), "Config file not found, using defaults");
            ServiceConfig::default()
        }
        None => ServiceConfig::default(),
    };

    apply_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply overrides from a variable lookup (the process environment in production).
pub fn apply_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_POINT_SERVICE_URL) {
        config.points.base_url = url;
    }
    if let Some(raw) = lookup(ENV_FAULT_DENOMINATOR) {
        config.faults.denominator = raw.trim().parse().map_err(|_| ConfigError::Env {
            name: ENV_FAULT_DENOMINATOR,
            value: raw.clone(),
        })?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.server.bind_address = addr;
    }
    Ok(())
}
