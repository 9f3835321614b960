//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate seed user ids
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("points.base_url is not a valid http(s) URL: {0}")]
    InvalidBaseUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("duplicate seed user id {0}")]
    DuplicateUserId(i64),
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("server.request_timeout_secs"));
    }

    if config.points.enabled {
        match Url::parse(&config.points.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::InvalidBaseUrl(config.points.base_url.clone())),
        }
        if config.points.timeout_ms == 0 {
            errors.push(ValidationError::ZeroDuration("points.timeout_ms"));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for id in config.users.iter().filter_map(|u| u.id) {
        if !seen.insert(id) {
            errors.push(ValidationError::DuplicateUserId(id));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::NewUser;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.points.base_url = "not a url".to_string();
        config.points.timeout_ms = 0;
        config.server.bind_address = "localhost".to_string();
        config.users = vec![NewUser::with_id(1), NewUser::with_id(1)];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::DuplicateUserId(1)));
        assert!(errors.contains(&ValidationError::ZeroDuration("points.timeout_ms")));
    }

    #[test]
    fn test_points_settings_ignored_when_disabled() {
        let mut config = ServiceConfig::default();
        config.points.enabled = false;
        config.points.base_url = String::new();
        assert!(validate_config(&config).is_ok());
    }
}
