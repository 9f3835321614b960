//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::users::NewUser;

/// Root configuration for the user service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, request deadline).
    pub server: ServerConfig,

    /// Synthetic failure injection.
    pub faults: FaultConfig,

    /// Points service enrichment.
    pub points: PointsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Users loaded into the store at startup.
    pub users: Vec<NewUser>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Fault injection configuration.
///
/// One request in `denominator` fails with a synthetic internal error.
/// A denominator of zero disables injection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FaultConfig {
    pub denominator: u32,

    /// Seed for the shared generator; equal seeds replay equal decisions.
    pub seed: u64,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            denominator: 20,
            seed: 0,
        }
    }
}

/// Points service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PointsConfig {
    /// Enrich user lookups with the points total.
    pub enabled: bool,

    /// Base URL of the points service.
    pub base_url: String,

    /// Deadline for a single points call in milliseconds.
    pub timeout_ms: u64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://point-service:8001".to_string(),
            timeout_ms: 3000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
