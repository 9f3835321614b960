//! Startup orchestration.
//!
//! # Responsibilities
//! - Seed the user store from configuration
//! - Build the fault gate and, when enabled, the points client
//! - Assemble the application state handed to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Every dependency is constructed here and passed in explicitly

use std::sync::Arc;

use thiserror::Error;

use crate::composite::UserFetcher;
use crate::config::ServiceConfig;
use crate::http::AppState;
use crate::points::{DownstreamError, HttpPointsClient, PointsClient};
use crate::resilience::FaultInjector;
use crate::users::{InMemoryUserStore, StoreError, UserService};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to seed users: {0}")]
    Seed(#[from] StoreError),

    #[error(transparent)]
    Points(#[from] DownstreamError),
}

pub fn build_state(config: &ServiceConfig) -> Result<AppState, StartupError> {
    let store = InMemoryUserStore::with_users(config.users.iter().cloned())?;
    tracing::info!(users = store.len(), "User store seeded");

    let faults = FaultInjector::from_config(&config.faults);
    tracing::info!(
        denominator = faults.denominator(),
        seed = config.faults.seed,
        "Fault injection configured"
    );

    let points: Option<Arc<dyn PointsClient>> = if config.points.enabled {
        let client = HttpPointsClient::new(&config.points)?;
        tracing::info!(
            base_url = %config.points.base_url,
            timeout_ms = config.points.timeout_ms,
            "Points enrichment enabled"
        );
        Some(Arc::new(client))
    } else {
        tracing::info!("Points enrichment disabled");
        None
    };

    let fetcher = UserFetcher::new(
        Arc::new(faults),
        UserService::new(Arc::new(store)),
        points,
    );
    Ok(AppState::new(fetcher))
}
