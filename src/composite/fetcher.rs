//! Composite user lookup.
//!
//! # Request Flow
//! ```text
//! fetch(id, request_id)
//!     → fault gate          fail-fast: Internal(id), nothing else runs
//!     → user lookup         fail-fast: NotFound(id), no points call
//!     → points call         fail-soft: any error becomes Points::Unavailable;
//!                           carries request_id downstream
//!     → assemble response
//! ```
//!
//! The points call returns `DownstreamError`, which `FetchError` has no
//! variant for; it is converted in `enrich` and cannot escape.

use std::sync::Arc;

use thiserror::Error;

use crate::composite::response::{CompositeResponse, Points, UserView};
use crate::observability::metrics;
use crate::points::PointsClient;
use crate::resilience::FaultGate;
use crate::users::{UserError, UserService};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Synthetic failure from the fault gate.
    #[error("Failed to fetch user id {0}")]
    Internal(i64),

    #[error(transparent)]
    User(#[from] UserError),
}

/// Orchestrates gate, lookup, and optional enrichment for one request.
#[derive(Clone)]
pub struct UserFetcher {
    faults: Arc<dyn FaultGate>,
    users: UserService,
    points: Option<Arc<dyn PointsClient>>,
}

impl UserFetcher {
    /// `points` of `None` selects the simple variant (bare user responses).
    pub fn new(
        faults: Arc<dyn FaultGate>,
        users: UserService,
        points: Option<Arc<dyn PointsClient>>,
    ) -> Self {
        Self {
            faults,
            users,
            points,
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.points.is_some()
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// Look up `id`. `request_id` correlates the points call with the inbound request.
    pub async fn fetch(&self, id: i64, request_id: Option<&str>) -> Result<UserView, FetchError> {
        if self.faults.should_fail(id) {
            tracing::error!(user_id = id, "Simulated error: failing user lookup");
            return Err(FetchError::Internal(id));
        }

        tracing::info!(user_id = id, "Fetching user id");
        let user = self.users.get_by_id(id).await?;

        let Some(client) = &self.points else {
            return Ok(UserView::Plain(user));
        };

        let points = enrich(client.as_ref(), id, request_id).await;
        Ok(UserView::Composite(CompositeResponse { user, points }))
    }
}

async fn enrich(client: &dyn PointsClient, id: i64, request_id: Option<&str>) -> Points {
    match client.get_points_total(id, request_id).await {
        Ok(summary) => {
            metrics::record_points_fetch("ok");
            Points::Summary(summary)
        }
        Err(e) => {
            tracing::warn!(user_id = id, error = %e, "Failed to fetch points for user");
            metrics::record_points_fetch(e.kind());
            Points::Unavailable
        }
    }
}
