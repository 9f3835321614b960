//! Points service client with timeout and error handling.
//!
//! # Responsibilities
//! - Fetch a user's points total over HTTP
//! - Bound every call by a deadline
//! - Classify failures (timeout, transport, status, decode)
//! - Forward the caller's `x-request-id` so both hops share one trace

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::timeout;
use url::Url;

use crate::config::PointsConfig;
use crate::http::request::X_REQUEST_ID;

/// Opaque points payload, passed through to callers untouched.
pub type PointsSummary = serde_json::Map<String, serde_json::Value>;

/// Errors that can occur while talking to the points service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownstreamError {
    /// The call did not complete within the deadline.
    #[error("points service timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or protocol failure.
    #[error("points service unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("points service returned status {0}")]
    Status(u16),

    /// The body was not a JSON object.
    #[error("points service sent a malformed body: {0}")]
    Decode(String),

    /// The client could not be built from its configuration.
    #[error("invalid points service configuration: {0}")]
    Config(String),
}

impl DownstreamError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DownstreamError::Timeout(_) => "timeout",
            DownstreamError::Transport(_) => "transport",
            DownstreamError::Status(_) => "status",
            DownstreamError::Decode(_) => "decode",
            DownstreamError::Config(_) => "config",
        }
    }
}

#[async_trait]
pub trait PointsClient: Send + Sync {
    /// `request_id` is forwarded as `x-request-id` when present.
    async fn get_points_total(
        &self,
        user_id: i64,
        request_id: Option<&str>,
    ) -> Result<PointsSummary, DownstreamError>;
}

/// reqwest-backed client for `GET <base>/api/v1/points/user/{id}/total`.
#[derive(Debug, Clone)]
pub struct HttpPointsClient {
    client: reqwest::Client,
    base_url: String,
    timeout_duration: Duration,
}

impl HttpPointsClient {
    pub fn new(config: &PointsConfig) -> Result<Self, DownstreamError> {
        Url::parse(&config.base_url).map_err(|e| {
            DownstreamError::Config(format!("base URL '{}': {}", config.base_url, e))
        })?;

        let timeout_duration = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()
            .map_err(|e| DownstreamError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_duration,
        })
    }

    pub fn total_url(&self, user_id: i64) -> String {
        format!("{}/api/v1/points/user/{}/total", self.base_url, user_id)
    }

    async fn fetch(
        &self,
        url: &str,
        request_id: Option<&str>,
    ) -> Result<PointsSummary, DownstreamError> {
        let mut request = self.client.get(url);
        if let Some(id) = request_id {
            request = request.header(X_REQUEST_ID, id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| DownstreamError::Decode(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> DownstreamError {
        if err.is_timeout() {
            DownstreamError::Timeout(self.timeout_duration)
        } else {
            DownstreamError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl PointsClient for HttpPointsClient {
    async fn get_points_total(
        &self,
        user_id: i64,
        request_id: Option<&str>,
    ) -> Result<PointsSummary, DownstreamError> {
        let url = self.total_url(user_id);
        tracing::info!(user_id, url = %url, request_id, "Calling point service");

        match timeout(self.timeout_duration, self.fetch(&url, request_id)).await {
            Ok(result) => result,
            Err(_) => Err(DownstreamError::Timeout(self.timeout_duration)),
        }
    }
}
