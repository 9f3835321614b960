use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user as returned by the service; profile fields stay opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// Error body sent by the service for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Outcome of a call that the service answered.
#[derive(Debug)]
pub enum Reply<T> {
    Ok { status: StatusCode, value: T },
    Failed { status: StatusCode, error: ApiError },
}

impl<T> Reply<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Reply::Ok { value, .. } => Some(value),
            Reply::Failed { .. } => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Ok { status, .. } | Reply::Failed { status, .. } => *status,
        }
    }
}

pub struct UsersClient {
    client: Client,
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a user. The body is a bare user or `{"user", "points"}`
    /// depending on how the service is deployed, so it stays untyped.
    pub async fn get_user(&self, id: i64) -> Result<Reply<Value>, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/api/v1/users/{}", self.base_url, id))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn list_users(&self) -> Result<Reply<Vec<User>>, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/api/v1/users", self.base_url))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn create_user(&self, user: &Value) -> Result<Reply<User>, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/api/v1/users", self.base_url))
            .json(user)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn health(&self) -> Result<bool, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(
    resp: reqwest::Response,
) -> Result<Reply<T>, Box<dyn std::error::Error>> {
    let status = resp.status();
    let text = resp.text().await?;

    if status.is_success() {
        Ok(Reply::Ok {
            status,
            value: serde_json::from_str(&text)?,
        })
    } else {
        let error = serde_json::from_str(&text).unwrap_or(ApiError {
            code: "UNKNOWN".to_string(),
            message: text,
        });
        Ok(Reply::Failed { status, error })
    }
}
