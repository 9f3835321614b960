//! Request handlers for the users API.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::composite::UserView;
use crate::http::error::ApiError;
use crate::http::request::find_request_id;
use crate::http::server::AppState;
use crate::users::{NewUser, User};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        service: "user-service".to_string(),
    })
}

/// `GET /api/v1/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<UserView>, ApiError> {
    Ok(Json(state.fetcher.fetch(id, find_request_id(&headers)).await?))
}

/// `GET /api/v1/users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.fetcher.users().get_all().await?))
}

/// `POST /api/v1/users`
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let created = state.fetcher.users().create(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
