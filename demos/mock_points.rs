//! Stand-in points service for running the user service locally.
//!
//! Answers `GET /api/v1/points/user/{id}/total` with a made-up total and
//! fails one request in five, like the real service does in its test setup.
//!
//! Run with `cargo run --example mock_points`, then start the user service
//! with `POINT_SERVICE_URL=http://127.0.0.1:8001`.

use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
use rand::Rng;
use serde_json::{json, Value};
use std::net::SocketAddr;

async fn total(Path(user_id): Path<i64>) -> (StatusCode, Json<Value>) {
    if rand::thread_rng().gen_range(0..5) == 0 {
        println!("Simulated error: failed to fetch points for user {}", user_id);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to fetch points for user" })),
        );
    }

    let transactions = user_id.rem_euclid(7) + 1;
    (
        StatusCode::OK,
        Json(json!({
            "userId": user_id,
            "totalPoints": transactions * 50,
            "transactionCount": transactions,
        })),
    )
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/api/v1/points/user/{id}/total", get(total))
        .route(
            "/health",
            get(|| async { Json(json!({ "status": "healthy", "service": "point-service" })) }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 8001));
    println!("Mock points service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
