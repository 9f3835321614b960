//! Failure injection tests for the user service.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use sdk_rust::{Reply, UsersClient};
use serde_json::json;

mod common;

#[tokio::test]
async fn test_points_payload_is_passed_through() {
    let (points_addr, hits) = common::start_programmable_backend(|path| async move {
        assert_eq!(path, "/api/v1/points/user/42/total");
        (200, r#"{"total":150}"#.to_string())
    })
    .await;

    let (url, shutdown) = common::start_service(common::service_config(Some(points_addr))).await;
    let client = UsersClient::new(&url);

    let body = client.get_user(42).await.unwrap().ok().expect("lookup should succeed");

    assert_eq!(body["user"]["id"], 42);
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["points"], json!({"total": 150}));
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_forwarded_to_points() {
    let (points_addr, _, heads) = common::start_recording_backend(|_| async move {
        (200, r#"{"total":150}"#.to_string())
    })
    .await;
    let (url, shutdown) = common::start_service(common::service_config(Some(points_addr))).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    // Client-supplied id travels to the points service unchanged.
    let res = client
        .get(format!("{}/api/v1/users/42", url))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], "trace-me-123");

    // Without one, the generated id is the one sent downstream.
    let res = client
        .get(format!("{}/api/v1/users/42", url))
        .send()
        .await
        .unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap().to_lowercase();

    let heads = heads.lock().unwrap().clone();
    assert_eq!(heads.len(), 2);
    assert!(heads[0].contains("x-request-id: trace-me-123\r\n"), "{}", heads[0]);
    assert!(
        heads[1].contains(&format!("x-request-id: {}\r\n", generated)),
        "{}",
        heads[1]
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_points_timeout_still_returns_user() {
    let (points_addr, _) = common::start_programmable_backend(|_| async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, r#"{"total":150}"#.to_string())
    })
    .await;

    let mut config = common::service_config(Some(points_addr));
    config.points.timeout_ms = 200;
    let (url, shutdown) = common::start_service(config).await;

    let start = Instant::now();
    let reply = UsersClient::new(&url).get_user(42).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(reply.status(), StatusCode::OK);
    let body = reply.ok().unwrap();
    assert_eq!(body["user"]["id"], 42);
    assert_eq!(body["points"], json!({"error": "Points service unavailable"}));
    assert!(elapsed < Duration::from_secs(2), "hung for {:?}", elapsed);

    shutdown.trigger();
}

#[tokio::test]
async fn test_points_error_status_and_bad_body_are_contained() {
    for (status, body) in [
        (500, r#"{"error":"Failed to fetch points for user"}"#),
        (404, r#"{"userId":42,"totalPoints":0,"transactionCount":0}"#),
        (200, "not json"),
        (200, "[1,2,3]"),
    ] {
        let (points_addr, _) = common::start_programmable_backend(move |_| async move {
            (status, body.to_string())
        })
        .await;
        let (url, shutdown) = common::start_service(common::service_config(Some(points_addr))).await;

        let reply = UsersClient::new(&url).get_user(42).await.unwrap();
        assert_eq!(reply.status(), StatusCode::OK, "backend {} {}", status, body);
        let value = reply.ok().unwrap();
        assert_eq!(value["user"]["id"], 42);
        assert_eq!(value["points"]["error"], "Points service unavailable");

        shutdown.trigger();
    }
}

#[tokio::test]
async fn test_points_service_down() {
    let (url, shutdown) =
        common::start_service(common::service_config(Some(common::closed_port()))).await;

    let body = UsersClient::new(&url).get_user(1).await.unwrap().ok().unwrap();
    assert_eq!(body["user"]["name"], "user-1");
    assert_eq!(body["points"], json!({"error": "Points service unavailable"}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_user_never_calls_points() {
    let (points_addr, hits) = common::start_programmable_backend(|_| async move {
        (200, r#"{"total":1}"#.to_string())
    })
    .await;
    let (url, shutdown) = common::start_service(common::service_config(Some(points_addr))).await;

    match UsersClient::new(&url).get_user(7).await.unwrap() {
        Reply::Failed { status, error } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(error.message.contains('7'));
        }
        other => panic!("expected 404, got {:?}", other),
    }
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_injected_failure_skips_all_work() {
    let (points_addr, hits) = common::start_programmable_backend(|_| async move {
        (200, r#"{"total":1}"#.to_string())
    })
    .await;
    let mut config = common::service_config(Some(points_addr));
    config.faults.denominator = 1;
    let (url, shutdown) = common::start_service(config).await;

    match UsersClient::new(&url).get_user(3).await.unwrap() {
        Reply::Failed { status, error } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(error.message, "Failed to fetch user id 3");
        }
        other => panic!("expected 500, got {:?}", other),
    }
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_same_seed_replays_same_failures() {
    async fn statuses(seed: u64) -> Vec<StatusCode> {
        let mut config = common::service_config(None);
        config.faults.denominator = 3;
        config.faults.seed = seed;
        let (url, shutdown) = common::start_service(config).await;
        let client = UsersClient::new(&url);

        let mut out = Vec::new();
        for id in 1..=30 {
            out.push(client.get_user((id % 5) + 1).await.unwrap().status());
        }
        shutdown.trigger();
        out
    }

    let first = statuses(17).await;
    let second = statuses(17).await;

    assert_eq!(first, second);
    assert!(first.contains(&StatusCode::INTERNAL_SERVER_ERROR));
    assert!(first.contains(&StatusCode::OK));
}

#[tokio::test]
async fn test_create_then_fetch() {
    let (url, shutdown) = common::start_service(common::service_config(None)).await;
    let client = UsersClient::new(&url);

    let created = client
        .create_user(&json!({"name": "Grace", "email": "grace@example.com"}))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = created.ok().unwrap();
    assert_eq!(created.id, 43);

    let fetched = client.get_user(43).await.unwrap().ok().unwrap();
    assert_eq!(fetched, json!({"id": 43, "name": "Grace", "email": "grace@example.com"}));

    let all = client.list_users().await.unwrap().ok().unwrap();
    assert_eq!(all.len(), 7);
    assert!(client.health().await.unwrap());

    shutdown.trigger();
}
