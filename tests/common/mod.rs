//! Shared utilities for integration and load testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use user_service::config::ServiceConfig;
use user_service::lifecycle::{build_state, Shutdown};
use user_service::users::NewUser;
use user_service::HttpServer;

/// Start a programmable mock points backend on an ephemeral port.
///
/// `f` receives the request path and returns status and body. Returns the
/// bound address and a counter of handled requests.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Arc<AtomicUsize>)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let (addr, hits, _) = start_recording_backend(f).await;
    (addr, hits)
}

/// Like [`start_programmable_backend`], also keeping the raw head of every
/// request (request line and headers, lowercased).
#[allow(dead_code)]
pub async fn start_recording_backend<F, Fut>(
    f: F,
) -> (SocketAddr, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let heads = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let counter = hits.clone();
    let recorded = heads.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let counter = counter.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]);
                        let path = head
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();
                        recorded.lock().unwrap().push(head.to_lowercase());
                        counter.fetch_add(1, Ordering::SeqCst);

                        let (status, body) = f(path).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits, heads)
}

/// Config with fault injection off, users 1..=5 and 42 seeded, and points
/// enrichment pointed at `points` when given.
#[allow(dead_code)]
pub fn service_config(points: Option<SocketAddr>) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.server.bind_address = "127.0.0.1:0".to_string();
    config.faults.denominator = 0;
    config.users = (1..=5)
        .map(|id| NewUser::with_id(id).field("name", format!("user-{}", id)))
        .chain([NewUser::with_id(42).field("name", "Ada")])
        .collect();

    match points {
        Some(addr) => {
            config.points.enabled = true;
            config.points.base_url = format!("http://{}", addr);
            config.points.timeout_ms = 500;
        }
        None => config.points.enabled = false,
    }
    config
}

/// Build and start the service on an ephemeral port.
#[allow(dead_code)]
pub async fn start_service(config: ServiceConfig) -> (String, Shutdown) {
    let state = build_state(&config).unwrap();
    let listener = TcpListener::bind(&config.server.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config.server, state);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}", addr), shutdown)
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
