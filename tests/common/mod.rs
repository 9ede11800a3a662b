//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{routing::get, Router};
use vision_service::config::ServiceConfig;

/// Config bound to loopback on `port` (0 for an ephemeral port).
pub fn test_config(port: u16) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = port;
    config
}

/// Non-pooled client so a stopped server is observed immediately.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

pub fn health_url(addr: SocketAddr) -> String {
    format!("http://{}/health", addr)
}

/// Wait until `/health` answers, retrying with backoff.
pub async fn wait_for_health(addr: SocketAddr) {
    let client = client();
    let mut delay = Duration::from_millis(10);

    for attempt in 1..=10 {
        match client.get(health_url(addr)).send().await {
            Ok(_) => return,
            Err(_) if attempt < 10 => {
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, Duration::from_millis(200));
            }
            Err(e) => panic!("Server not ready after {} attempts: {}", attempt, e),
        }
    }
}

/// Router whose `/slow` handler takes `delay` to answer.
#[allow(dead_code)]
pub fn slow_router(delay: Duration) -> Router {
    Router::new()
        .route("/health", get(|| async { "Service is healthy" }))
        .route(
            "/slow",
            get(move || async move {
                tokio::time::sleep(delay).await;
                "done"
            }),
        )
}
