//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, read/write timeouts)
//!
//! Binding and serving belong to the lifecycle controller, which owns the
//! listener for exactly as long as the service is running.

use axum::{body::Body, Router};
use tower::ServiceBuilder;
use tower_http::{
    map_request_body::MapRequestBodyLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::{RequestBodyTimeoutLayer, TimeoutBody, TimeoutLayer},
    trace::TraceLayer,
};

use crate::config::{ServiceConfig, TimeoutConfig};
use crate::http::health;

/// Build the service router: `/health` plus middleware.
pub fn build_router(config: &ServiceConfig) -> Router {
    with_middleware(health::routes(config.health.format), &config.timeouts)
}

/// Wrap `router` in the standard middleware stack.
///
/// Layers run outermost first: request ID assignment, tracing, request ID
/// propagation, write timeout, read timeout.
#[allow(deprecated)]
pub fn with_middleware(router: Router, timeouts: &TimeoutConfig) -> Router {
    router
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyTimeoutLayer::new(timeouts.read()))
                .layer(MapRequestBodyLayer::new(Body::new::<TimeoutBody<Body>>)),
        )
        .layer(TimeoutLayer::new(timeouts.write()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use std::time::Duration;
    use tower::ServiceExt;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let app = build_router(&ServiceConfig::default());
        let response = app.oneshot(request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers().get("x-request-id").expect("request id header");
        assert_eq!(id.to_str().unwrap().len(), 36);
    }

    #[tokio::test]
    async fn test_write_timeout_returns_408() {
        let timeouts = TimeoutConfig {
            write_ms: 50,
            ..TimeoutConfig::default()
        };
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "late"
            }),
        );

        let response = with_middleware(slow, &timeouts)
            .oneshot(request("/slow"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
