//! Health check endpoint.
//!
//! `GET /health` always answers 200 while the listener is up. Other methods
//! on the path get 405, HEAD included: axum would otherwise route HEAD to the
//! GET handler.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::HealthFormat;
use crate::observability::metrics;

/// Plain-text body returned in [`HealthFormat::Text`] mode.
pub const HEALTHY_TEXT: &str = "Service is healthy";

/// JSON body returned in [`HealthFormat::Json`] mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl HealthStatus {
    pub fn healthy_now() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

async fn health(State(format): State<HealthFormat>) -> Response {
    metrics::record_health_check();
    tracing::debug!(?format, "Health check");

    match format {
        HealthFormat::Text => (StatusCode::OK, HEALTHY_TEXT).into_response(),
        HealthFormat::Json => (StatusCode::OK, Json(HealthStatus::healthy_now())).into_response(),
    }
}

async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")])
}

/// Router serving `/health` in the given format.
pub fn routes(format: HealthFormat) -> Router {
    Router::new()
        .route("/health", get(health).head(method_not_allowed))
        .with_state(format)
}
