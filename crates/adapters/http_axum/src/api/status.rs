//! Liveness endpoint kept for dashboards that poll it.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/status`
pub async fn get() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        timestamp: Utc::now(),
    })
}
