//! Gateway Health API
//!
//! Public liveness endpoint; never behind the gate.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::ServerState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<ServerState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        service: "hireforge".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}
