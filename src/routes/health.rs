use axum::{Json, extract::State};
use serde::Serialize;

use crate::{AppState, database, error::Result};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

/// Liveness: answers as long as the process can serve requests.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        database: None,
    })
}

/// Readiness: also requires the store to answer a ping.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<HealthStatus>> {
    database::check_health(state.products.as_ref()).await?;

    Ok(Json(HealthStatus {
        status: "ready",
        database: Some("connected"),
    }))
}
