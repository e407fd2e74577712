use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::db;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub database: String,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// Health check endpoint - public
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let db_ok = db::health_check(&state.db).await;

    // The database is the only dependency; without it nothing works
    let (status, status_code) = if db_ok {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                database: if db_ok { "ok" } else { "error" }.to_string(),
            },
        }),
    )
}

/// Root endpoint - public
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to RandGate Bid Response System API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
