//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub sync: &'static str,
}

/// GET /api/health - Liveness plus the configured store backend
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.ledger.store().backend().as_str(),
        sync: state.ledger.sink_name(),
    })
}

/// Fallback for unknown `/api` routes
pub async fn api_not_found() -> AppError {
    AppError::not_found("Not found")
}
