//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use super::MonthQuery;
use crate::{AppError, AppState};
use tally_core::Report;

/// GET /api/reports - Expenses, aggregates and budget status for a month
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Report>, AppError> {
    let period = params.period()?;
    let report = state
        .ledger
        .build_report(period)
        .map_err(AppError::from_core)?;

    Ok(Json(report))
}
