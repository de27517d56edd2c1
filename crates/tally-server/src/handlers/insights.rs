//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use super::MonthQuery;
use crate::{AppError, AppState};
use tally_core::Insights;

/// GET /api/insights - Forecast, recommendations and anomalies for a month
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Insights>, AppError> {
    let period = params.period()?;
    let insights = state
        .ledger
        .build_insights(period)
        .map_err(AppError::from_core)?;

    Ok(Json(insights))
}
