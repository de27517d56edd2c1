//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::MonthQuery;
use crate::{AppError, AppState, MAX_BODY_SIZE};
use tally_core::{Expense, NewExpense};

/// Request body for creating an expense
///
/// Every field is optional here so missing ones produce a 400 with a
/// specific message instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
}

impl CreateExpenseRequest {
    fn into_new_expense(self) -> Result<NewExpense, AppError> {
        let date = self
            .date
            .ok_or_else(|| AppError::bad_request("date is required"))?;
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?;
        let category = self
            .category
            .ok_or_else(|| AppError::bad_request("category is required"))?;
        let amount = self
            .amount
            .ok_or_else(|| AppError::bad_request("amount is required"))?;

        Ok(NewExpense {
            date,
            category,
            amount,
            description: self.description,
        })
    }
}

/// GET /api/expenses - List expenses for a month (default: current)
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let period = params.period()?;
    let expenses = state
        .ledger
        .expenses_for(period)
        .map_err(AppError::from_core)?;

    Ok(Json(expenses))
}

/// POST /api/expenses - Record a new expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Expense>, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    let req: CreateExpenseRequest =
        serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))?;

    let expense = state
        .ledger
        .add_expense(&req.into_new_expense()?)
        .map_err(AppError::from_core)?;

    Ok(Json(expense))
}
