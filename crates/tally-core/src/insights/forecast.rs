//! Next-month spending forecast
//!
//! Extrapolates the most recent month-over-month change one month forward.
//! The method is naive: with only two points of history a single
//! outlier month dominates the result, and there is no smoothing or
//! confidence bound.

use crate::models::MonthlyTotal;

/// Predict next month's total from monthly totals ordered most recent first
///
/// Returns 0 when fewer than two months are available. Otherwise applies the
/// latest trend (`m[0] - m[1]`) to `m[0]`, clamped at 0.
pub fn predict_next_month(monthly_totals: &[MonthlyTotal]) -> f64 {
    match monthly_totals {
        [latest, prior, ..] => {
            let trend = latest.total - prior.total;
            (latest.total + trend).max(0.0)
        }
        _ => 0.0,
    }
}
