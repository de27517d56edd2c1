//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod expenses;
pub mod health;
pub mod insights;
pub mod reports;

// Re-export all handlers for use in router
pub use expenses::*;
pub use health::*;
pub use insights::*;
pub use reports::*;

use serde::Deserialize;
use tally_core::Period;

use crate::AppError;

/// `?month=YYYY-MM` query parameter shared by the period endpoints
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

impl MonthQuery {
    /// The requested period, defaulting to the current month
    pub fn period(&self) -> Result<Period, AppError> {
        match self.month.as_deref().map(str::trim) {
            None | Some("") => Ok(Period::current()),
            Some(month) => month
                .parse()
                .map_err(|_| AppError::bad_request("Invalid month format (use YYYY-MM)")),
        }
    }
}
