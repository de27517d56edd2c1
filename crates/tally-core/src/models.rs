//! Domain models for Tally

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Budget threshold used when no override is configured
pub const DEFAULT_BUDGET_LIMIT: f64 = 5000.0;

/// Number of months returned by the monthly totals aggregate
pub const MONTHLY_HISTORY_LIMIT: usize = 6;

/// Round a currency amount to two decimal places
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A stored expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An expense waiting to be inserted (no id yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check presence/positivity and return a normalized copy
    ///
    /// Category and description are trimmed; a blank description becomes `None`.
    pub fn validated(&self) -> Result<NewExpense> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::Validation("category is required".to_string()));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::Validation(format!(
                "amount must be a positive number (got {})",
                self.amount
            )));
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(NewExpense {
            date: self.date,
            category: category.to_string(),
            amount: self.amount,
            description,
        })
    }

    /// Attach a store-assigned id
    pub fn into_expense(self, id: i64) -> Expense {
        Expense {
            id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            description: self.description,
        }
    }
}

/// A calendar month (year + month), identified by its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    start: NaiveDate,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::Validation(format!(
                "month must be between 1 and 12 (got {})",
                month
            )));
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::Validation(format!("year out of range: {}", year)))?;
        Ok(Self { start })
    }

    /// The period containing `date`
    pub fn of(date: NaiveDate) -> Self {
        // Day 1 always exists for a month that contains `date`
        Self {
            start: date.with_day(1).unwrap_or(date),
        }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start
    }

    pub fn last_day(&self) -> NaiveDate {
        self.start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Month key in `YYYY-MM` form, as used by [`MonthlyTotal::month`]
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }
}

impl std::str::FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || Error::Validation(format!("invalid month '{}' (use YYYY-MM)", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Sum of expense amounts for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Sum of expense amounts for one month (`YYYY-MM`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

/// Report payload for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub expenses: Vec<Expense>,
    pub category_totals: Vec<CategoryTotal>,
    pub monthly_totals: Vec<MonthlyTotal>,
    pub total_spending: f64,
    pub is_over_budget: bool,
    pub budget_limit: f64,
}

/// Forecast section of the insights payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    pub next_month: f64,
}

/// An expense flagged as unusually large
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: Option<String>,
}

impl From<&Expense> for Anomaly {
    fn from(expense: &Expense) -> Self {
        Self {
            date: expense.date,
            amount: expense.amount,
            description: expense.description.clone(),
        }
    }
}

/// Insights payload for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub predictions: Predictions,
    pub recommendations: Vec<String>,
    pub anomalies: Vec<Anomaly>,
}
