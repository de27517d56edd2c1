//! Ledger - the service object the server and CLI work through
//!
//! Holds the expense store and the sync sink, and assembles reports and
//! insights from three independent store reads per request:
//! - the period's expenses
//! - the period's category totals
//! - the most recent monthly totals
//!
//! Nothing ties the reads to one snapshot, so a concurrent insert can land
//! between them. Any failed read aborts the whole build.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::insights::InsightEngine;
use crate::models::{
    round_cents, CategoryTotal, Expense, Insights, MonthlyTotal, NewExpense, Period, Report,
    DEFAULT_BUDGET_LIMIT, MONTHLY_HISTORY_LIMIT,
};
use crate::store::ExpenseStore;
use crate::sync::{ExpenseEvent, NoopSink, SyncSink};

/// Results of the three reads behind a report or insight build
struct PeriodData {
    expenses: Vec<Expense>,
    category_totals: Vec<CategoryTotal>,
    monthly_totals: Vec<MonthlyTotal>,
}

#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn ExpenseStore>,
    sink: Arc<dyn SyncSink>,
    engine: InsightEngine,
    budget_limit: f64,
}

impl Ledger {
    pub fn new(store: Arc<dyn ExpenseStore>, sink: Arc<dyn SyncSink>) -> Self {
        Self {
            store,
            sink,
            engine: InsightEngine::new(),
            budget_limit: DEFAULT_BUDGET_LIMIT,
        }
    }

    /// Ledger with sync disabled
    pub fn without_sync(store: Arc<dyn ExpenseStore>) -> Self {
        Self::new(store, Arc::new(NoopSink))
    }

    pub fn with_budget_limit(mut self, budget_limit: f64) -> Self {
        self.budget_limit = budget_limit;
        self
    }

    pub fn store(&self) -> &Arc<dyn ExpenseStore> {
        &self.store
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    pub fn budget_limit(&self) -> f64 {
        self.budget_limit
    }

    /// Validate and store one expense, then notify the sync sink
    pub fn add_expense(&self, expense: &NewExpense) -> Result<Expense> {
        let expense = expense.validated()?;
        let stored = self.store.insert(&expense)?;
        self.sink.notify(&ExpenseEvent::created(stored.clone()));

        debug!(id = stored.id, category = %stored.category, "Expense added");
        Ok(stored)
    }

    /// Validate every row, then store them in order as one batch
    ///
    /// Nothing is stored if any row is invalid (the error names the 1-based
    /// row) or if the store fails partway. The sink hears about the rows only
    /// once the whole batch is stored.
    pub fn import_expenses(&self, rows: &[NewExpense]) -> Result<Vec<Expense>> {
        let validated = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.validated().map_err(|e| match e {
                    Error::Validation(msg) => Error::Validation(format!("row {}: {}", i + 1, msg)),
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let stored = self.store.insert_all(&validated)?;
        for expense in &stored {
            self.sink.notify(&ExpenseEvent::created(expense.clone()));
        }

        debug!(count = stored.len(), "Expenses imported");
        Ok(stored)
    }

    /// Expenses recorded in `period`, newest first
    pub fn expenses_for(&self, period: Period) -> Result<Vec<Expense>> {
        self.store.query_by_month(period)
    }

    fn read_period(&self, period: Period) -> Result<PeriodData> {
        Ok(PeriodData {
            expenses: self.store.query_by_month(period)?,
            category_totals: self.store.group_sum_by_category(period)?,
            monthly_totals: self.store.group_sum_by_month(MONTHLY_HISTORY_LIMIT)?,
        })
    }

    /// Assemble the report for `period`
    pub fn build_report(&self, period: Period) -> Result<Report> {
        let data = self.read_period(period)?;

        let total_spending = round_cents(data.expenses.iter().map(|e| e.amount).sum());
        let is_over_budget = total_spending > self.budget_limit;

        debug!(
            period = %period,
            expenses = data.expenses.len(),
            categories = data.category_totals.len(),
            months = data.monthly_totals.len(),
            total_spending,
            is_over_budget,
            "Built report"
        );

        Ok(Report {
            expenses: data.expenses,
            category_totals: data.category_totals,
            monthly_totals: data.monthly_totals,
            total_spending,
            is_over_budget,
            budget_limit: self.budget_limit,
        })
    }

    /// Assemble predictions, recommendations and anomalies for `period`
    pub fn build_insights(&self, period: Period) -> Result<Insights> {
        let data = self.read_period(period)?;

        debug!(period = %period, expenses = data.expenses.len(), "Building insights");
        Ok(self
            .engine
            .analyze(&data.expenses, &data.category_totals, &data.monthly_totals))
    }
}
