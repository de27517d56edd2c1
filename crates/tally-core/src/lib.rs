//! Tally Core Library
//!
//! Shared functionality for the Tally expense tracker:
//! - Expense record stores (SQLite, in-memory) behind one trait
//! - Aggregation of expenses by category and by month
//! - Heuristic insights (next-month forecast, concentration, anomalies)
//! - Report assembly with budget alerting
//! - CSV import
//! - Fire-and-forget sync notifications

pub mod aggregate;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod store;
pub mod sync;

/// Test fixtures, failing store and recording sink
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{budget_limit_from_env, SyncConfig};
pub use error::{Error, Result};
pub use insights::InsightEngine;
pub use ledger::Ledger;
pub use models::{
    Anomaly, CategoryTotal, Expense, Insights, MonthlyTotal, NewExpense, Period, Predictions,
    Report, DEFAULT_BUDGET_LIMIT,
};
pub use store::{open_store, ExpenseStore, MemoryStore, SqliteStore, StoreBackend};
pub use sync::{ExpenseEvent, NoopSink, SyncSink};
