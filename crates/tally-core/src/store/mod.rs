//! Expense record stores
//!
//! The rest of the crate talks to storage only through [`ExpenseStore`].
//! One implementation exists per backend:
//! - `sqlite` - SQLite file with connection pooling and migrations
//! - `memory` - Process-local vector, lost on exit
//!
//! The backend is chosen once at startup with [`open_store`] and the resulting
//! trait object is handed to whatever needs it.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{CategoryTotal, Expense, MonthlyTotal, NewExpense, Period};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{DbConn, DbPool, SqliteStore};

/// Storage backends selectable at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "memory" | "mem" | "in-memory" => Ok(Self::Memory),
            _ => Err(format!("Unknown store backend: {} (valid: sqlite, memory)", s)),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record store for expenses
///
/// All reads are independent: nothing ties two calls to the same snapshot.
pub trait ExpenseStore: Send + Sync {
    /// Which backend this store is
    fn backend(&self) -> StoreBackend;

    /// Validate and insert an expense, returning it with its assigned id
    fn insert(&self, expense: &NewExpense) -> Result<Expense>;

    /// Validate and insert a batch as one unit
    ///
    /// Either every expense is stored, in order, or none is.
    fn insert_all(&self, expenses: &[NewExpense]) -> Result<Vec<Expense>>;

    /// Expenses dated within `period`, newest date first (ties: newest id first)
    fn query_by_month(&self, period: Period) -> Result<Vec<Expense>>;

    /// Per-category sums within `period`, largest first
    ///
    /// Equal totals are ordered by the category's earliest inserted expense.
    fn group_sum_by_category(&self, period: Period) -> Result<Vec<CategoryTotal>>;

    /// Per-month sums across the whole store, most recent `limit` months first
    fn group_sum_by_month(&self, limit: usize) -> Result<Vec<MonthlyTotal>>;

    /// Total number of stored expenses
    fn count(&self) -> Result<usize>;
}

/// Open the store for `backend`
///
/// `path` is the database file for the SQLite backend and ignored otherwise.
pub fn open_store(backend: StoreBackend, path: &str) -> Result<Arc<dyn ExpenseStore>> {
    let store: Arc<dyn ExpenseStore> = match backend {
        StoreBackend::Sqlite => {
            if path.trim().is_empty() {
                return Err(Error::Validation(
                    "a database path is required for the sqlite store".to_string(),
                ));
            }
            Arc::new(SqliteStore::new(path)?)
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    tracing::info!(backend = %backend, "Expense store opened");
    Ok(store)
}

#[cfg(test)]
mod tests;
