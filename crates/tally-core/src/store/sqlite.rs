//! SQLite expense store with connection pooling and migrations

use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, types::Type, Row};
use tracing::info;

use super::{ExpenseStore, StoreBackend};
use crate::error::{Error, Result};
use crate::models::{CategoryTotal, Expense, MonthlyTotal, NewExpense, Period};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

const INSERT_EXPENSE: &str =
    "INSERT INTO expenses (date, category, amount, description) VALUES (?1, ?2, ?3, ?4)";

/// Parse a `YYYY-MM-DD` date column
fn parse_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        date: parse_date(row, 1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        description: row.get(4)?,
    })
}

/// SQLite-backed store with connection pooling
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let store = Self {
            pool,
            db_path: path.to_string(),
        };
        store.run_migrations()?;

        Ok(store)
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a unique temporary file rather than `:memory:` because every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "tally_test_{}_{}.db",
            std::process::id(),
            id
        ));
        let path = path
            .to_str()
            .ok_or_else(|| Error::InvalidData("temp dir path is not valid UTF-8".to_string()))?
            .to_string();

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block writers
            -- Note: creates -wal and -shm sidecar files alongside the database
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: safe for most power-loss scenarios under WAL
            PRAGMA synchronous = NORMAL;

            PRAGMA temp_store = MEMORY;

            -- Expenses (immutable once inserted)
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY,
                date DATE NOT NULL,                        -- YYYY-MM-DD
                category TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                description TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
            CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);
            "#,
        )?;

        info!(path = %self.db_path, "Database schema initialized");
        Ok(())
    }
}

impl ExpenseStore for SqliteStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }

    fn insert(&self, expense: &NewExpense) -> Result<Expense> {
        let expense = expense.validated()?;
        let conn = self.conn()?;

        conn.execute(
            INSERT_EXPENSE,
            params![
                expense.date.to_string(),
                expense.category,
                expense.amount,
                expense.description,
            ],
        )?;

        Ok(expense.into_expense(conn.last_insert_rowid()))
    }

    fn insert_all(&self, expenses: &[NewExpense]) -> Result<Vec<Expense>> {
        let validated = expenses
            .iter()
            .map(NewExpense::validated)
            .collect::<Result<Vec<_>>>()?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut stored = Vec::with_capacity(validated.len());
        {
            let mut stmt = tx.prepare(INSERT_EXPENSE)?;
            for expense in validated {
                stmt.execute(params![
                    expense.date.to_string(),
                    expense.category,
                    expense.amount,
                    expense.description,
                ])?;
                stored.push(expense.into_expense(tx.last_insert_rowid()));
            }
        }

        // Dropping an uncommitted transaction rolls it back
        tx.commit()?;
        Ok(stored)
    }

    fn query_by_month(&self, period: Period) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, date, category, amount, description
            FROM expenses
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY date DESC, id DESC
            "#,
        )?;

        let expenses = stmt
            .query_map(
                params![period.first_day().to_string(), period.last_day().to_string()],
                row_to_expense,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    fn group_sum_by_category(&self, period: Period) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount) AS total, MIN(id) AS first_id
            FROM expenses
            WHERE date BETWEEN ?1 AND ?2
            GROUP BY category
            ORDER BY total DESC, first_id ASC
            "#,
        )?;

        let totals = stmt
            .query_map(
                params![period.first_day().to_string(), period.last_day().to_string()],
                |row| {
                    Ok(CategoryTotal {
                        category: row.get(0)?,
                        total: row.get(1)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(totals)
    }

    fn group_sum_by_month(&self, limit: usize) -> Result<Vec<MonthlyTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT strftime('%Y-%m', date) AS month, SUM(amount) AS total
            FROM expenses
            GROUP BY month
            ORDER BY month DESC
            LIMIT ?1
            "#,
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let totals = stmt
            .query_map(params![limit], |row| {
                Ok(MonthlyTotal {
                    month: row.get(0)?,
                    total: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(totals)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
