//! Test utilities for tally-core
//!
//! Fixtures shared by the unit tests here and by the server/CLI test suites
//! (enabled there through the `test-utils` feature).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{CategoryTotal, Expense, MonthlyTotal, NewExpense, Period};
use crate::store::{ExpenseStore, MemoryStore, StoreBackend};
use crate::sync::{ExpenseEvent, SyncSink};

/// Parse a `YYYY-MM-DD` literal
///
/// # Panics
/// On a malformed date; only meant for test fixtures.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|e| panic!("bad date {}: {}", s, e))
}

/// A small two-month data set: February 2024 (100) and March 2024 (1300)
pub fn sample_expenses() -> Vec<NewExpense> {
    vec![
        NewExpense::new(date("2024-02-12"), "Food", 100.0),
        NewExpense::new(date("2024-03-01"), "Food", 100.0).with_description("Groceries"),
        NewExpense::new(date("2024-03-08"), "Food", 100.0),
        NewExpense::new(date("2024-03-15"), "Fun", 100.0),
        NewExpense::new(date("2024-03-20"), "Travel", 1000.0).with_description("Flights"),
    ]
}

/// Store that starts failing after a set number of calls
///
/// Calls before that point are served by an inner [`MemoryStore`]. Every
/// trait method except `backend` counts as a call.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    allowed: usize,
    calls: AtomicUsize,
}

impl FailingStore {
    /// Fails every call
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets the first `calls` calls through, then fails
    pub fn after(calls: usize) -> Self {
        Self {
            allowed: calls,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.allowed {
            Ok(())
        } else {
            Err(Error::InvalidData("store unavailable".to_string()))
        }
    }
}

impl ExpenseStore for FailingStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    fn insert(&self, expense: &NewExpense) -> Result<Expense> {
        self.check()?;
        self.inner.insert(expense)
    }

    fn insert_all(&self, expenses: &[NewExpense]) -> Result<Vec<Expense>> {
        self.check()?;
        self.inner.insert_all(expenses)
    }

    fn query_by_month(&self, period: Period) -> Result<Vec<Expense>> {
        self.check()?;
        self.inner.query_by_month(period)
    }

    fn group_sum_by_category(&self, period: Period) -> Result<Vec<CategoryTotal>> {
        self.check()?;
        self.inner.group_sum_by_category(period)
    }

    fn group_sum_by_month(&self, limit: usize) -> Result<Vec<MonthlyTotal>> {
        self.check()?;
        self.inner.group_sum_by_month(limit)
    }

    fn count(&self) -> Result<usize> {
        self.check()?;
        self.inner.count()
    }
}

/// Sink that remembers every event it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ExpenseEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ExpenseEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl SyncSink for RecordingSink {
    fn notify(&self, event: &ExpenseEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
