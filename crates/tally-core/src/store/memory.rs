//! In-memory expense store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{ExpenseStore, StoreBackend};
use crate::aggregate::{category_totals, monthly_totals_limited};
use crate::error::{Error, Result};
use crate::models::{CategoryTotal, Expense, MonthlyTotal, NewExpense, Period};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    /// Kept in insertion (id) order
    expenses: Vec<Expense>,
}

/// Store that keeps expenses in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| Error::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| Error::Poisoned(e.to_string()))
    }

    /// Expenses in `period`, in insertion order
    fn in_period(&self, period: Period) -> Result<Vec<Expense>> {
        Ok(self
            .read()?
            .expenses
            .iter()
            .filter(|e| period.contains(e.date))
            .cloned()
            .collect())
    }
}

impl ExpenseStore for MemoryStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    fn insert(&self, expense: &NewExpense) -> Result<Expense> {
        let expense = expense.validated()?;
        let mut inner = self.write()?;

        inner.last_id += 1;
        let stored = expense.into_expense(inner.last_id);
        inner.expenses.push(stored.clone());

        Ok(stored)
    }

    fn insert_all(&self, expenses: &[NewExpense]) -> Result<Vec<Expense>> {
        let validated = expenses
            .iter()
            .map(NewExpense::validated)
            .collect::<Result<Vec<_>>>()?;
        let mut inner = self.write()?;

        let mut stored = Vec::with_capacity(validated.len());
        for expense in validated {
            inner.last_id += 1;
            stored.push(expense.into_expense(inner.last_id));
        }
        inner.expenses.extend(stored.iter().cloned());

        Ok(stored)
    }

    fn query_by_month(&self, period: Period) -> Result<Vec<Expense>> {
        let mut expenses = self.in_period(period)?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(expenses)
    }

    fn group_sum_by_category(&self, period: Period) -> Result<Vec<CategoryTotal>> {
        Ok(category_totals(&self.in_period(period)?))
    }

    fn group_sum_by_month(&self, limit: usize) -> Result<Vec<MonthlyTotal>> {
        Ok(monthly_totals_limited(&self.read()?.expenses, limit))
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.expenses.len())
    }
}
