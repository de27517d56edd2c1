//! Cloud sync notifications
//!
//! After an expense is stored the ledger hands an [`ExpenseEvent`] to its
//! [`SyncSink`]. Sinks must return immediately; delivery happens elsewhere
//! (or not at all) and can never fail the insert that triggered it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Something that happened to the expense store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExpenseEvent {
    Created {
        expense: Expense,
        at: DateTime<Utc>,
    },
}

impl ExpenseEvent {
    pub fn created(expense: Expense) -> Self {
        Self::Created {
            expense,
            at: Utc::now(),
        }
    }

    pub fn expense(&self) -> &Expense {
        match self {
            Self::Created { expense, .. } => expense,
        }
    }
}

/// Fire-and-forget receiver of store events
pub trait SyncSink: Send + Sync {
    /// Queue `event` for delivery without blocking
    fn notify(&self, event: &ExpenseEvent);

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Sink that drops every event (sync disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl SyncSink for NoopSink {
    fn notify(&self, _event: &ExpenseEvent) {}

    fn name(&self) -> &'static str {
        "noop"
    }
}
