//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_store` / `open_ledger` - Shared utilities to open the configured store
//! - `ephemeral_store_warning` - Notice for one-shot commands on the memory store
//! - `parse_month` - `--month` argument handling
//! - `cmd_init` - Initialize the database

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tally_core::{budget_limit_from_env, ExpenseStore, Ledger, Period, StoreBackend};

/// Open the expense store for `backend`
pub fn open_store(db_path: &Path, backend: StoreBackend) -> Result<Arc<dyn ExpenseStore>> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    tally_core::open_store(backend, path_str)
        .with_context(|| format!("Failed to open {} store", backend))
}

/// Warning for one-shot commands run against a store that dies with the process
pub fn ephemeral_store_warning(backend: StoreBackend) -> Option<&'static str> {
    (backend == StoreBackend::Memory).then_some(
        "⚠️  Memory store: nothing is kept after this command exits (use --store sqlite)",
    )
}

/// Open a ledger for one-shot commands
///
/// Sync stays disabled: the process exits before a webhook could be delivered.
pub fn open_ledger(db_path: &Path, backend: StoreBackend) -> Result<Ledger> {
    // stderr, so `--json` output stays parseable
    if let Some(warning) = ephemeral_store_warning(backend) {
        eprintln!("{}", warning);
    }

    let store = open_store(db_path, backend)?;
    Ok(Ledger::without_sync(store).with_budget_limit(budget_limit_from_env()))
}

/// Resolve `--month`, defaulting to the current month
pub fn parse_month(month: Option<&str>) -> Result<Period> {
    match month {
        Some(month) => month
            .parse()
            .with_context(|| format!("Invalid --month '{}' (use YYYY-MM)", month)),
        None => Ok(Period::current()),
    }
}

pub fn cmd_init(db_path: &Path, backend: StoreBackend) -> Result<()> {
    if backend == StoreBackend::Memory {
        println!("ℹ️  The memory store needs no initialization");
        return Ok(());
    }

    println!("🔧 Initializing database at {}...", db_path.display());

    let store = open_store(db_path, backend)?;
    let count = store.count().context("Failed to read expense count")?;
    println!("   Expenses stored: {}", count);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: tally add --date 2024-03-01 --category Food --amount 12.50");
    println!("  2. Import a CSV: tally import --file expenses.csv");
    println!("  3. Start web UI: tally serve");

    Ok(())
}
