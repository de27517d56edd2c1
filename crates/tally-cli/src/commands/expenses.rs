//! Expense command implementations (add, list, import)

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{import::parse_csv, Ledger, NewExpense};

use super::{format_money, parse_month, truncate};

pub fn cmd_add(
    ledger: &Ledger,
    date: &str,
    category: &str,
    amount: f64,
    description: Option<&str>,
) -> Result<()> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .context("Invalid --date format (use YYYY-MM-DD)")?;

    let mut expense = NewExpense::new(date, category, amount);
    if let Some(description) = description {
        expense = expense.with_description(description);
    }

    let stored = ledger
        .add_expense(&expense)
        .context("Failed to add expense")?;

    println!(
        "✅ Added expense #{}: {} {} on {}",
        stored.id,
        format_money(stored.amount),
        stored.category,
        stored.date
    );

    Ok(())
}

pub fn cmd_list(ledger: &Ledger, month: Option<&str>) -> Result<()> {
    let period = parse_month(month)?;
    let expenses = ledger.expenses_for(period)?;

    println!();
    println!("🧾 Expenses for {}", period);
    println!("   ─────────────────────────────────────────────────────────────");

    if expenses.is_empty() {
        println!("   No expenses recorded.");
        println!();
        return Ok(());
    }

    for expense in &expenses {
        println!(
            "   {:>5}  {}  {:<16} {:>12}  {}",
            expense.id,
            expense.date,
            truncate(&expense.category, 16),
            format_money(expense.amount),
            truncate(expense.description.as_deref().unwrap_or(""), 30)
        );
    }

    println!();
    println!("   {} expense(s)", expenses.len());
    println!();
    Ok(())
}

pub fn cmd_import(ledger: &Ledger, file: &Path) -> Result<()> {
    println!("📥 Importing {}...", file.display());

    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let rows = parse_csv(reader).context("Failed to parse CSV")?;

    if rows.is_empty() {
        println!("   No rows found.");
        return Ok(());
    }

    let imported = ledger
        .import_expenses(&rows)
        .context("Import aborted, nothing was stored")?;
    let total: f64 = imported.iter().map(|e| e.amount).sum();

    println!(
        "✅ Imported {} expense(s) totalling {}",
        imported.len(),
        format_money(total)
    );
    Ok(())
}
