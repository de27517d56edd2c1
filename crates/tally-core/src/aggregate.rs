//! Category and month aggregation over expense records
//!
//! Both functions are pure. The in-memory store answers its group queries
//! with them; the SQLite store computes the same shapes in SQL.

use std::collections::HashMap;

use crate::models::{CategoryTotal, Expense, MonthlyTotal, Period, MONTHLY_HISTORY_LIMIT};

/// Sum amounts per category, largest total first
///
/// Ties keep the order in which categories first appear in `records`.
pub fn category_totals(records: &[Expense]) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for record in records {
        match index.get(record.category.as_str()) {
            Some(&i) => totals[i].total += record.amount,
            None => {
                index.insert(record.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: record.category.clone(),
                    total: record.amount,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order survives for equal totals
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Sum amounts per calendar month, most recent month first, at most six months
pub fn monthly_totals(records: &[Expense]) -> Vec<MonthlyTotal> {
    monthly_totals_limited(records, MONTHLY_HISTORY_LIMIT)
}

/// Same as [`monthly_totals`] with an explicit cap on the number of months
pub fn monthly_totals_limited(records: &[Expense], limit: usize) -> Vec<MonthlyTotal> {
    let mut sums: HashMap<Period, f64> = HashMap::new();
    for record in records {
        *sums.entry(Period::of(record.date)).or_insert(0.0) += record.amount;
    }

    let mut months: Vec<(Period, f64)> = sums.into_iter().collect();
    months.sort_by(|a, b| b.0.cmp(&a.0));
    months.truncate(limit);

    months
        .into_iter()
        .map(|(period, total)| MonthlyTotal {
            month: period.key(),
            total,
        })
        .collect()
}
