//! Integration tests for tally-core
//!
//! These tests exercise the full import → store → report/insights workflow
//! against every store backend.

use std::sync::Arc;

use tally_core::{
    import::parse_csv, ExpenseStore, Ledger, MemoryStore, Period, SqliteStore,
};

/// Two months of expenses
/// - February: 100 spread over two categories
/// - March: 1300, dominated by one Travel expense
fn expenses_csv() -> &'static str {
    r#"date,category,amount,description
2024-02-03,Food,60.00,Groceries
2024-02-17,Fun,40.00,Cinema
2024-03-01,Food,100.00,Groceries
2024-03-08,Food,100.00,
2024-03-15,Fun,100.00,Concert
2024-03-20,Travel,"$1,000.00",Flights"#
}

fn ledgers() -> Vec<Ledger> {
    let stores: Vec<Arc<dyn ExpenseStore>> = vec![
        Arc::new(SqliteStore::in_memory().expect("Failed to create SQLite store")),
        Arc::new(MemoryStore::new()),
    ];
    stores.into_iter().map(Ledger::without_sync).collect()
}

fn march() -> Period {
    "2024-03".parse().unwrap()
}

// =============================================================================
// Import → Report
// =============================================================================

#[test]
fn test_import_then_report() {
    let rows = parse_csv(expenses_csv().as_bytes()).expect("Failed to parse CSV");
    assert_eq!(rows.len(), 6);

    for ledger in ledgers() {
        let backend = ledger.store().backend();
        let imported = ledger.import_expenses(&rows).expect("Import failed");
        assert_eq!(imported.len(), 6, "{}", backend);

        let report = ledger.build_report(march()).unwrap();
        assert_eq!(report.expenses.len(), 4, "{}", backend);
        assert_eq!(report.expenses[0].category, "Travel");
        assert_eq!(report.total_spending, 1300.0);
        assert!(!report.is_over_budget);

        let categories: Vec<(&str, f64)> = report
            .category_totals
            .iter()
            .map(|t| (t.category.as_str(), t.total))
            .collect();
        assert_eq!(
            categories,
            vec![("Travel", 1000.0), ("Food", 200.0), ("Fun", 100.0)],
            "{}",
            backend
        );

        let months: Vec<(&str, f64)> = report
            .monthly_totals
            .iter()
            .map(|t| (t.month.as_str(), t.total))
            .collect();
        assert_eq!(months, vec![("2024-03", 1300.0), ("2024-02", 100.0)]);
    }
}

#[test]
fn test_import_then_insights() {
    let rows = parse_csv(expenses_csv().as_bytes()).unwrap();

    for ledger in ledgers() {
        ledger.import_expenses(&rows).unwrap();
        let insights = ledger.build_insights(march()).unwrap();

        // 1300 + (1300 - 100)
        assert_eq!(insights.predictions.next_month, 2500.0);
        assert_eq!(
            insights.recommendations,
            vec![
                "Travel accounts for 76.9% of your spending this month. \
                 Consider setting a budget for this category."
                    .to_string()
            ]
        );
        // Average 325, threshold 650
        assert_eq!(insights.anomalies.len(), 1);
        assert_eq!(insights.anomalies[0].amount, 1000.0);
        assert_eq!(insights.anomalies[0].description.as_deref(), Some("Flights"));
    }
}

#[test]
fn test_report_wire_format() {
    let rows = parse_csv(expenses_csv().as_bytes()).unwrap();
    let ledger = Ledger::without_sync(Arc::new(MemoryStore::new()));
    ledger.import_expenses(&rows).unwrap();

    let json = serde_json::to_value(ledger.build_report(march()).unwrap()).unwrap();
    assert_eq!(json["totalSpending"], 1300.0);
    assert_eq!(json["isOverBudget"], false);
    assert_eq!(json["categoryTotals"][0]["category"], "Travel");
    assert_eq!(json["monthlyTotals"][0]["month"], "2024-03");
    assert_eq!(json["expenses"][0]["date"], "2024-03-20");

    let json = serde_json::to_value(ledger.build_insights(march()).unwrap()).unwrap();
    assert_eq!(json["predictions"]["nextMonth"], 2500.0);
    assert_eq!(json["anomalies"][0]["date"], "2024-03-20");
}

#[test]
fn test_over_budget_month() {
    for ledger in ledgers() {
        let ledger = ledger.with_budget_limit(1000.0);
        let rows = parse_csv(expenses_csv().as_bytes()).unwrap();
        ledger.import_expenses(&rows).unwrap();

        assert!(ledger.build_report(march()).unwrap().is_over_budget);
        assert!(!ledger
            .build_report("2024-02".parse().unwrap())
            .unwrap()
            .is_over_budget);
    }
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_sqlite_report_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");
    let path = path.to_str().unwrap();

    let rows = parse_csv(expenses_csv().as_bytes()).unwrap();
    {
        let ledger = Ledger::without_sync(Arc::new(SqliteStore::new(path).unwrap()));
        ledger.import_expenses(&rows).unwrap();
    }

    let ledger = Ledger::without_sync(Arc::new(SqliteStore::new(path).unwrap()));
    let report = ledger.build_report(march()).unwrap();
    assert_eq!(report.total_spending, 1300.0);
    assert_eq!(ledger.store().count().unwrap(), 6);
}
