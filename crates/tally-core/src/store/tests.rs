//! Store tests
//!
//! Behavioural tests run against every backend so both answer queries the same way.

use super::*;
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn backends() -> Vec<Box<dyn ExpenseStore>> {
    vec![
        Box::new(SqliteStore::in_memory().unwrap()),
        Box::new(MemoryStore::new()),
    ]
}

fn add(store: &dyn ExpenseStore, day: &str, category: &str, amount: f64) -> Expense {
    store
        .insert(&NewExpense::new(date(day), category, amount))
        .unwrap()
}

fn period(s: &str) -> Period {
    s.parse().unwrap()
}

#[test]
fn test_insert_assigns_increasing_ids() {
    for store in backends() {
        let a = add(store.as_ref(), "2024-03-01", "Food", 10.0);
        let b = add(store.as_ref(), "2024-03-02", "Food", 20.0);
        assert!(a.id > 0, "{}", store.backend());
        assert!(b.id > a.id, "{}", store.backend());
        assert_eq!(store.count().unwrap(), 2);
    }
}

#[test]
fn test_insert_normalizes_fields() {
    for store in backends() {
        let stored = store
            .insert(&NewExpense::new(date("2024-03-01"), " Food ", 9.5).with_description(" lunch "))
            .unwrap();
        assert_eq!(stored.category, "Food");
        assert_eq!(stored.description.as_deref(), Some("lunch"));

        let month = store.query_by_month(period("2024-03")).unwrap();
        assert_eq!(month, vec![stored]);
    }
}

#[test]
fn test_insert_rejects_invalid_expense() {
    for store in backends() {
        let err = store
            .insert(&NewExpense::new(date("2024-03-01"), "Food", -1.0))
            .unwrap_err();
        assert!(err.is_validation(), "{}", store.backend());

        let err = store
            .insert(&NewExpense::new(date("2024-03-01"), "", 5.0))
            .unwrap_err();
        assert!(err.is_validation(), "{}", store.backend());

        assert_eq!(store.count().unwrap(), 0);
    }
}

#[test]
fn test_query_by_month_filters_and_orders_newest_first() {
    for store in backends() {
        let s = store.as_ref();
        add(s, "2024-02-29", "Food", 1.0);
        let early = add(s, "2024-03-01", "Food", 2.0);
        let late = add(s, "2024-03-31", "Food", 3.0);
        let same_day = add(s, "2024-03-01", "Fun", 4.0);
        add(s, "2024-04-01", "Food", 5.0);

        let ids: Vec<i64> = s
            .query_by_month(period("2024-03"))
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![late.id, same_day.id, early.id], "{}", s.backend());
    }
}

#[test]
fn test_query_by_month_empty() {
    for store in backends() {
        assert!(store.query_by_month(period("2030-01")).unwrap().is_empty());
    }
}

#[test]
fn test_group_sum_by_category() {
    for store in backends() {
        let s = store.as_ref();
        add(s, "2024-03-01", "Food", 12.5);
        add(s, "2024-03-05", "Rent", 900.0);
        add(s, "2024-03-09", "Food", 7.5);
        add(s, "2024-04-01", "Food", 1000.0);

        let totals = s.group_sum_by_category(period("2024-03")).unwrap();
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Rent".into(),
                    total: 900.0
                },
                CategoryTotal {
                    category: "Food".into(),
                    total: 20.0
                },
            ],
            "{}",
            s.backend()
        );
    }
}

#[test]
fn test_group_sum_by_category_ties_by_first_inserted() {
    for store in backends() {
        let s = store.as_ref();
        add(s, "2024-03-20", "Travel", 50.0);
        add(s, "2024-03-01", "Books", 50.0);
        add(s, "2024-03-10", "Food", 50.0);

        let names: Vec<String> = s
            .group_sum_by_category(period("2024-03"))
            .unwrap()
            .into_iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(names, vec!["Travel", "Books", "Food"], "{}", s.backend());
    }
}

#[test]
fn test_group_sum_by_month_limit_and_order() {
    for store in backends() {
        let s = store.as_ref();
        for month in 1..=8 {
            add(s, &format!("2024-{:02}-15", month), "Food", month as f64 * 10.0);
        }
        add(s, "2024-08-01", "Fun", 5.0);

        let totals = s.group_sum_by_month(6).unwrap();
        assert_eq!(totals.len(), 6, "{}", s.backend());
        assert_eq!(totals[0].month, "2024-08");
        assert_eq!(totals[0].total, 85.0);
        assert_eq!(totals[5].month, "2024-03");
        assert!(totals.windows(2).all(|w| w[0].month > w[1].month));

        assert_eq!(s.group_sum_by_month(2).unwrap().len(), 2);
    }
}

#[test]
fn test_backend_names() {
    assert_eq!("sqlite".parse::<StoreBackend>().unwrap(), StoreBackend::Sqlite);
    assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
    assert!("postgres".parse::<StoreBackend>().is_err());
    assert_eq!(StoreBackend::default().to_string(), "sqlite");
}

#[test]
fn test_open_store_selects_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");

    let sqlite = open_store(StoreBackend::Sqlite, path.to_str().unwrap()).unwrap();
    assert_eq!(sqlite.backend(), StoreBackend::Sqlite);

    let memory = open_store(StoreBackend::Memory, "").unwrap();
    assert_eq!(memory.backend(), StoreBackend::Memory);

    assert!(open_store(StoreBackend::Sqlite, "  ").is_err());
}

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");
    let path = path.to_str().unwrap();

    {
        let store = SqliteStore::new(path).unwrap();
        add(&store, "2024-03-01", "Food", 10.0);
    }

    let reopened = SqliteStore::new(path).unwrap();
    assert_eq!(reopened.count().unwrap(), 1);
}

#[test]
fn test_sqlite_schema_rejects_non_positive_amount() {
    let store = SqliteStore::in_memory().unwrap();
    let conn = store.conn().unwrap();
    let result = conn.execute(
        "INSERT INTO expenses (date, category, amount) VALUES ('2024-03-01', 'Food', 0)",
        [],
    );
    assert!(result.is_err(), "CHECK constraint should reject zero amounts");
}

#[test]
fn test_sqlite_bad_date_row_is_an_error() {
    let store = SqliteStore::in_memory().unwrap();
    {
        let conn = store.conn().unwrap();
        conn.execute(
            "INSERT INTO expenses (date, category, amount) VALUES ('2024-03-1x', 'Food', 3)",
            [],
        )
        .unwrap();
    }

    // '2024-03-1x' sorts inside the March range as text
    let err = store.query_by_month(period("2024-03")).unwrap_err();
    assert!(matches!(err, Error::Database(_)));
}

#[test]
fn test_insert_all_stores_batch_in_order() {
    for store in backends() {
        let stored = store
            .insert_all(&[
                NewExpense::new(date("2024-03-01"), "Food", 10.0),
                NewExpense::new(date("2024-03-02"), " Rent ", 900.0),
            ])
            .unwrap();

        assert_eq!(stored.len(), 2, "{}", store.backend());
        assert!(stored[1].id > stored[0].id);
        assert_eq!(stored[1].category, "Rent");
        assert_eq!(store.count().unwrap(), 2);
    }
}

#[test]
fn test_insert_all_invalid_row_stores_nothing() {
    for store in backends() {
        let err = store
            .insert_all(&[
                NewExpense::new(date("2024-03-01"), "Food", 10.0),
                NewExpense::new(date("2024-03-02"), "Food", 0.0),
            ])
            .unwrap_err();
        assert!(err.is_validation(), "{}", store.backend());
        assert_eq!(store.count().unwrap(), 0, "{}", store.backend());
    }
}

#[test]
fn test_sqlite_insert_all_rolls_back_on_write_failure() {
    let store = SqliteStore::in_memory().unwrap();
    store
        .conn()
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_rent BEFORE INSERT ON expenses
             WHEN NEW.category = 'Rent'
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();

    let err = store
        .insert_all(&[
            NewExpense::new(date("2024-03-01"), "Food", 10.0),
            NewExpense::new(date("2024-03-02"), "Rent", 900.0),
        ])
        .unwrap_err();
    assert!(matches!(err, Error::Database(_)));
    assert_eq!(store.count().unwrap(), 0);

    // The store is still usable afterwards
    add(&store, "2024-03-03", "Food", 5.0);
    assert_eq!(store.count().unwrap(), 1);
}
