//! CSV import for expense files
//!
//! Expected header: `date,category,amount[,description]`. Column names are
//! matched case-insensitively and may appear in any order.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::NewExpense;

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| {
                Error::Validation(format!("CSV header is missing the '{}' column", name))
            })
        };

        Ok(Self {
            date: required("date")?,
            category: required("category")?,
            amount: required("amount")?,
            description: find("description"),
        })
    }
}

/// Parse an expense CSV into insert payloads
///
/// Rows are parsed but not validated; the ledger validates them before
/// inserting. Parse failures name the offending line.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewExpense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut expenses = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        // Skip blank lines
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date = parse_date(field(columns.date))
            .map_err(|e| Error::Validation(format!("line {}: {}", line, e)))?;
        let amount = parse_amount(field(columns.amount))
            .map_err(|e| Error::Validation(format!("line {}: {}", line, e)))?;
        let description = columns
            .description
            .map(field)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        expenses.push(NewExpense {
            date,
            category: field(columns.category).to_string(),
            amount,
            description,
        });
    }

    debug!(rows = expenses.len(), "Parsed expense CSV");
    Ok(expenses)
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("unable to parse date '{}' (use YYYY-MM-DD)", s))
}

/// Parse an amount string, allowing a currency symbol and thousands separators
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned = s.trim().replace(['$', ',', ' '], "");

    cleaned
        .parse::<f64>()
        .map_err(|_| format!("unable to parse amount '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount(" 42 ").unwrap(), 42.0);
        assert!(parse_amount("twelve").is_err());
    }

    #[test]
    fn test_parse_csv() {
        let csv = "date,category,amount,description
2024-03-01,Food,12.50,Lunch
2024-03-02,Rent,\"$1,200.00\",
";
        let expenses = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[0].description.as_deref(), Some("Lunch"));
        assert_eq!(expenses[1].amount, 1200.0);
        assert_eq!(expenses[1].description, None);
    }

    #[test]
    fn test_parse_csv_header_any_order_and_case() {
        let csv = "Amount,DATE,Category
9.99,2024-05-10,Books
";
        let expenses = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].amount, 9.99);
        assert_eq!(
            expenses[0].date,
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
        );
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let csv = "date,amount\n2024-05-10,3\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_parse_csv_bad_row_names_line() {
        let csv = "date,category,amount
2024-05-10,Food,3
05/11/2024,Food,4
";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[test]
    fn test_parse_csv_skips_blank_lines() {
        let csv = "date,category,amount\n\n2024-05-10,Food,3\n,,\n";
        let expenses = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(expenses.len(), 1);
    }
}
