//! Outlier detection over a period's expenses

use crate::models::{Anomaly, Expense};

/// Expenses above this multiple of the period average are flagged
pub const ANOMALY_MULTIPLIER: f64 = 2.0;

/// Flag every expense larger than twice the mean amount, in input order
pub fn detect_anomalies(records: &[Expense]) -> Vec<Anomaly> {
    detect_anomalies_with_multiplier(records, ANOMALY_MULTIPLIER)
}

/// Same as [`detect_anomalies`] with a custom multiplier
pub fn detect_anomalies_with_multiplier(records: &[Expense], multiplier: f64) -> Vec<Anomaly> {
    if records.is_empty() {
        return Vec::new();
    }

    let avg = records.iter().map(|r| r.amount).sum::<f64>() / records.len() as f64;
    let threshold = multiplier * avg;

    records
        .iter()
        .filter(|r| r.amount > threshold)
        .map(Anomaly::from)
        .collect()
}
