//! Insight Engine - combines the individual analyzers into one payload

use crate::models::{CategoryTotal, Expense, Insights, MonthlyTotal, Predictions};

use super::anomalies::{detect_anomalies_with_multiplier, ANOMALY_MULTIPLIER};
use super::concentration::{concentration_recommendation_with_threshold, CONCENTRATION_THRESHOLD};
use super::forecast::predict_next_month;

/// Runs every analyzer over the same inputs
///
/// The analyzers are independent: none sees another's output.
#[derive(Debug, Clone)]
pub struct InsightEngine {
    /// Top-category share that triggers a recommendation (default 0.5)
    concentration_threshold: f64,
    /// Multiple of the average amount that marks an anomaly (default 2.0)
    anomaly_multiplier: f64,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    pub fn new() -> Self {
        Self {
            concentration_threshold: CONCENTRATION_THRESHOLD,
            anomaly_multiplier: ANOMALY_MULTIPLIER,
        }
    }

    pub fn with_concentration_threshold(mut self, threshold: f64) -> Self {
        self.concentration_threshold = threshold;
        self
    }

    pub fn with_anomaly_multiplier(mut self, multiplier: f64) -> Self {
        self.anomaly_multiplier = multiplier;
        self
    }

    /// Build the insights payload for one period
    ///
    /// `expenses` and `category_totals` cover the period; `monthly_totals` is
    /// the recent history, most recent first.
    pub fn analyze(
        &self,
        expenses: &[Expense],
        category_totals: &[CategoryTotal],
        monthly_totals: &[MonthlyTotal],
    ) -> Insights {
        let next_month = predict_next_month(monthly_totals);
        let recommendations: Vec<String> =
            concentration_recommendation_with_threshold(category_totals, self.concentration_threshold)
                .into_iter()
                .collect();
        let anomalies = detect_anomalies_with_multiplier(expenses, self.anomaly_multiplier);

        tracing::debug!(
            next_month,
            recommendations = recommendations.len(),
            anomalies = anomalies.len(),
            "Insight analysis complete"
        );

        Insights {
            predictions: Predictions { next_month },
            recommendations,
            anomalies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{category_totals, monthly_totals};
    use chrono::NaiveDate;

    fn expense(id: i64, date: &str, category: &str, amount: f64) -> Expense {
        Expense {
            id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category: category.to_string(),
            amount,
            description: None,
        }
    }

    #[test]
    fn test_analyze_empty_inputs() {
        let insights = InsightEngine::new().analyze(&[], &[], &[]);
        assert_eq!(insights.predictions.next_month, 0.0);
        assert!(insights.recommendations.is_empty());
        assert!(insights.anomalies.is_empty());
    }

    #[test]
    fn test_analyze_combines_analyzers() {
        let history = vec![
            expense(1, "2024-04-03", "Food", 100.0),
            expense(2, "2024-05-03", "Food", 100.0),
            expense(3, "2024-05-04", "Food", 100.0),
            expense(4, "2024-05-05", "Food", 100.0),
            expense(5, "2024-05-06", "Travel", 1000.0),
        ];
        let may: Vec<Expense> = history[1..].to_vec();

        let insights = InsightEngine::new().analyze(
            &may,
            &category_totals(&may),
            &monthly_totals(&history),
        );

        // May 1300, April 100: trend +1200
        assert_eq!(insights.predictions.next_month, 2500.0);
        assert_eq!(insights.recommendations.len(), 1);
        assert!(insights.recommendations[0].contains("Travel"));
        assert_eq!(insights.anomalies.len(), 1);
        assert_eq!(insights.anomalies[0].amount, 1000.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let may = vec![
            expense(1, "2024-05-01", "Food", 60.0),
            expense(2, "2024-05-02", "Fun", 40.0),
        ];
        let engine = InsightEngine::new()
            .with_concentration_threshold(0.7)
            .with_anomaly_multiplier(1.1);

        let insights = engine.analyze(&may, &category_totals(&may), &[]);
        assert!(insights.recommendations.is_empty());
        // avg 50, threshold 55
        assert_eq!(insights.anomalies.len(), 1);
    }
}
