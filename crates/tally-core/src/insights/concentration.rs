//! Category concentration recommendation

use crate::models::CategoryTotal;

/// Share of total spending above which the top category triggers a recommendation
pub const CONCENTRATION_THRESHOLD: f64 = 0.5;

/// Recommend reviewing the top category when it holds more than half of spending
///
/// `category_totals` must be sorted descending (as the aggregator and stores
/// return it), so the first entry is the top category. Produces at most one
/// recommendation; empty input or a zero total yields none.
pub fn concentration_recommendation(category_totals: &[CategoryTotal]) -> Option<String> {
    concentration_recommendation_with_threshold(category_totals, CONCENTRATION_THRESHOLD)
}

/// Same as [`concentration_recommendation`] with a custom share threshold
pub fn concentration_recommendation_with_threshold(
    category_totals: &[CategoryTotal],
    threshold: f64,
) -> Option<String> {
    let highest = category_totals.first()?;
    let total: f64 = category_totals.iter().map(|c| c.total).sum();
    if total <= 0.0 {
        return None;
    }

    let share = highest.total / total;
    if share > threshold {
        Some(format!(
            "{} accounts for {:.1}% of your spending this month. Consider setting a budget for this category.",
            highest.category,
            share * 100.0
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(&str, f64)]) -> Vec<CategoryTotal> {
        entries
            .iter()
            .map(|(category, total)| CategoryTotal {
                category: category.to_string(),
                total: *total,
            })
            .collect()
    }

    #[test]
    fn test_majority_category_triggers() {
        let rec = concentration_recommendation(&totals(&[("Food", 600.0), ("Travel", 400.0)]));
        let rec = rec.expect("60% share should produce a recommendation");
        assert!(rec.contains("Food"));
        assert!(rec.contains("60.0%"));
    }

    #[test]
    fn test_exactly_half_does_not_trigger() {
        let rec = concentration_recommendation(&totals(&[("Food", 500.0), ("Travel", 500.0)]));
        assert!(rec.is_none());
    }

    #[test]
    fn test_single_category_is_full_share() {
        let rec = concentration_recommendation(&totals(&[("Rent", 1200.0)])).unwrap();
        assert!(rec.contains("Rent"));
        assert!(rec.contains("100.0%"));
    }

    #[test]
    fn test_empty_and_zero_totals() {
        assert!(concentration_recommendation(&[]).is_none());
        assert!(concentration_recommendation(&totals(&[("Food", 0.0)])).is_none());
    }

    #[test]
    fn test_percentage_one_decimal() {
        let rec = concentration_recommendation(&totals(&[("Food", 2.0), ("Fun", 1.0)])).unwrap();
        assert!(rec.contains("66.7%"));
    }

    #[test]
    fn test_custom_threshold() {
        let data = totals(&[("Food", 400.0), ("Travel", 600.0)]);
        // The first entry is taken as the top category regardless of order
        assert!(concentration_recommendation_with_threshold(&data, 0.3).is_some());
        assert!(concentration_recommendation_with_threshold(&data, 0.5).is_none());
    }
}
