//! Insight Engine - heuristic spending insights
//!
//! Derives non-persisted insights from a period's expenses and aggregates.
//! Each analyzer is a pure function over data the caller already fetched.
//!
//! ## Insight Types
//!
//! - **Next-month forecast** - First-difference extrapolation of monthly totals
//! - **Concentration** - Recommendation when one category dominates spending
//! - **Anomalies** - Expenses larger than twice the period average
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.analyze(&expenses, &category_totals, &monthly_totals);
//! ```

pub mod anomalies;
pub mod concentration;
pub mod engine;
pub mod forecast;

pub use anomalies::{detect_anomalies, detect_anomalies_with_multiplier, ANOMALY_MULTIPLIER};
pub use concentration::{
    concentration_recommendation, concentration_recommendation_with_threshold,
    CONCENTRATION_THRESHOLD,
};
pub use engine::InsightEngine;
pub use forecast::predict_next_month;
