//! Deployment settings read from the environment
//!
//! - `TALLY_BUDGET_LIMIT`: monthly budget threshold (default 5000)
//! - `TALLY_SYNC_URL`: webhook receiving expense events (unset disables sync)
//! - `TALLY_SYNC_TIMEOUT_SECS`: webhook request timeout (default 10)

use std::time::Duration;

use tracing::warn;

use crate::models::DEFAULT_BUDGET_LIMIT;

pub const BUDGET_LIMIT_ENV: &str = "TALLY_BUDGET_LIMIT";
pub const SYNC_URL_ENV: &str = "TALLY_SYNC_URL";
pub const SYNC_TIMEOUT_ENV: &str = "TALLY_SYNC_TIMEOUT_SECS";

const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 10;

/// Budget threshold from `TALLY_BUDGET_LIMIT`, or the default
///
/// Values that are not positive numbers are ignored with a warning.
pub fn budget_limit_from_env() -> f64 {
    parse_budget_limit(std::env::var(BUDGET_LIMIT_ENV).ok().as_deref())
}

fn parse_budget_limit(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_BUDGET_LIMIT;
    };

    match raw.parse::<f64>() {
        Ok(limit) if limit.is_finite() && limit > 0.0 => limit,
        _ => {
            warn!(
                "{}={} is not a positive number, using {}",
                BUDGET_LIMIT_ENV, raw, DEFAULT_BUDGET_LIMIT
            );
            DEFAULT_BUDGET_LIMIT
        }
    }
}

/// Webhook sync settings
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub url: String,
    pub timeout: Duration,
}

impl SyncConfig {
    /// Parse configuration from environment variables
    ///
    /// Returns None if sync is not configured (`TALLY_SYNC_URL` not set)
    pub fn from_env() -> Option<Self> {
        Self::parse(
            std::env::var(SYNC_URL_ENV).ok().as_deref(),
            std::env::var(SYNC_TIMEOUT_ENV).ok().as_deref(),
        )
    }

    fn parse(url: Option<&str>, timeout_secs: Option<&str>) -> Option<Self> {
        let url = url.map(str::trim).filter(|s| !s.is_empty())?;

        let timeout_secs = timeout_secs
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_SYNC_TIMEOUT_SECS);

        Some(Self {
            url: url.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
