// libs/reporting-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// REPORT QUERY MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Week => write!(f, "week"),
            Granularity::Month => write!(f, "month"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub granularity: Option<Granularity>,
}

// ==============================================================================
// REPORT RESPONSE MODELS
// ==============================================================================

/// One aggregate bucket as returned by the platform store. The charts
/// render these as-is; nothing downstream recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportPoint {
    pub period_start: DateTime<Utc>,
    pub count: i64,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub sales: Vec<ReportPoint>,
    pub bids: Vec<ReportPoint>,
    pub customers: Vec<ReportPoint>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReportError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Platform store error: {0}")]
    PlatformError(String),
}
