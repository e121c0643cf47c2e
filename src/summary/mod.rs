//! Weekly and corporate summaries
//!
//! Reduces caller-supplied per-day or per-user records to means, a stress trend and
//! templated sentences. Missing or malformed fields are skipped and empty input yields
//! a canned response, so nothing here can fail.
//!
//! Pipeline: records → stats → summary / narrative

pub mod corporate;
pub mod types;
pub mod weekly;

pub use corporate::corporate_metrics;
pub use types::{
    CorporateMetrics, DayRecord, StressTrend, SummaryLabel, UserWeekRecord, WeeklyStats,
    WeeklySummary,
};
pub use weekly::{narrative, summarize_week, WeeklyAggregator};

/// Arithmetic mean, `None` for an empty slice
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, `None` for an empty slice
pub(crate) fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
