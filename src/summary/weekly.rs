//! Weekly summary and narrative
//!
//! Computes [`WeeklyStats`] from a week of [`DayRecord`]s and renders them as the
//! short, gentle sentences shown in the weekly recap.

use crate::summary::types::{DayRecord, StressTrend, SummaryLabel, WeeklyStats, WeeklySummary};
use crate::summary::{mean, std_dev};
use tracing::debug;

/// Default difference between half-week stress means before a trend is reported
pub const DEFAULT_TREND_TOLERANCE: f64 = 0.5;

/// Sleep standard deviation (hours) under which the schedule counts as consistent
const CONSISTENT_SLEEP_STD_DEV: f64 = 1.0;

/// Mean stress under which the week counts as manageable
const MANAGEABLE_STRESS: f64 = 4.0;

/// Mean sleep at or above which the narrative calls sleep consistent
const RESTED_AVG_SLEEP: f64 = 7.0;

/// Completion rate at or above which the narrative praises showing up
const REGULAR_COMPLETION_RATE: f64 = 0.7;

const WEEK_LABEL: &str = "last 7 days";
const TONE: &str = "gentle";

/// Aggregator for a week of day records
#[derive(Debug, Clone, Copy)]
pub struct WeeklyAggregator {
    trend_tolerance: f64,
}

impl Default for WeeklyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl WeeklyAggregator {
    /// Create an aggregator with the default trend tolerance (0.5)
    pub fn new() -> Self {
        Self {
            trend_tolerance: DEFAULT_TREND_TOLERANCE,
        }
    }

    /// Create an aggregator with a specific trend tolerance
    pub fn with_trend_tolerance(tolerance: f64) -> Self {
        Self {
            trend_tolerance: tolerance.max(0.0),
        }
    }

    /// Reduce a week of records to numeric stats
    pub fn stats(&self, days: &[DayRecord]) -> WeeklyStats {
        let ordered = chronological(days);

        let sleep: Vec<f64> = ordered.iter().filter_map(|d| d.sleep_duration).collect();
        let stress: Vec<f64> = ordered.iter().filter_map(|d| d.stress).collect();
        let completed = ordered
            .iter()
            .filter(|d| d.completed_session == Some(true))
            .count();

        let completion_rate = if ordered.is_empty() {
            0.0
        } else {
            completed as f64 / ordered.len() as f64
        };

        WeeklyStats {
            days: ordered.len(),
            avg_sleep: mean(&sleep),
            sleep_std_dev: std_dev(&sleep),
            avg_stress: mean(&stress),
            stress_trend: self.stress_trend(&stress),
            completion_rate,
        }
    }

    /// Render the weekly summary for a set of records
    pub fn summarize(&self, days: &[DayRecord]) -> WeeklySummary {
        if days.is_empty() {
            return WeeklySummary {
                week: WEEK_LABEL.to_string(),
                tone: TONE.to_string(),
                summary: vec!["No data this week.".to_string()],
                suggestion: None,
                confidence_label: SummaryLabel::Neutral,
            };
        }

        let stats = self.stats(days);
        debug!(?stats, "weekly stats");
        let mut summary = Vec::new();

        if let Some(avg_sleep) = stats.avg_sleep {
            summary.push(format!("You averaged about {avg_sleep:.1} hours of sleep."));
            if stats
                .sleep_std_dev
                .is_some_and(|sd| sd < CONSISTENT_SLEEP_STD_DEV)
            {
                summary.push("Your sleep schedule was fairly consistent.".to_string());
            }
        }

        match stats.avg_stress {
            Some(avg) if avg < MANAGEABLE_STRESS => {
                summary.push("Stress levels were generally manageable this week.".to_string())
            }
            Some(_) => summary.push("Some days felt more demanding than others.".to_string()),
            None => {}
        }

        summary.push("Consistency mattered more than session length this week.".to_string());

        WeeklySummary {
            week: WEEK_LABEL.to_string(),
            tone: TONE.to_string(),
            summary,
            suggestion: Some("Next week, keep sessions short on busy days.".to_string()),
            confidence_label: SummaryLabel::Steady,
        }
    }

    /// Compare the mean of the first half of the week against the second half
    fn stress_trend(&self, stress: &[f64]) -> StressTrend {
        if stress.len() < 2 {
            return StressTrend::Steady;
        }
        let (first, second) = stress.split_at(stress.len() / 2);
        let (Some(early), Some(late)) = (mean(first), mean(second)) else {
            return StressTrend::Steady;
        };

        let delta = late - early;
        if delta > self.trend_tolerance {
            StressTrend::Up
        } else if delta < -self.trend_tolerance {
            StressTrend::Down
        } else {
            StressTrend::Steady
        }
    }
}

/// Order records by date when every record carries one, otherwise keep input order
fn chronological(days: &[DayRecord]) -> Vec<&DayRecord> {
    let mut ordered: Vec<&DayRecord> = days.iter().collect();
    if ordered.iter().all(|d| d.date.is_some()) {
        ordered.sort_by_key(|d| d.date);
    }
    ordered
}

/// Summarize a week of records with default settings
pub fn summarize_week(days: &[DayRecord]) -> WeeklySummary {
    WeeklyAggregator::new().summarize(days)
}

/// Render weekly stats as a short paragraph
pub fn narrative(stats: &WeeklyStats) -> String {
    let mut sentences: Vec<&str> = Vec::new();

    if stats.avg_sleep.is_some_and(|s| s >= RESTED_AVG_SLEEP) {
        sentences.push(
            "Your sleep was fairly consistent this week, \
             which supports focus and emotional balance.",
        );
    } else {
        sentences.push(
            "Sleep was a bit shorter this week. Gentle sessions seemed especially helpful.",
        );
    }

    match stats.stress_trend {
        StressTrend::Down => sentences.push("You appeared calmer as the week progressed."),
        StressTrend::Up => sentences.push(
            "Stress felt higher toward the end of the week. Slower sessions may help next week.",
        ),
        StressTrend::Steady => {}
    }

    if stats.completion_rate >= REGULAR_COMPLETION_RATE {
        sentences.push("Consistency mattered more than duration \u{2014} you showed up regularly.");
    }

    sentences.push("There\u{2019}s no need to push. Small, steady steps are working.");
    sentences.join(" ")
}
