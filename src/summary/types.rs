//! Summary data types
//!
//! Input records are deliberately lenient: numeric fields accept numbers or numeric
//! strings, flags accept booleans, 0/1 or yes/no style strings, and anything else is
//! read as missing rather than rejecting the record.

use crate::normalizer::coerce_f64;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One day of a user's week
///
/// Sleep and stress may also arrive as `sleep_duration_hours` and `stress_level`.
/// When both spellings are present the short one wins if it is readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDayRecord")]
pub struct DayRecord {
    /// Calendar day, used to order records for trend detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Hours slept
    pub sleep_duration: Option<f64>,
    /// Reported stress (0-10)
    pub stress: Option<f64>,
    /// Whether a session was completed that day
    pub completed_session: Option<bool>,
}

/// Wire form of [`DayRecord`] with both field spellings kept apart
#[derive(Deserialize)]
struct RawDayRecord {
    #[serde(default, deserialize_with = "lenient_date")]
    date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sleep_duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    sleep_duration_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    stress: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    stress_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    completed_session: Option<bool>,
}

impl From<RawDayRecord> for DayRecord {
    fn from(raw: RawDayRecord) -> Self {
        DayRecord {
            date: raw.date,
            sleep_duration: raw.sleep_duration.or(raw.sleep_duration_hours),
            stress: raw.stress.or(raw.stress_level),
            completed_session: raw.completed_session,
        }
    }
}

/// One user's week, as reported to the corporate dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserWeekRecord {
    /// Sessions completed this week
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sessions: Option<f64>,
    /// Mean stress over the week
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_stress: Option<f64>,
    /// Whether the user opened sessions with breathing
    #[serde(default, deserialize_with = "lenient_bool")]
    pub started_with_breathing: Option<bool>,
}

/// Direction stress moved across the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressTrend {
    Up,
    Down,
    #[default]
    Steady,
}

/// Label attached to a weekly summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryLabel {
    /// No data to summarize
    Neutral,
    Steady,
}

/// Numeric reduction of a week of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Number of records
    #[serde(default)]
    pub days: usize,
    /// Mean hours of sleep over records that report it
    #[serde(default)]
    pub avg_sleep: Option<f64>,
    /// Population standard deviation of sleep hours
    #[serde(default)]
    pub sleep_std_dev: Option<f64>,
    /// Mean stress over records that report it
    #[serde(default)]
    pub avg_stress: Option<f64>,
    #[serde(default)]
    pub stress_trend: StressTrend,
    /// Completed records / all records (0-1)
    #[serde(default)]
    pub completion_rate: f64,
}

/// Human-readable weekly summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week: String,
    pub tone: String,
    pub summary: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub confidence_label: SummaryLabel,
}

/// Organisation-level participation metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorporateMetrics {
    pub active_users: usize,
    pub avg_sessions_per_user: f64,
    pub avg_stress_level: f64,
    /// Share of users who opened with breathing (0-1)
    pub breathing_first_sessions_pct: f64,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(coerce_f64)
        .filter(|n| n.is_finite()))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_day_record_aliases_and_leniency() {
        let record: DayRecord = serde_json::from_value(json!({
            "date": "2024-01-15T08:00:00Z",
            "sleep_duration_hours": "7.5",
            "stress_level": "unknown",
            "completed_session": "yes"
        }))
        .unwrap();

        assert_eq!(
            record,
            DayRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 15),
                sleep_duration: Some(7.5),
                stress: None,
                completed_session: Some(true),
            }
        );
    }

    #[test]
    fn test_day_record_with_both_spellings() {
        let record: DayRecord = serde_json::from_value(json!({
            "sleep_duration": 7,
            "sleep_duration_hours": 6,
            "stress": "n/a",
            "stress_level": 4,
            "completed_session": true
        }))
        .unwrap();

        assert_eq!(
            record,
            DayRecord {
                date: None,
                sleep_duration: Some(7.0),
                stress: Some(4.0),
                completed_session: Some(true),
            }
        );
    }

    #[test]
    fn test_day_record_nulls_and_bad_dates() {
        let record: DayRecord = serde_json::from_value(json!({
            "date": "last tuesday",
            "sleep_duration": null,
            "stress": 3
        }))
        .unwrap();

        assert_eq!(record.date, None);
        assert_eq!(record.sleep_duration, None);
        assert_eq!(record.stress, Some(3.0));
        assert_eq!(record.completed_session, None);
    }

    #[test]
    fn test_user_week_record_flags() {
        let record: UserWeekRecord = serde_json::from_value(json!({
            "sessions": 4,
            "avg_stress": 2.5,
            "started_with_breathing": 0
        }))
        .unwrap();
        assert_eq!(record.started_with_breathing, Some(false));
        assert_eq!(record.sessions, Some(4.0));
    }

    #[test]
    fn test_stress_trend_serialization() {
        assert_eq!(serde_json::to_string(&StressTrend::Down).unwrap(), "\"down\"");
    }
}
