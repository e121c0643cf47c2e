//! JSON boundary
//!
//! String-in, string-out entry points used by the CLI and the FFI layer. Only a
//! syntactically broken payload or the wrong top-level shape is an error; individual
//! fields degrade to defaults and unreadable array items are skipped.

use crate::engine::{cap_session_minutes, day_outlook, recommend};
use crate::error::EngineError;
use crate::features::{preprocess, FeatureVector};
use crate::normalizer::Normalizer;
use crate::summary::{
    corporate_metrics, narrative, CorporateMetrics, DayRecord, UserWeekRecord, WeeklyAggregator,
    WeeklyStats, WeeklySummary,
};
use crate::types::{DayOutlook, RecommendationResponse, UserInput};
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Service liveness report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Report that the engine is available
pub fn health() -> HealthStatus {
    HealthStatus {
        status: "ok".to_string(),
        service: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
    }
}

/// Normalize a raw check-in and build its plan
pub fn recommend_input(input: &UserInput) -> RecommendationResponse {
    recommend(&Normalizer::normalize(input))
}

/// Parse a check-in object
pub fn parse_user_input(json: &str) -> Result<UserInput, EngineError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(EngineError::InvalidPayload(
            "check-in must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse a JSON array of records, skipping items that are not objects
pub fn parse_records<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, EngineError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(EngineError::InvalidPayload(
            "expected a JSON array of records".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!(index, "skipping record that is not an object");
            continue;
        }
        match serde_json::from_value(item) {
            Ok(record) => records.push(record),
            Err(e) => warn!(index, error = %e, "skipping unreadable record"),
        }
    }
    Ok(records)
}

/// Check-in JSON → recommendation JSON
pub fn recommend_json(json: &str) -> Result<String, EngineError> {
    let input = parse_user_input(json)?;
    to_json(&recommend_input(&input))
}

/// Check-in JSON → day outlook
pub fn outlook(json: &str) -> Result<DayOutlook, EngineError> {
    let input = parse_user_input(json)?;
    Ok(day_outlook(&Normalizer::normalize(&input)))
}

/// Check-in JSON and a requested length → capped session length in minutes
pub fn session_minutes(json: &str, requested: u32) -> Result<u32, EngineError> {
    let input = parse_user_input(json)?;
    Ok(cap_session_minutes(&Normalizer::normalize(&input), requested))
}

/// Day records JSON → weekly summary
pub fn weekly_summary(json: &str) -> Result<WeeklySummary, EngineError> {
    let days: Vec<DayRecord> = parse_records(json)?;
    Ok(WeeklyAggregator::new().summarize(&days))
}

/// Day records JSON → weekly summary JSON
pub fn weekly_summary_json(json: &str) -> Result<String, EngineError> {
    to_json(&weekly_summary(json)?)
}

/// Day records JSON → weekly stats
pub fn weekly_stats(
    json: &str,
    aggregator: &WeeklyAggregator,
) -> Result<WeeklyStats, EngineError> {
    let days: Vec<DayRecord> = parse_records(json)?;
    Ok(aggregator.stats(&days))
}

/// Weekly stats JSON → narrative paragraph
pub fn narrative_from_stats(json: &str) -> Result<String, EngineError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(EngineError::InvalidPayload(
            "weekly stats must be a JSON object".to_string(),
        ));
    }
    let stats: WeeklyStats = serde_json::from_value(value)?;
    Ok(narrative(&stats))
}

/// User week records JSON → corporate metrics
pub fn corporate(json: &str) -> Result<CorporateMetrics, EngineError> {
    let users: Vec<UserWeekRecord> = parse_records(json)?;
    Ok(corporate_metrics(&users))
}

/// User week records JSON → corporate metrics JSON
pub fn corporate_metrics_json(json: &str) -> Result<String, EngineError> {
    to_json(&corporate(json)?)
}

/// Check-in records JSON → feature vectors
pub fn features(json: &str) -> Result<Vec<FeatureVector>, EngineError> {
    let records: Vec<Map<String, Value>> = parse_records(json)?;
    Ok(preprocess(&records))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, EngineError> {
    serde_json::to_string(value).map_err(|e| EngineError::EncodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{StressTrend, SummaryLabel};
    use crate::types::{ConfidenceLabel, OutlookLabel};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recommend_json_good_day() {
        let out = recommend_json(
            r#"{
                "sleep_duration_hours": 8,
                "sleep_quality": 9,
                "stress_level": 2,
                "energy_level": 9,
                "recent_focus_level": 8,
                "time_of_day": "afternoon"
            }"#,
        )
        .unwrap();
        let response: RecommendationResponse = serde_json::from_str(&out).unwrap();

        let names: Vec<&str> = response.recommendations.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Body Scan & Breathe", "Memory Pattern", "Number Flow", "Sleep Wind-Down"]
        );
        assert_eq!(response.confidence_label, ConfidenceLabel::Active);
    }

    #[test]
    fn test_recommend_json_night() {
        let out = recommend_json(r#"{"time_of_day": "night", "energy_level": 10}"#).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 1);
        assert_eq!(value["recommendations"][0]["type"], "meditation");
        assert_eq!(value["recommendations"][0]["duration"], 10);
        assert_eq!(value["confidence_label"], "Gentle");
    }

    #[test]
    fn test_recommend_json_empty_object_uses_defaults() {
        let out = recommend_json("{}").unwrap();
        let response: RecommendationResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(response.recommendations.len(), 2);
        assert_eq!(response.confidence_label, ConfidenceLabel::Balanced);
    }

    #[test]
    fn test_recommend_json_rejects_malformed() {
        assert!(matches!(recommend_json("not json"), Err(EngineError::JsonError(_))));
        assert!(matches!(recommend_json("[1, 2]"), Err(EngineError::InvalidPayload(_))));
    }

    #[test]
    fn test_outlook_and_session() {
        let checkin = r#"{"sleep_duration_hours": 5, "stress_level": 1}"#;
        assert_eq!(outlook(checkin).unwrap().label, OutlookLabel::GentleDay);
        assert_eq!(session_minutes(checkin, 12).unwrap(), 5);
    }

    #[test]
    fn test_weekly_summary_skips_non_objects() {
        let summary = weekly_summary(
            r#"[
                {"sleep_duration": 7, "stress": 2},
                "garbage",
                {"sleep_duration_hours": 7.4, "stress_level": 3}
            ]"#,
        )
        .unwrap();
        assert_eq!(summary.summary[0], "You averaged about 7.2 hours of sleep.");
        assert_eq!(summary.confidence_label, SummaryLabel::Steady);
    }

    #[test]
    fn test_weekly_summary_empty_array() {
        let out = weekly_summary_json("[]").unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["summary"][0], "No data this week.");
        assert_eq!(value["confidence_label"], "Neutral");
        assert!(value.get("suggestion").is_none());
    }

    #[test]
    fn test_weekly_summary_rejects_object() {
        assert!(matches!(weekly_summary("{}"), Err(EngineError::InvalidPayload(_))));
    }

    #[test]
    fn test_weekly_stats_and_narrative() {
        let stats = weekly_stats(
            r#"[
                {"date": "2024-01-17", "sleep_duration": 7.5, "stress": 2,
                 "completed_session": true},
                {"date": "2024-01-15", "sleep_duration": 7.0, "stress": 6,
                 "completed_session": true},
                {"date": "2024-01-16", "sleep_duration": 8.0, "stress": 5,
                 "completed_session": true},
                {"date": "2024-01-18", "sleep_duration": 7.5, "stress": 2,
                 "completed_session": false}
            ]"#,
            &WeeklyAggregator::new(),
        )
        .unwrap();
        assert_eq!(stats.stress_trend, StressTrend::Down);
        assert_eq!(stats.completion_rate, 0.75);

        let text = narrative_from_stats(&serde_json::to_string(&stats).unwrap()).unwrap();
        assert!(text.contains("You appeared calmer as the week progressed."));
        assert!(text.contains("showed up regularly"));
    }

    #[test]
    fn test_weekly_stats_keeps_records_with_both_spellings() {
        let stats = weekly_stats(
            r#"[
                {"sleep_duration": 7, "sleep_duration_hours": 7, "stress": 2,
                 "completed_session": true},
                {"sleep_duration": 8, "stress": 3, "stress_level": 9,
                 "completed_session": true}
            ]"#,
            &WeeklyAggregator::new(),
        )
        .unwrap();

        assert_eq!(stats.days, 2);
        assert_eq!(stats.avg_sleep, Some(7.5));
        assert_eq!(stats.avg_stress, Some(2.5));
        assert_eq!(stats.completion_rate, 1.0);
    }

    #[test]
    fn test_narrative_from_partial_stats() {
        let text = narrative_from_stats(r#"{"avg_sleep": 7.5}"#).unwrap();
        assert!(text.starts_with("Your sleep was fairly consistent this week"));
        assert!(narrative_from_stats("[]").is_err());
    }

    #[test]
    fn test_corporate_metrics_json() {
        let out = corporate_metrics_json(
            r#"[
                {"sessions": 3, "avg_stress": 2, "started_with_breathing": true},
                {"sessions": 5, "avg_stress": 4, "started_with_breathing": false}
            ]"#,
        )
        .unwrap();
        let metrics: CorporateMetrics = serde_json::from_str(&out).unwrap();
        assert_eq!(
            metrics,
            CorporateMetrics {
                active_users: 2,
                avg_sessions_per_user: 4.0,
                avg_stress_level: 3.0,
                breathing_first_sessions_pct: 0.5,
            }
        );
    }

    #[test]
    fn test_features() {
        let vectors = features(r#"[{"energy_level": 4, "journal_sentiment": "neutral"}]"#).unwrap();
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].energy_level, 4.0);
        assert_eq!(vectors[0].mood_score, 3.0);
    }

    #[test]
    fn test_health() {
        let status = health();
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, PRODUCER_NAME);
        assert_eq!(status.version, ENGINE_VERSION);
    }
}
