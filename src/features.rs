//! Check-in feature preprocessing
//!
//! Converts a batch of loosely-typed check-in records into fixed-width feature
//! vectors. A feature that no record in the batch mentions takes its default; a
//! feature that some records mention is zero-filled where it is missing or cannot be
//! read. Categorical answers are mapped onto numbers:
//! - `journal_sentiment`: negative/neutral/positive → -1/0/1
//! - `emotional_intensity`: low/medium/high → 1/2/3

use crate::normalizer::coerce_f64;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Feature names in vector order, with their batch-level defaults
pub const FEATURE_DEFAULTS: [(&str, f64); 9] = [
    ("energy_level", 3.0),
    ("stress_level", 3.0),
    ("mood_score", 3.0),
    ("sleep_duration_hours", 7.0),
    ("sleep_quality", 3.0),
    ("journal_sentiment", 0.0),
    ("emotional_intensity", 2.0),
    ("numbers_tap_accuracy", 0.7),
    ("memory_grid_accuracy", 0.7),
];

/// Fixed feature vector for one check-in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub energy_level: f64,
    pub stress_level: f64,
    pub mood_score: f64,
    pub sleep_duration_hours: f64,
    pub sleep_quality: f64,
    pub journal_sentiment: f64,
    pub emotional_intensity: f64,
    pub numbers_tap_accuracy: f64,
    pub memory_grid_accuracy: f64,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::from_array(FEATURE_DEFAULTS.map(|(_, default)| default))
    }
}

impl FeatureVector {
    fn from_array(values: [f64; 9]) -> Self {
        Self {
            energy_level: values[0],
            stress_level: values[1],
            mood_score: values[2],
            sleep_duration_hours: values[3],
            sleep_quality: values[4],
            journal_sentiment: values[5],
            emotional_intensity: values[6],
            numbers_tap_accuracy: values[7],
            memory_grid_accuracy: values[8],
        }
    }

    /// Values in [`FEATURE_DEFAULTS`] order
    pub fn to_array(&self) -> [f64; 9] {
        [
            self.energy_level,
            self.stress_level,
            self.mood_score,
            self.sleep_duration_hours,
            self.sleep_quality,
            self.journal_sentiment,
            self.emotional_intensity,
            self.numbers_tap_accuracy,
            self.memory_grid_accuracy,
        ]
    }
}

/// Read one feature from a record, `None` when absent or unreadable
fn read_feature(name: &str, value: &Value) -> Option<f64> {
    match name {
        "journal_sentiment" => match value.as_str()?.trim().to_ascii_lowercase().as_str() {
            "negative" => Some(-1.0),
            "neutral" => Some(0.0),
            "positive" => Some(1.0),
            _ => None,
        },
        "emotional_intensity" => match value.as_str()?.trim().to_ascii_lowercase().as_str() {
            "low" => Some(1.0),
            "medium" => Some(2.0),
            "high" => Some(3.0),
            _ => None,
        },
        _ => coerce_f64(value).filter(|n| n.is_finite()),
    }
}

/// Preprocess a batch of check-in records into feature vectors
pub fn preprocess(records: &[Map<String, Value>]) -> Vec<FeatureVector> {
    let present: [bool; 9] =
        FEATURE_DEFAULTS.map(|(name, _)| records.iter().any(|r| r.contains_key(name)));

    records
        .iter()
        .map(|record| {
            let mut values = [0.0; 9];
            for (i, (name, default)) in FEATURE_DEFAULTS.iter().enumerate() {
                values[i] = if present[i] {
                    record
                        .get(*name)
                        .and_then(|v| read_feature(name, v))
                        .unwrap_or(0.0)
                } else {
                    *default
                };
            }
            FeatureVector::from_array(values)
        })
        .collect()
}
