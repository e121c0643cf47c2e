//! Core types for the Neulish engine
//!
//! This module defines the check-in input, the normalized user state and the
//! recommendation output that flow through the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Part of the day the check-in was made in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    #[default]
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }

    /// Parse a time-of-day label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "morning" => Some(TimeOfDay::Morning),
            "afternoon" => Some(TimeOfDay::Afternoon),
            "evening" => Some(TimeOfDay::Evening),
            "night" => Some(TimeOfDay::Night),
            _ => None,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw self-reported check-in as received from a client.
///
/// Every field is optional and loosely typed; sliders may arrive as numbers or
/// numeric strings. A JSON `null` is indistinguishable from an absent key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInput {
    /// Hours slept last night (clamped to 0-12)
    #[serde(default)]
    pub sleep_duration_hours: Option<Value>,
    /// Sleep quality slider (0-10)
    #[serde(default)]
    pub sleep_quality: Option<Value>,
    /// Stress slider (0-10)
    #[serde(default)]
    pub stress_level: Option<Value>,
    /// Energy slider (0-10)
    #[serde(default)]
    pub energy_level: Option<Value>,
    /// Recent focus slider (0-10)
    #[serde(default)]
    pub recent_focus_level: Option<Value>,
    /// morning | afternoon | evening | night
    #[serde(default)]
    pub time_of_day: Option<Value>,
}

/// Normalized user state consumed by the engine.
///
/// Scale fields are always in 1-5 and sleep hours always in 0-12.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    pub sleep_duration_hours: f64,
    pub sleep_quality: u8,
    pub stress_level: u8,
    pub energy_level: u8,
    pub recent_focus_level: u8,
    pub time_of_day: TimeOfDay,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            sleep_duration_hours: 7.0,
            sleep_quality: 3,
            stress_level: 3,
            energy_level: 3,
            recent_focus_level: 3,
            time_of_day: TimeOfDay::Afternoon,
        }
    }
}

/// Kind of suggested activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Meditation,
    Game,
}

/// A single suggested activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub name: String,
    /// Minutes
    pub duration: u32,
    pub description: String,
}

/// Coarse tag describing how favorable today's state is for activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    Gentle,
    Active,
    Balanced,
}

impl ConfidenceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::Gentle => "Gentle",
            ConfidenceLabel::Active => "Active",
            ConfidenceLabel::Balanced => "Balanced",
        }
    }
}

/// Ordered plan returned for one check-in.
///
/// Order is priority: regulation first, then cognitive games, then optional wind-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub explanation: String,
    pub confidence_label: ConfidenceLabel,
}

/// Day outlook labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlookLabel {
    #[serde(rename = "Gentle Day")]
    GentleDay,
    #[serde(rename = "Active Day")]
    ActiveDay,
    #[serde(rename = "Moderate Day")]
    ModerateDay,
}

/// Friendly framing of the day shown alongside a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOutlook {
    pub label: OutlookLabel,
    pub description: String,
}
