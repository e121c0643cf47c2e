//! Input normalization
//!
//! This module turns loosely-typed check-in values into the canonical user state.
//! - 0-10 sliders are mapped onto a 1-5 scale
//! - Sleep hours are clamped to 0-12
//! - Anything that cannot be read as a number falls back to a safe value
//!
//! None of these functions fail.

use crate::types::{TimeOfDay, UserInput, UserState};
use serde_json::Value;
use tracing::warn;

/// Default hours of sleep when the check-in omits it
pub const DEFAULT_SLEEP_HOURS: f64 = 7.0;

/// Default raw slider position when the check-in omits it
pub const DEFAULT_SLIDER: f64 = 5.0;

/// Scale value used when a slider cannot be read
pub const SCALE_MIDPOINT: u8 = 3;

/// Upper bound for reported sleep hours
pub const MAX_SLEEP_HOURS: f64 = 12.0;

/// Read a JSON value as a number.
///
/// Numbers, numeric strings and booleans (as 1/0) are accepted. Non-finite strings
/// such as `"nan"` and `"inf"` parse; callers decide what they mean.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Coerce `value` to a number and restrict it to `[min, max]`.
///
/// Returns `min` when the value cannot be read as a number or is NaN.
pub fn clamp(value: &Value, min: f64, max: f64) -> f64 {
    match coerce_f64(value) {
        Some(n) if !n.is_nan() => n.clamp(min, max),
        _ => min,
    }
}

/// Map a 0-10 slider onto the 1-5 scale.
///
/// Formula: `round((clamp(v, 0, 10) / 10) * 4 + 1)` with ties rounded to even.
/// Returns the midpoint (3) when the value cannot be read as a number. NaN clamps
/// to 0 and so maps to 1.
pub fn normalize_10_to_5(value: &Value) -> u8 {
    match coerce_f64(value) {
        Some(n) => scale_10_to_5(n),
        None => SCALE_MIDPOINT,
    }
}

/// Map an already-numeric 0-10 slider onto the 1-5 scale
pub fn scale_10_to_5(value: f64) -> u8 {
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 10.0)
    };
    ((clamped / 10.0) * 4.0 + 1.0).round_ties_even() as u8
}

/// Normalizer for converting a raw check-in into a user state
pub struct Normalizer;

impl Normalizer {
    /// Normalize a raw check-in, substituting defaults for absent fields
    pub fn normalize(input: &UserInput) -> UserState {
        let sleep_duration_hours = match &input.sleep_duration_hours {
            Some(value) => {
                if coerce_f64(value).filter(|n| !n.is_nan()).is_none() {
                    warn!(?value, "unreadable sleep_duration_hours, using 0");
                }
                clamp(value, 0.0, MAX_SLEEP_HOURS)
            }
            None => DEFAULT_SLEEP_HOURS,
        };

        UserState {
            sleep_duration_hours,
            sleep_quality: normalize_slider("sleep_quality", input.sleep_quality.as_ref()),
            stress_level: normalize_slider("stress_level", input.stress_level.as_ref()),
            energy_level: normalize_slider("energy_level", input.energy_level.as_ref()),
            recent_focus_level: normalize_slider(
                "recent_focus_level",
                input.recent_focus_level.as_ref(),
            ),
            time_of_day: normalize_time_of_day(input.time_of_day.as_ref()),
        }
    }
}

fn normalize_slider(field: &str, value: Option<&Value>) -> u8 {
    match value {
        Some(value) => {
            if coerce_f64(value).is_none() {
                warn!(field, ?value, "unreadable slider, using midpoint");
            }
            normalize_10_to_5(value)
        }
        None => scale_10_to_5(DEFAULT_SLIDER),
    }
}

fn normalize_time_of_day(value: Option<&Value>) -> TimeOfDay {
    let Some(value) = value else {
        return TimeOfDay::default();
    };
    match value.as_str().and_then(TimeOfDay::parse) {
        Some(tod) => tod,
        None => {
            warn!(?value, "unrecognised time_of_day, using afternoon");
            TimeOfDay::default()
        }
    }
}
