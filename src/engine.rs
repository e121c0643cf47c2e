//! Recommendation engine
//!
//! Maps a normalized user state onto an ordered plan of activities. The rules are a
//! two-branch decision tree:
//!
//! 1. **Safety gate** - at night, after short sleep or after poor sleep quality the
//!    plan is a single wind-down session and nothing else is considered.
//! 2. **Progressive accumulation** - breathing always comes first, then games gated
//!    behind increasingly strict thresholds, then an optional wind-down.
//!
//! [`decide`] produces the [`Decision`] on its own so the ordering can be inspected
//! without the rendered text.

use crate::types::{
    ActivityKind, ConfidenceLabel, DayOutlook, OutlookLabel, Recommendation,
    RecommendationResponse, TimeOfDay, UserState,
};
use tracing::debug;

/// Below this many hours of sleep the safety gate closes
pub const MIN_SLEEP_HOURS: f64 = 6.0;

/// Sleep quality at or below this closes the safety gate
pub const POOR_SLEEP_QUALITY: u8 = 2;

/// Hours of sleep needed before the optional wind-down is offered
pub const RESTED_SLEEP_HOURS: f64 = 7.0;

/// Explanation attached to safety-gate plans
pub const REST_EXPLANATION: &str = "Sleep and timing indicate rest is the priority";

/// Explanation attached to progressive plans
pub const PROGRESSIVE_EXPLANATION: &str =
    "Plan adapted using sleep, stress, energy, focus, and time of day.";

/// Activities the engine can suggest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Passive wind-down when rest is the priority
    RestWindDown,
    BodyScanBreathe,
    MemoryPattern,
    NumberFlow,
    /// Optional wind-down reminder on good days
    OptionalWindDown,
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        match self {
            Activity::MemoryPattern | Activity::NumberFlow => ActivityKind::Game,
            Activity::RestWindDown | Activity::BodyScanBreathe | Activity::OptionalWindDown => {
                ActivityKind::Meditation
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activity::RestWindDown | Activity::OptionalWindDown => "Sleep Wind-Down",
            Activity::BodyScanBreathe => "Body Scan & Breathe",
            Activity::MemoryPattern => "Memory Pattern",
            Activity::NumberFlow => "Number Flow",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Activity::RestWindDown => "A passive session to help the brain settle before rest.",
            Activity::BodyScanBreathe => "Grounding breath to prepare the nervous system.",
            Activity::MemoryPattern => "Gentle spatial recall to support working memory.",
            Activity::NumberFlow => "Calm sequencing exercise for executive attention.",
            Activity::OptionalWindDown => "Optional reminder to end the day calmly.",
        }
    }

    /// Session length in minutes for this state
    pub fn duration(&self, state: &UserState) -> u32 {
        match self {
            Activity::RestWindDown | Activity::OptionalWindDown => 10,
            Activity::BodyScanBreathe => {
                if state.stress_level <= 3 {
                    3
                } else {
                    7
                }
            }
            Activity::MemoryPattern | Activity::NumberFlow => 5,
        }
    }

    fn render(&self, state: &UserState) -> Recommendation {
        Recommendation {
            kind: self.kind(),
            name: self.name().to_string(),
            duration: self.duration(state),
            description: self.description().to_string(),
        }
    }
}

/// Why the safety gate closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestTrigger {
    Night,
    ShortSleep,
    PoorSleepQuality,
}

/// Outcome of evaluating the decision tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Safety gate closed; the plan is a single wind-down
    Rest(RestTrigger),
    /// Accumulated activities in priority order
    Progressive(Vec<Activity>),
}

/// A gated step of the progressive branch
struct Rule {
    activity: Activity,
    applies: fn(&UserState) -> bool,
}

/// Progressive rules in priority order
const PROGRESSIVE_RULES: [Rule; 4] = [
    Rule {
        activity: Activity::BodyScanBreathe,
        applies: |_| true,
    },
    Rule {
        activity: Activity::MemoryPattern,
        applies: |s| s.energy_level >= 3,
    },
    Rule {
        activity: Activity::NumberFlow,
        applies: |s| s.energy_level >= 4 && s.recent_focus_level >= 4 && s.stress_level <= 2,
    },
    Rule {
        activity: Activity::OptionalWindDown,
        applies: |s| {
            s.sleep_duration_hours >= RESTED_SLEEP_HOURS
                && s.sleep_quality >= 4
                && s.energy_level >= 4
                && s.stress_level <= 2
        },
    },
];

/// Check the safety gate, returning the first trigger that fires
pub fn rest_trigger(state: &UserState) -> Option<RestTrigger> {
    if state.time_of_day == TimeOfDay::Night {
        Some(RestTrigger::Night)
    } else if state.sleep_duration_hours < MIN_SLEEP_HOURS {
        Some(RestTrigger::ShortSleep)
    } else if state.sleep_quality <= POOR_SLEEP_QUALITY {
        Some(RestTrigger::PoorSleepQuality)
    } else {
        None
    }
}

/// Evaluate the decision tree for a state
pub fn decide(state: &UserState) -> Decision {
    if let Some(trigger) = rest_trigger(state) {
        debug!(?trigger, "safety gate closed");
        return Decision::Rest(trigger);
    }

    let activities: Vec<Activity> = PROGRESSIVE_RULES
        .iter()
        .filter(|rule| (rule.applies)(state))
        .map(|rule| rule.activity)
        .collect();
    debug!(?activities, "progressive plan");
    Decision::Progressive(activities)
}

/// Confidence label for a progressive plan
fn progressive_label(state: &UserState) -> ConfidenceLabel {
    if state.energy_level >= 4 && state.stress_level <= 2 {
        ConfidenceLabel::Active
    } else {
        ConfidenceLabel::Balanced
    }
}

/// Build the recommendation response for a normalized state
pub fn recommend(state: &UserState) -> RecommendationResponse {
    match decide(state) {
        Decision::Rest(_) => RecommendationResponse {
            recommendations: vec![Activity::RestWindDown.render(state)],
            explanation: REST_EXPLANATION.to_string(),
            confidence_label: ConfidenceLabel::Gentle,
        },
        Decision::Progressive(activities) => RecommendationResponse {
            recommendations: activities.iter().map(|a| a.render(state)).collect(),
            explanation: PROGRESSIVE_EXPLANATION.to_string(),
            confidence_label: progressive_label(state),
        },
    }
}

/// Frame the day as gentle, active or moderate
pub fn day_outlook(state: &UserState) -> DayOutlook {
    let (label, description) = if state.sleep_duration_hours < MIN_SLEEP_HOURS
        || state.sleep_quality <= POOR_SLEEP_QUALITY
        || state.stress_level >= 4
    {
        (
            OutlookLabel::GentleDay,
            "A calm, low-pressure day focused on regulation and rest.",
        )
    } else if state.energy_level >= 4
        && state.stress_level <= 2
        && state.sleep_duration_hours >= RESTED_SLEEP_HOURS
    {
        (
            OutlookLabel::ActiveDay,
            "You seem ready for focused cognitive activity today.",
        )
    } else {
        (
            OutlookLabel::ModerateDay,
            "A balanced day for light focus and gentle regulation.",
        )
    };

    DayOutlook {
        label,
        description: description.to_string(),
    }
}

/// Cap a requested session length to what today's state supports
///
/// Short sleep caps at 5 minutes, high stress at 4; otherwise sessions last at
/// least 2 minutes.
pub fn cap_session_minutes(state: &UserState, minutes: u32) -> u32 {
    if state.sleep_duration_hours < MIN_SLEEP_HOURS {
        minutes.min(5)
    } else if state.stress_level >= 4 {
        minutes.min(4)
    } else {
        minutes.max(2)
    }
}
