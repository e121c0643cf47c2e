//! Corporate participation metrics

use crate::summary::types::{CorporateMetrics, UserWeekRecord};
use crate::summary::{mean, round_to};

/// Reduce per-user weekly records to organisation-level metrics.
///
/// Means are taken over users that report the field; the breathing-first share is
/// over all users. Values are rounded to two decimals. Empty input yields zeros.
pub fn corporate_metrics(users: &[UserWeekRecord]) -> CorporateMetrics {
    if users.is_empty() {
        return CorporateMetrics::default();
    }

    let sessions: Vec<f64> = users.iter().filter_map(|u| u.sessions).collect();
    let stress: Vec<f64> = users.iter().filter_map(|u| u.avg_stress).collect();
    let breathing_first = users
        .iter()
        .filter(|u| u.started_with_breathing == Some(true))
        .count();

    CorporateMetrics {
        active_users: users.len(),
        avg_sessions_per_user: round_to(mean(&sessions).unwrap_or(0.0), 2),
        avg_stress_level: round_to(mean(&stress).unwrap_or(0.0), 2),
        breathing_first_sessions_pct: round_to(breathing_first as f64 / users.len() as f64, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user(
        sessions: Option<f64>,
        stress: Option<f64>,
        breathing: Option<bool>,
    ) -> UserWeekRecord {
        UserWeekRecord {
            sessions,
            avg_stress: stress,
            started_with_breathing: breathing,
        }
    }

    #[test]
    fn test_empty_is_zeroed() {
        assert_eq!(corporate_metrics(&[]), CorporateMetrics::default());
    }

    #[test]
    fn test_metrics_match_hand_computed_values() {
        let users = vec![
            user(Some(4.0), Some(3.0), Some(true)),
            user(Some(2.0), Some(4.5), Some(false)),
            user(Some(5.0), Some(2.0), Some(true)),
        ];

        assert_eq!(
            corporate_metrics(&users),
            CorporateMetrics {
                active_users: 3,
                avg_sessions_per_user: 3.67,
                avg_stress_level: 3.17,
                breathing_first_sessions_pct: 0.67,
            }
        );
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let users = vec![
            user(Some(3.0), None, None),
            user(None, Some(5.0), Some(true)),
            user(Some(1.0), None, None),
            user(None, None, Some(false)),
        ];

        let metrics = corporate_metrics(&users);
        assert_eq!(metrics.active_users, 4);
        assert_eq!(metrics.avg_sessions_per_user, 2.0);
        assert_eq!(metrics.avg_stress_level, 5.0);
        assert_eq!(metrics.breathing_first_sessions_pct, 0.25);
    }
}
