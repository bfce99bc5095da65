//! MET-based workout energy expenditure
//!
//! Calories burned = MET × body mass (kg) × duration (hours). The MET value is
//! looked up from an ordered keyword table: the first rule whose keyword is a
//! substring of the exercise name wins, so rule order decides ambiguous names
//! such as "running yoga class".

use crate::models::ExpenditureEvent;
use serde::{Deserialize, Serialize};

/// One classifier rule: any keyword matching the exercise name selects `met`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetRule {
    pub keywords: Vec<String>,
    pub met: f64,
}

impl MetRule {
    pub fn new(keywords: &[&str], met: f64) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            met,
        }
    }

    fn matches(&self, lowered_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_name.contains(&keyword.to_lowercase()))
    }
}

/// Immutable MET lookup table, injected wherever estimates are made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetTable {
    /// Name rules, checked in order
    pub rules: Vec<MetRule>,
    /// Category that selects `strength_met` when no name rule matched
    pub strength_category: String,
    pub strength_met: f64,
    /// MET for anything unclassified
    pub default_met: f64,
}

impl Default for MetTable {
    fn default() -> Self {
        Self {
            rules: vec![
                MetRule::new(&["run"], 11.0),
                MetRule::new(&["cycle", "bike"], 8.0),
                MetRule::new(&["swim"], 10.0),
                MetRule::new(&["walk"], 3.5),
                MetRule::new(&["yoga"], 2.5),
            ],
            strength_category: "strength".to_string(),
            strength_met: 5.0,
            default_met: 4.0,
        }
    }
}

impl MetTable {
    /// Classify an exercise into a MET value
    pub fn met_for(&self, exercise_name: &str, category: Option<&str>) -> f64 {
        let lowered = exercise_name.to_lowercase();

        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(&lowered)) {
            return rule.met;
        }

        match category {
            Some(c) if c.trim().eq_ignore_ascii_case(&self.strength_category) => self.strength_met,
            _ => self.default_met,
        }
    }

    /// Classify and estimate in one step
    pub fn estimate(
        &self,
        exercise_name: &str,
        category: Option<&str>,
        mass_kg: f64,
        duration_minutes: f64,
    ) -> i64 {
        estimate_calories(self.met_for(exercise_name, category), mass_kg, duration_minutes)
    }
}

/// Estimate calories burned: round(MET × mass × minutes / 60)
pub fn estimate_calories(met_value: f64, mass_kg: f64, duration_minutes: f64) -> i64 {
    (met_value * mass_kg * (duration_minutes / 60.0)).round() as i64
}

/// Fill in `calories_burned` for workouts that were logged without it
///
/// Only workouts with a positive duration are touched. Returns how many
/// events were backfilled.
pub fn backfill_missing_calories(
    events: &mut [ExpenditureEvent],
    table: &MetTable,
    mass_kg: f64,
) -> usize {
    let mut filled = 0;
    for event in events
        .iter_mut()
        .filter(|e| e.calories_burned.is_none() && e.duration_minutes > 0.0)
    {
        let estimate = table.estimate(
            &event.exercise_name,
            event.met_category.as_deref(),
            mass_kg,
            event.duration_minutes,
        );
        event.calories_burned = Some(estimate as f64);
        filled += 1;
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutStatus;
    use chrono::Utc;
    use proptest::prelude::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[test]
    fn test_estimate_example() {
        // 8.0 MET, 70kg, 30 minutes
        assert_eq!(estimate_calories(8.0, 70.0, 30.0), 280);
    }

    #[rstest]
    #[case("Morning Run", None, 11.0)]
    #[case("running yoga class", None, 11.0)]
    #[case("Spin cycle", None, 8.0)]
    #[case("Mountain BIKE", None, 8.0)]
    #[case("Open water swim", None, 10.0)]
    #[case("Dog walk", None, 3.5)]
    #[case("Hot yoga", None, 2.5)]
    #[case("Bench press", Some("Strength"), 5.0)]
    #[case("Bench press", Some("cardio"), 4.0)]
    #[case("Pilates", None, 4.0)]
    #[case("walking lunges", Some("strength"), 3.5)]
    fn test_default_classifier(
        #[case] name: &str,
        #[case] category: Option<&str>,
        #[case] expected: f64,
    ) {
        assert_eq!(MetTable::default().met_for(name, category), expected);
    }

    #[test]
    fn test_injected_table_overrides_defaults() {
        let table = MetTable {
            rules: vec![MetRule::new(&["yoga"], 3.0), MetRule::new(&["run"], 9.0)],
            ..MetTable::default()
        };
        // Rule order now favours yoga
        assert_eq!(table.met_for("running yoga class", None), 3.0);
        assert_eq!(MetTable::default().met_for("running yoga class", None), 11.0);
    }

    fn workout(name: &str, duration: f64, calories: Option<f64>) -> ExpenditureEvent {
        ExpenditureEvent {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            timestamp_utc: Utc::now(),
            exercise_name: name.to_string(),
            met_category: None,
            status: WorkoutStatus::Completed,
            duration_minutes: duration,
            calories_burned: calories,
        }
    }

    #[test]
    fn test_backfill_only_missing_with_duration() {
        let mut events = vec![
            workout("Evening run", 30.0, None),
            workout("Swim", 45.0, Some(123.0)),
            workout("Walk", 0.0, None),
        ];
        let filled = backfill_missing_calories(&mut events, &MetTable::default(), 70.0);

        assert_eq!(filled, 1);
        // 11 * 70 * 0.5 = 385
        assert_eq!(events[0].calories_burned, Some(385.0));
        assert_eq!(events[1].calories_burned, Some(123.0));
        assert_eq!(events[2].calories_burned, None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: doubling the duration doubles the estimate, up to rounding
        #[test]
        fn prop_estimate_scales_with_duration(
            met in 1.0f64..15.0,
            mass in 30.0f64..200.0,
            minutes in 1.0f64..240.0
        ) {
            let single = estimate_calories(met, mass, minutes);
            let double = estimate_calories(met, mass, 2.0 * minutes);
            prop_assert!((double - 2 * single).abs() <= 1);
        }

        /// Property: estimates are never negative for non-negative inputs
        #[test]
        fn prop_estimate_non_negative(
            met in 0.0f64..15.0,
            mass in 0.0f64..200.0,
            minutes in 0.0f64..600.0
        ) {
            prop_assert!(estimate_calories(met, mass, minutes) >= 0);
        }
    }
}
