//! Daily calorie target from profile data.
//!
//! Basal rate uses the Mifflin-St Jeor equation with the single `+5`
//! constant term, then scales by activity and goal:
//!
//! `round((10*weight + 6.25*height - 5*age + 5) * activity * goal)`

use std::fmt;

use serde::Serialize;

use crate::models::{ActivityLevel, Goal, Profile};

const WEIGHT_COEFFICIENT: f64 = 10.0;
const HEIGHT_COEFFICIENT: f64 = 6.25;
const AGE_COEFFICIENT: f64 = 5.0;
const CONSTANT_TERM: f64 = 5.0;

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Low => 1.2,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.9,
        }
    }
}

impl Goal {
    pub fn multiplier(self) -> f64 {
        match self {
            Goal::Lose => 0.85,
            Goal::Maintain => 1.0,
            Goal::Gain => 1.15,
        }
    }
}

/// Result of the estimator: either a target in kcal/day, or `Incomplete`
/// when a required profile field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CalorieEstimate {
    Target { kcal: i64 },
    Incomplete,
}

impl CalorieEstimate {
    pub fn kcal(self) -> Option<i64> {
        match self {
            CalorieEstimate::Target { kcal } => Some(kcal),
            CalorieEstimate::Incomplete => None,
        }
    }

    pub fn is_incomplete(self) -> bool {
        matches!(self, CalorieEstimate::Incomplete)
    }
}

impl fmt::Display for CalorieEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalorieEstimate::Target { kcal } => write!(f, "{kcal} kcal/day"),
            CalorieEstimate::Incomplete => f.write_str("incomplete"),
        }
    }
}

/// Coerce a raw form value to a number. Blank or unparsable input is `None`.
pub fn parse_measurement(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn basal_rate(weight_kg: f64, height_cm: f64, age: f64) -> f64 {
    WEIGHT_COEFFICIENT * weight_kg + HEIGHT_COEFFICIENT * height_cm - AGE_COEFFICIENT * age
        + CONSTANT_TERM
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Recommended daily calories, or `Incomplete` if weight, height or age is
/// absent or not a positive number. Values are not otherwise range-checked.
pub fn estimate_daily_calories(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    age: Option<f64>,
    activity: ActivityLevel,
    goal: Goal,
) -> CalorieEstimate {
    let (Some(weight), Some(height), Some(age)) =
        (positive(weight_kg), positive(height_cm), positive(age))
    else {
        return CalorieEstimate::Incomplete;
    };

    let bmr = basal_rate(weight, height, age);
    let kcal = (bmr * activity.multiplier() * goal.multiplier()).round() as i64;
    CalorieEstimate::Target { kcal }
}

impl Profile {
    pub fn calorie_target(&self) -> CalorieEstimate {
        estimate_daily_calories(
            parse_measurement(&self.weight_kg),
            parse_measurement(&self.height_cm),
            parse_measurement(&self.age),
            self.activity,
            self.goal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basal_rate() {
        // 700 + 1093.75 - 150 + 5
        assert!((basal_rate(70.0, 175.0, 30.0) - 1648.75).abs() < f64::EPSILON);
        // 700 + 1062.5 - 150 + 5
        assert!((basal_rate(70.0, 170.0, 30.0) - 1617.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_estimate_moderate_maintain() {
        // 1648.75 * 1.55 = 2555.5625
        let est = estimate_daily_calories(
            Some(70.0),
            Some(175.0),
            Some(30.0),
            ActivityLevel::Moderate,
            Goal::Maintain,
        );
        assert_eq!(est, CalorieEstimate::Target { kcal: 2556 });

        // 1617.5 * 1.55 = 2507.125
        let est = estimate_daily_calories(
            Some(70.0),
            Some(170.0),
            Some(30.0),
            ActivityLevel::Moderate,
            Goal::Maintain,
        );
        assert_eq!(est.kcal(), Some(2507));
    }

    #[test]
    fn test_estimate_goal_and_activity_multipliers() {
        let lose = estimate_daily_calories(
            Some(70.0),
            Some(175.0),
            Some(30.0),
            ActivityLevel::Low,
            Goal::Lose,
        );
        // 1648.75 * 1.2 * 0.85 = 1681.725
        assert_eq!(lose.kcal(), Some(1682));

        let gain = estimate_daily_calories(
            Some(70.0),
            Some(175.0),
            Some(30.0),
            ActivityLevel::High,
            Goal::Gain,
        );
        // 1648.75 * 1.9 * 1.15 = 3602.51875
        assert_eq!(gain.kcal(), Some(3603));
    }

    #[test]
    fn test_estimate_incomplete_when_field_missing() {
        let a = ActivityLevel::Moderate;
        let g = Goal::Maintain;
        assert!(estimate_daily_calories(None, Some(170.0), Some(30.0), a, g).is_incomplete());
        assert!(estimate_daily_calories(Some(70.0), None, Some(30.0), a, g).is_incomplete());
        assert!(estimate_daily_calories(Some(70.0), Some(170.0), None, a, g).is_incomplete());
    }

    #[test]
    fn test_estimate_incomplete_when_not_positive() {
        let a = ActivityLevel::Moderate;
        let g = Goal::Maintain;
        assert!(estimate_daily_calories(Some(0.0), Some(170.0), Some(30.0), a, g).is_incomplete());
        assert!(
            estimate_daily_calories(Some(70.0), Some(-1.0), Some(30.0), a, g).is_incomplete()
        );
        assert!(
            estimate_daily_calories(Some(70.0), Some(170.0), Some(f64::NAN), a, g).is_incomplete()
        );
    }

    #[test]
    fn test_estimate_does_not_clamp_absurd_values() {
        // 10*20 + 6.25*100 - 5*200 + 5 = -170, scaled by 1.2
        let est = estimate_daily_calories(
            Some(20.0),
            Some(100.0),
            Some(200.0),
            ActivityLevel::Low,
            Goal::Maintain,
        );
        assert_eq!(est.kcal(), Some(-204));
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("70"), Some(70.0));
        assert_eq!(parse_measurement(" 72.5 "), Some(72.5));
        assert_eq!(parse_measurement(""), None);
        assert_eq!(parse_measurement("   "), None);
        assert_eq!(parse_measurement("seventy"), None);
        assert_eq!(parse_measurement("inf"), None);
        // Sign is kept; positivity is the estimator's call
        assert_eq!(parse_measurement("-5"), Some(-5.0));
    }

    #[test]
    fn test_profile_calorie_target() {
        let mut profile = Profile::default();
        assert!(profile.calorie_target().is_incomplete());

        profile.weight_kg = "70".to_string();
        profile.height_cm = " 175 ".to_string();
        assert!(profile.calorie_target().is_incomplete());

        profile.age = "30".to_string();
        assert_eq!(profile.calorie_target().kcal(), Some(2556));

        // Raw text stays as typed; only the estimate treats it as missing
        profile.age = "thirty".to_string();
        assert!(profile.calorie_target().is_incomplete());
        assert_eq!(profile.age, "thirty");
        profile.age = "30".to_string();

        profile.goal = Goal::Lose;
        // 2555.5625 * 0.85 = 2172.228125
        assert_eq!(profile.calorie_target().kcal(), Some(2172));
    }

    #[test]
    fn test_estimate_display_and_json() {
        assert_eq!(CalorieEstimate::Target { kcal: 2000 }.to_string(), "2000 kcal/day");
        assert_eq!(CalorieEstimate::Incomplete.to_string(), "incomplete");
        assert_eq!(
            serde_json::to_value(CalorieEstimate::Target { kcal: 2000 }).unwrap(),
            serde_json::json!({"status": "target", "kcal": 2000})
        );
        assert_eq!(
            serde_json::to_value(CalorieEstimate::Incomplete).unwrap(),
            serde_json::json!({"status": "incomplete"})
        );
    }
}
