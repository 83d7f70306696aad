// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rule-based lifestyle recommendation engine

use super::bmi::BmiCategory;
use crate::config::{LifestyleConfig, ScoreWeights};
use crate::constants::thresholds::VARIETY_LABELS;
use crate::models::{
    Recommendation, RecommendationCategory, RecommendationKind, RecommendationResult, UserMetrics,
};

/// Heuristic lifestyle score, rounded to 2 decimals.
///
/// `bmi/10 + water + workout*0.5 + meals*0.8` with the default weights. It is
/// displayed next to the model prediction and never combined with it.
pub fn heuristic_score(metrics: &UserMetrics, weights: &ScoreWeights) -> f64 {
    let score = metrics.bmi / weights.bmi_divisor
        + metrics.water_liters * weights.water
        + f64::from(metrics.workout_days_per_week) * weights.workout
        + f64::from(metrics.meals_per_day) * weights.meals;
    round_to_cents(score)
}

/// Round to 2 decimals from the exact stored value; scaling by 100 first
/// would push 5.00499999... up to 5.01
fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Deterministic rule engine.
///
/// Rules run in a fixed order (BMI, hydration, workout, exercise variety,
/// meals) and each appends at most one message. Input ranges are not
/// re-validated here.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: LifestyleConfig,
}

impl RecommendationEngine {
    /// Create an engine with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom thresholds and weights
    pub fn with_config(config: LifestyleConfig) -> Self {
        Self { config }
    }

    /// Evaluate all rules against the metrics
    pub fn evaluate(&self, metrics: &UserMetrics) -> RecommendationResult {
        let recommendations = [
            Some(self.bmi_rule(metrics)),
            Some(self.hydration_rule(metrics)),
            Some(self.workout_rule(metrics)),
            self.variety_rule(metrics),
            self.meals_rule(metrics),
        ]
        .into_iter()
        .flatten()
        .collect();

        RecommendationResult {
            recommendations,
            heuristic_score: heuristic_score(metrics, &self.config.score_weights),
        }
    }

    fn bmi_rule(&self, metrics: &UserMetrics) -> Recommendation {
        let bmi = metrics.bmi;
        match BmiCategory::from_bmi(bmi, &self.config.thresholds) {
            BmiCategory::Underweight => warning(
                RecommendationCategory::Bmi,
                format!(
                    "🍽️ BMI ({bmi:.1}) is underweight. Increase calorie intake with balanced protein meals."
                ),
            ),
            BmiCategory::Overweight => warning(
                RecommendationCategory::Bmi,
                format!("⚖️ BMI ({bmi:.1}) is overweight. Try a calorie deficit and regular exercise."),
            ),
            BmiCategory::Balanced => positive(
                RecommendationCategory::Bmi,
                format!("✅ Maintain your current diet, your BMI ({bmi:.1}) is balanced."),
            ),
        }
    }

    fn hydration_rule(&self, metrics: &UserMetrics) -> Recommendation {
        let minimum = self.config.thresholds.min_water_liters;
        if metrics.water_liters < minimum {
            warning(
                RecommendationCategory::Hydration,
                format!(
                    "💧 Water intake ({:.1}L) is low. Increase to at least {minimum} liters daily.",
                    metrics.water_liters
                ),
            )
        } else {
            positive(
                RecommendationCategory::Hydration,
                "💦 Good hydration level maintained!".to_string(),
            )
        }
    }

    fn workout_rule(&self, metrics: &UserMetrics) -> Recommendation {
        let minimum = self.config.thresholds.min_workout_days;
        if metrics.workout_days_per_week < minimum {
            warning(
                RecommendationCategory::Workout,
                format!(
                    "🚶 Workout frequency ({} days) is low. Start exercising at least {minimum} times a week.",
                    metrics.workout_days_per_week
                ),
            )
        } else {
            positive(
                RecommendationCategory::Workout,
                "🏋️ Keep up your regular workouts!".to_string(),
            )
        }
    }

    fn variety_rule(&self, metrics: &UserMetrics) -> Option<Recommendation> {
        let label = metrics.exercise_type.as_str();
        if VARIETY_LABELS.contains(&label) {
            return None;
        }
        Some(warning(
            RecommendationCategory::ExerciseVariety,
            format!("🧘 Your routine is focused on {label}. Add variety (cardio, flexibility, strength)."),
        ))
    }

    fn meals_rule(&self, metrics: &UserMetrics) -> Option<Recommendation> {
        let minimum = self.config.thresholds.min_meals_per_day;
        if metrics.meals_per_day >= minimum {
            return None;
        }
        Some(warning(
            RecommendationCategory::Meals,
            format!(
                "🍎 Eating {} meals/day. Increase to at least {minimum} balanced meals to stabilize metabolism.",
                metrics.meals_per_day
            ),
        ))
    }
}

fn warning(category: RecommendationCategory, message: String) -> Recommendation {
    Recommendation {
        category,
        kind: RecommendationKind::Warning,
        message,
    }
}

fn positive(category: RecommendationCategory, message: String) -> Recommendation {
    Recommendation {
        category,
        kind: RecommendationKind::Positive,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseType;

    fn metrics(bmi: f64, water: f64, workout: u8, exercise: ExerciseType, meals: u8) -> UserMetrics {
        UserMetrics::from_bmi(bmi, water, workout, exercise, meals)
    }

    fn categories(result: &RecommendationResult) -> Vec<RecommendationCategory> {
        result.recommendations.iter().map(|r| r.category).collect()
    }

    #[test]
    fn test_heuristic_score_example() {
        let m = metrics(22.5, 1.0, 1, ExerciseType::Cardio, 2);
        let score = heuristic_score(&m, &ScoreWeights::default());
        assert!((score - 5.35).abs() < 1e-9);
    }

    #[test]
    fn test_heuristic_score_is_rounded() {
        let m = metrics(70.0 / (1.75 * 1.75), 1.0, 1, ExerciseType::Cardio, 2);
        let score = heuristic_score(&m, &ScoreWeights::default());
        // 2.2857... + 1.0 + 0.5 + 1.6
        assert!((score - 5.39).abs() < 1e-9);
    }

    #[test]
    fn test_heuristic_score_rounds_stored_value() {
        // Sum is 5.00499999999999989..., below the half-cent
        let m = metrics(10.05, 0.0, 0, ExerciseType::Cardio, 5);
        let score = heuristic_score(&m, &ScoreWeights::default());
        assert_eq!(score, 5.0);

        let m = metrics(22.5, 1.0, 1, ExerciseType::Cardio, 2);
        assert_eq!(heuristic_score(&m, &ScoreWeights::default()), 5.35);
    }

    #[test]
    fn test_bmi_tier_exactly_one_message() {
        let engine = RecommendationEngine::new();
        for (bmi, expected) in [
            (15.0, "underweight"),
            (18.4, "underweight"),
            (18.5, "balanced"),
            (22.0, "balanced"),
            (25.0, "balanced"),
            (25.1, "overweight"),
            (35.0, "overweight"),
        ] {
            let result = engine.evaluate(&metrics(bmi, 3.0, 4, ExerciseType::Balanced, 3));
            let bmi_messages: Vec<_> = result
                .recommendations
                .iter()
                .filter(|r| r.category == RecommendationCategory::Bmi)
                .collect();
            assert_eq!(bmi_messages.len(), 1, "bmi {bmi}");
            assert_eq!(result.recommendations[0].category, RecommendationCategory::Bmi);
            assert!(
                bmi_messages[0].message.contains(expected),
                "bmi {bmi}: {}",
                bmi_messages[0].message
            );
        }
    }

    #[test]
    fn test_thresholds_are_strict() {
        let engine = RecommendationEngine::new();

        let at_threshold = engine.evaluate(&metrics(22.0, 2.5, 3, ExerciseType::Balanced, 3));
        assert!(at_threshold
            .recommendations
            .iter()
            .all(|r| r.kind == RecommendationKind::Positive));
        assert_eq!(
            categories(&at_threshold),
            vec![
                RecommendationCategory::Bmi,
                RecommendationCategory::Hydration,
                RecommendationCategory::Workout,
            ]
        );

        let below = engine.evaluate(&metrics(22.0, 2.4, 2, ExerciseType::Balanced, 3));
        assert_eq!(below.recommendations[1].kind, RecommendationKind::Warning);
        assert!(below.recommendations[1].message.contains("2.4L"));
        assert_eq!(below.recommendations[2].kind, RecommendationKind::Warning);
        assert!(below.recommendations[2].message.contains("2 days"));
    }

    #[test]
    fn test_variety_rule() {
        let engine = RecommendationEngine::new();
        for exercise in [ExerciseType::Cardio, ExerciseType::Yoga, ExerciseType::Strength] {
            let result = engine.evaluate(&metrics(22.0, 3.0, 4, exercise, 3));
            let variety = result
                .recommendations
                .iter()
                .find(|r| r.category == RecommendationCategory::ExerciseVariety)
                .expect("variety message");
            assert!(variety.message.contains(exercise.as_str()));
        }

        let balanced = engine.evaluate(&metrics(22.0, 3.0, 4, ExerciseType::Balanced, 3));
        assert!(!categories(&balanced).contains(&RecommendationCategory::ExerciseVariety));
    }

    #[test]
    fn test_meals_rule_has_no_positive_message() {
        let engine = RecommendationEngine::new();
        let low = engine.evaluate(&metrics(22.0, 3.0, 4, ExerciseType::Balanced, 2));
        let last = low.recommendations.last().unwrap();
        assert_eq!(last.category, RecommendationCategory::Meals);
        assert!(last.message.contains("Eating 2 meals/day"));
        assert!(last.message.contains("at least 3 balanced meals"));

        let enough = engine.evaluate(&metrics(22.0, 3.0, 4, ExerciseType::Balanced, 3));
        assert!(!categories(&enough).contains(&RecommendationCategory::Meals));
    }

    #[test]
    fn test_full_warning_order() {
        let engine = RecommendationEngine::new();
        let result = engine.evaluate(&metrics(30.0, 1.0, 1, ExerciseType::Cardio, 2));
        assert_eq!(
            categories(&result),
            vec![
                RecommendationCategory::Bmi,
                RecommendationCategory::Hydration,
                RecommendationCategory::Workout,
                RecommendationCategory::ExerciseVariety,
                RecommendationCategory::Meals,
            ]
        );
        assert!(result.messages().next().unwrap().contains("BMI (30.0) is overweight"));
    }

    #[test]
    fn test_custom_thresholds() {
        let mut config = LifestyleConfig::default();
        config.thresholds.min_water_liters = 3.0;
        let engine = RecommendationEngine::with_config(config);

        let result = engine.evaluate(&metrics(22.0, 2.8, 4, ExerciseType::Balanced, 3));
        assert_eq!(result.recommendations[1].kind, RecommendationKind::Warning);
        assert!(result.recommendations[1].message.contains("at least 3 liters"));
    }

    #[test]
    fn test_messages_interpolate_values_and_thresholds() {
        let mut config = LifestyleConfig::default();
        config.thresholds.min_meals_per_day = 4;
        let engine = RecommendationEngine::with_config(config);

        let result = engine.evaluate(&metrics(22.0, 1.0, 4, ExerciseType::Balanced, 3));
        assert!(result.recommendations[1].message.contains("Water intake (1.0L)"));
        let meals = result.recommendations.last().unwrap();
        assert_eq!(meals.category, RecommendationCategory::Meals);
        assert!(meals.message.contains("Eating 3 meals/day"));
        assert!(meals.message.contains("at least 4 balanced meals"));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let engine = RecommendationEngine::new();
        let m = metrics(17.0, 0.5, 0, ExerciseType::Yoga, 1);
        assert_eq!(engine.evaluate(&m), engine.evaluate(&m));
    }
}
