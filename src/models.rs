// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Core data structures shared by the rule engine, the prediction adapter and
//! the AI suggestion adapter. Every value here is request-scoped: built fresh for
//! one analysis and dropped once the report has been rendered.
//!
//! ## Core Models
//!
//! - [`MetricsInput`]: raw user input, body given as measurements or as a BMI
//! - [`UserMetrics`]: normalized, validated metrics
//! - [`ExerciseType`]: the four selectable exercise types
//! - [`EncodedFeatureVector`]: fixed-order numeric encoding for the model
//! - [`RecommendationResult`]: ordered recommendations plus the heuristic score
//! - [`AiSuggestions`]: search links or free advice from the text generator

use crate::constants::{input_ranges, messages, model::FEATURE_COUNT};
use crate::intelligence::bmi::calculate_bmi;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary physical exercise type selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Cardio,
    Yoga,
    Strength,
    Balanced,
}

impl ExerciseType {
    /// All selectable values, in form order
    pub const ALL: [ExerciseType; 4] = [
        ExerciseType::Cardio,
        ExerciseType::Yoga,
        ExerciseType::Strength,
        ExerciseType::Balanced,
    ];

    /// Label as shown to the user and embedded in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Cardio => "cardio",
            ExerciseType::Yoga => "yoga",
            ExerciseType::Strength => "strength",
            ExerciseType::Balanced => "balanced",
        }
    }

    /// Integer code the prediction artifact was trained with
    pub fn code(&self) -> u8 {
        match self {
            ExerciseType::Cardio => 0,
            ExerciseType::Yoga => 1,
            ExerciseType::Strength => 2,
            ExerciseType::Balanced => 3,
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cardio" => Ok(ExerciseType::Cardio),
            "yoga" => Ok(ExerciseType::Yoga),
            "strength" => Ok(ExerciseType::Strength),
            "balanced" => Ok(ExerciseType::Balanced),
            other => Err(InputError::UnknownExerciseType(other.to_string())),
        }
    }
}

/// Encode an exercise label for the model; labels other than the four exact
/// lowercase names encode as `0`
pub fn encode_exercise_label(label: &str) -> u8 {
    ExerciseType::ALL
        .iter()
        .find(|exercise| exercise.as_str() == label)
        .map(|exercise| exercise.code())
        .unwrap_or(0)
}

/// Errors raised while normalizing raw input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// BMI came out as the `0.0` sentinel (non-positive height)
    #[error("{}", messages::INVALID_HEIGHT)]
    BmiNotComputable,

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown exercise type '{0}'. Expected one of: cardio, yoga, strength, balanced")]
    UnknownExerciseType(String),
}

/// How the body dimension of the input was provided
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyInput {
    /// Weight and height; BMI is derived
    Measurements { weight_kg: f64, height_cm: f64 },
    /// BMI entered directly
    DirectBmi(f64),
}

/// Raw user input, before validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsInput {
    pub body: BodyInput,
    pub water_liters: f64,
    pub workout_days_per_week: u8,
    pub exercise_type: ExerciseType,
    pub meals_per_day: u8,
}

impl MetricsInput {
    /// Validate the raw input and derive BMI.
    ///
    /// A BMI equal to the `0.0` sentinel blocks the analysis before any range
    /// check, so a zero height is reported as such rather than as out of range.
    pub fn normalize(&self) -> Result<UserMetrics, InputError> {
        let (weight_kg, height_m, bmi) = match self.body {
            BodyInput::Measurements {
                weight_kg,
                height_cm,
            } => {
                let height_m = height_cm / 100.0;
                let bmi = calculate_bmi(weight_kg, height_m);
                if bmi == 0.0 {
                    return Err(InputError::BmiNotComputable);
                }
                check_range("weight_kg", weight_kg, input_ranges::WEIGHT_KG)?;
                check_range("height_cm", height_cm, input_ranges::HEIGHT_CM)?;
                (Some(weight_kg), Some(height_m), bmi)
            }
            BodyInput::DirectBmi(bmi) => {
                if bmi == 0.0 {
                    return Err(InputError::BmiNotComputable);
                }
                check_range("bmi", bmi, input_ranges::BMI)?;
                (None, None, bmi)
            }
        };

        check_range("water_liters", self.water_liters, input_ranges::WATER_LITERS)?;
        check_int_range(
            "workout_days_per_week",
            self.workout_days_per_week,
            input_ranges::WORKOUT_DAYS,
        )?;
        check_int_range("meals_per_day", self.meals_per_day, input_ranges::MEALS_PER_DAY)?;

        Ok(UserMetrics {
            weight_kg,
            height_m,
            bmi,
            water_liters: self.water_liters,
            workout_days_per_week: self.workout_days_per_week,
            exercise_type: self.exercise_type,
            meals_per_day: self.meals_per_day,
        })
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), InputError> {
    // NaN fails `contains` as well
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn check_int_range(field: &'static str, value: u8, (min, max): (u8, u8)) -> Result<(), InputError> {
    check_range(field, f64::from(value), (f64::from(min), f64::from(max)))
}

/// Normalized lifestyle metrics for one analysis
///
/// `weight_kg` and `height_m` are absent when the BMI was entered directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
    pub weight_kg: Option<f64>,
    pub height_m: Option<f64>,
    pub bmi: f64,
    pub water_liters: f64,
    pub workout_days_per_week: u8,
    pub exercise_type: ExerciseType,
    pub meals_per_day: u8,
}

impl UserMetrics {
    /// Build metrics directly from an already known BMI, without validation
    pub fn from_bmi(
        bmi: f64,
        water_liters: f64,
        workout_days_per_week: u8,
        exercise_type: ExerciseType,
        meals_per_day: u8,
    ) -> Self {
        Self {
            weight_kg: None,
            height_m: None,
            bmi,
            water_liters,
            workout_days_per_week,
            exercise_type,
            meals_per_day,
        }
    }

    /// Encode into the fixed-order vector consumed by the prediction artifact
    pub fn encode(&self) -> EncodedFeatureVector {
        EncodedFeatureVector([
            self.bmi,
            self.water_liters,
            f64::from(self.workout_days_per_week),
            f64::from(self.exercise_type.code()),
            f64::from(self.meals_per_day),
        ])
    }
}

/// `[bmi, water_liters, workout_days_per_week, exercise_code, meals_per_day]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatureVector(pub [f64; FEATURE_COUNT]);

impl EncodedFeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Which rule produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Bmi,
    Hydration,
    Workout,
    ExerciseVariety,
    Meals,
}

/// Whether a recommendation asks for a change or confirms a good habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Positive,
}

/// A single textual recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub kind: RecommendationKind,
    pub message: String,
}

/// Output of the rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// In rule evaluation order: BMI, hydration, workout, exercise variety, meals
    pub recommendations: Vec<Recommendation>,
    /// Rounded to 2 decimals
    pub heuristic_score: f64,
}

impl RecommendationResult {
    /// Message texts in order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.recommendations.iter().map(|r| r.message.as_str())
    }
}

/// A generated search query and its link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub query: String,
    pub url: String,
}

/// Suggestions returned by the text generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "content", rename_all = "snake_case")]
pub enum AiSuggestions {
    SearchQueries(Vec<SearchSuggestion>),
    Advice(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> MetricsInput {
        MetricsInput {
            body: BodyInput::Measurements {
                weight_kg: 70.0,
                height_cm: 175.0,
            },
            water_liters: 1.0,
            workout_days_per_week: 1,
            exercise_type: ExerciseType::Cardio,
            meals_per_day: 2,
        }
    }

    #[test]
    fn test_exercise_codes() {
        assert_eq!(ExerciseType::Cardio.code(), 0);
        assert_eq!(ExerciseType::Yoga.code(), 1);
        assert_eq!(ExerciseType::Strength.code(), 2);
        assert_eq!(ExerciseType::Balanced.code(), 3);
    }

    #[test]
    fn test_encode_exercise_label() {
        assert_eq!(encode_exercise_label("strength"), 2);
        assert_eq!(encode_exercise_label("balanced"), 3);
        assert_eq!(encode_exercise_label("Balanced"), 0);
        assert_eq!(encode_exercise_label("pilates"), 0);
        assert_eq!(encode_exercise_label(""), 0);
    }

    #[test]
    fn test_exercise_type_parse_and_serialize() {
        assert_eq!("yoga".parse::<ExerciseType>().unwrap(), ExerciseType::Yoga);
        assert!(matches!(
            "variety".parse::<ExerciseType>(),
            Err(InputError::UnknownExerciseType(label)) if label == "variety"
        ));
        assert_eq!(
            serde_json::to_string(&ExerciseType::Strength).unwrap(),
            "\"strength\""
        );
    }

    #[test]
    fn test_normalize_measurements() {
        let metrics = sample_input().normalize().unwrap();
        assert_eq!(metrics.weight_kg, Some(70.0));
        assert!((metrics.height_m.unwrap() - 1.75).abs() < 1e-12);
        assert!((metrics.bmi - 70.0 / (1.75 * 1.75)).abs() < 1e-9);
        assert_eq!(metrics.meals_per_day, 2);
    }

    #[test]
    fn test_normalize_direct_bmi() {
        let mut input = sample_input();
        input.body = BodyInput::DirectBmi(22.5);
        let metrics = input.normalize().unwrap();
        assert_eq!(metrics.bmi, 22.5);
        assert!(metrics.weight_kg.is_none());
        assert!(metrics.height_m.is_none());
    }

    #[test]
    fn test_zero_height_blocks_analysis() {
        let mut input = sample_input();
        input.body = BodyInput::Measurements {
            weight_kg: 70.0,
            height_cm: 0.0,
        };
        assert_eq!(input.normalize(), Err(InputError::BmiNotComputable));

        input.body = BodyInput::DirectBmi(0.0);
        assert_eq!(input.normalize(), Err(InputError::BmiNotComputable));
    }

    #[test]
    fn test_out_of_range_inputs() {
        let mut input = sample_input();
        input.water_liters = 5.5;
        assert!(matches!(
            input.normalize(),
            Err(InputError::OutOfRange { field: "water_liters", .. })
        ));

        let mut input = sample_input();
        input.workout_days_per_week = 8;
        assert!(matches!(
            input.normalize(),
            Err(InputError::OutOfRange { field: "workout_days_per_week", .. })
        ));

        let mut input = sample_input();
        input.meals_per_day = 0;
        assert!(input.normalize().is_err());

        let mut input = sample_input();
        input.body = BodyInput::DirectBmi(45.0);
        assert!(matches!(
            input.normalize(),
            Err(InputError::OutOfRange { field: "bmi", .. })
        ));

        let mut input = sample_input();
        input.water_liters = f64::NAN;
        assert!(input.normalize().is_err());
    }

    #[test]
    fn test_feature_vector_order() {
        let metrics = UserMetrics::from_bmi(22.5, 1.5, 4, ExerciseType::Strength, 3);
        assert_eq!(metrics.encode().as_slice(), &[22.5, 1.5, 4.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ai_suggestions_serialization() {
        let suggestions = AiSuggestions::Advice("Drink water".to_string());
        let json = serde_json::to_value(&suggestions).unwrap();
        assert_eq!(json["mode"], "advice");
        assert_eq!(json["content"], "Drink water");
    }
}
