// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Application constants: environment variable names, defaults, rule thresholds,
//! accepted input ranges and the fixed contract of the prediction artifact.

/// Environment variable names read by [`crate::config::environment::AppConfig`]
pub mod env_vars {
    /// Credential for the Gemini text-generation API
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    pub const GEMINI_API_BASE: &str = "GEMINI_API_BASE";
    pub const AI_TIMEOUT_SECONDS: &str = "AI_TIMEOUT_SECONDS";
    /// `search` or `advice`
    pub const SUGGESTION_MODE: &str = "SUGGESTION_MODE";
    pub const MODEL_PATH: &str = "LIFESTYLE_MODEL_PATH";
    pub const LIFESTYLE_CONFIG_PATH: &str = "LIFESTYLE_CONFIG_PATH";
    pub const LOG_LEVEL: &str = "RUST_LOG";
}

/// Default values used when nothing is configured
pub mod defaults {
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
    pub const AI_TIMEOUT_SECONDS: u64 = 30;
    pub const SUGGESTION_MODE: &str = "search";

    /// Model artifact looked up in the working directory
    pub const MODEL_PATH: &str = "lifestyle_model.json";

    /// Threshold config file looked up in the working directory
    pub const LIFESTYLE_CONFIG_FILE: &str = "lifestyle_config.toml";

    /// Directory under the user config dir holding the threshold config
    pub const CONFIG_DIR_NAME: &str = "lifestyle-advisor";

    pub const SERVICE_NAME: &str = "lifestyle-advisor";
    pub const LOG_LEVEL: &str = "info";

    /// Form defaults
    pub const WEIGHT_KG: f64 = 70.0;
    pub const HEIGHT_CM: f64 = 175.0;
    pub const WATER_LITERS: f64 = 1.0;
    pub const WORKOUT_DAYS: u8 = 1;
    pub const MEALS_PER_DAY: u8 = 2;
}

/// Default rule thresholds and heuristic score weights
pub mod thresholds {
    /// BMI strictly below this is underweight
    pub const UNDERWEIGHT_BMI: f64 = 18.5;
    /// BMI strictly above this is overweight
    pub const OVERWEIGHT_BMI: f64 = 25.0;
    pub const MIN_WATER_LITERS: f64 = 2.5;
    pub const MIN_WORKOUT_DAYS: u8 = 3;
    pub const MIN_MEALS_PER_DAY: u8 = 3;

    pub const SCORE_BMI_DIVISOR: f64 = 10.0;
    pub const SCORE_WATER_WEIGHT: f64 = 1.0;
    pub const SCORE_WORKOUT_WEIGHT: f64 = 0.5;
    pub const SCORE_MEALS_WEIGHT: f64 = 0.8;

    /// Exercise labels that satisfy the variety rule. `variety` is not a
    /// selectable [`crate::models::ExerciseType`].
    pub const VARIETY_LABELS: [&str; 2] = ["balanced", "variety"];
}

/// Inclusive ranges accepted from the input surface
pub mod input_ranges {
    pub const WEIGHT_KG: (f64, f64) = (30.0, 200.0);
    pub const HEIGHT_CM: (f64, f64) = (100.0, 250.0);
    pub const BMI: (f64, f64) = (10.0, 40.0);
    pub const WATER_LITERS: (f64, f64) = (0.0, 5.0);
    pub const WORKOUT_DAYS: (u8, u8) = (0, 7);
    pub const MEALS_PER_DAY: (u8, u8) = (1, 6);
}

/// Prediction artifact contract
pub mod model {
    /// Length of the encoded feature vector
    pub const FEATURE_COUNT: usize = 5;

    /// Feature order the artifact was trained on
    pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
        "bmi",
        "water_liters",
        "workout_days_per_week",
        "exercise_code",
        "meals_per_day",
    ];

    pub const MODEL_TYPE_LINEAR: &str = "linear_regression";
}

/// External URLs
pub mod endpoints {
    /// Search page the generated queries are linked to
    pub const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results";
    pub const YOUTUBE_QUERY_PARAM: &str = "search_query";

    /// Gemini REST API version segment
    pub const GEMINI_API_VERSION: &str = "v1beta";
    pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";
}

/// User-facing messages
pub mod messages {
    pub const INVALID_HEIGHT: &str =
        "Please enter a valid height to calculate BMI and run the analysis.";
    pub const AI_KEY_MISSING: &str =
        "GEMINI_API_KEY not found. AI-powered tips will be unavailable.";
    pub const AI_KEY_HINT: &str =
        "For local development, create a '.env' file containing GEMINI_API_KEY.";
    pub const AI_DISABLED_BY_FLAG: &str = "AI suggestions disabled for this run.";
    pub const MODEL_HINT: &str =
        "Place 'lifestyle_model.json' in the working directory or set LIFESTYLE_MODEL_PATH.";
}
