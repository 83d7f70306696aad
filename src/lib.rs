// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Lifestyle Advisor
//!
//! Personal lifestyle analysis from a handful of daily metrics: body
//! measurements (or a BMI), water intake, workout frequency, exercise type and
//! meal frequency.
//!
//! ## Features
//!
//! - **Rule engine**: deterministic, ordered recommendations plus a heuristic score
//! - **Score prediction**: optional pre-trained regression model loaded from JSON
//! - **AI suggestions**: optional YouTube search links or motivational tips from Google Gemini
//! - **Graceful degradation**: missing model or API key disables only that feature
//!
//! ## Architecture
//!
//! - **Models**: input, normalized metrics, recommendations and suggestions
//! - **Intelligence**: BMI, rule engine and the analyzer pipeline
//! - **Prediction**: model artifact loading and invocation
//! - **Suggestions**: prompts, the Gemini client and reply parsing
//! - **Capabilities**: optional features resolved once at startup
//! - **Config**: environment variables and TOML thresholds
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use lifestyle_advisor::capabilities::Capabilities;
//! use lifestyle_advisor::config::AppConfig;
//! use lifestyle_advisor::intelligence::{LifestyleAnalyzer, RecommendationEngine};
//! use lifestyle_advisor::models::{BodyInput, ExerciseType, MetricsInput};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let capabilities = Capabilities::resolve(&config)?;
//!     let analyzer = LifestyleAnalyzer::new(&capabilities, RecommendationEngine::new());
//!
//!     let input = MetricsInput {
//!         body: BodyInput::Measurements { weight_kg: 70.0, height_cm: 175.0 },
//!         water_liters: 1.0,
//!         workout_days_per_week: 1,
//!         exercise_type: ExerciseType::Cardio,
//!         meals_per_day: 2,
//!     };
//!     let report = analyzer.analyze(&input).await?;
//!     println!("{}", lifestyle_advisor::render::render_report(&report));
//!
//!     Ok(())
//! }
//! ```

/// Optional features resolved once per session
pub mod capabilities;

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// BMI, rule engine and analysis pipeline
pub mod intelligence;

/// Production logging configuration
pub mod logging;

/// Common data models
pub mod models;

/// Lifestyle score prediction
pub mod prediction;

/// Text and JSON output
pub mod render;

/// AI-generated suggestions
pub mod suggestions;
