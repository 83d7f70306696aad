// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Intelligence Module
//!
//! Lifestyle analysis: BMI computation, the rule-based recommendation engine
//! with its heuristic score, and the analyzer that combines them with the
//! optional prediction and AI suggestion capabilities.

pub mod analyzer;
pub mod bmi;
pub mod recommendation_engine;

pub use analyzer::{AnalysisReport, LifestyleAnalyzer, PredictionOutcome, SuggestionOutcome};
pub use bmi::{calculate_bmi, BmiCategory};
pub use recommendation_engine::{heuristic_score, RecommendationEngine};
