// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lifestyle analyzer running one full analysis request

use super::RecommendationEngine;
use crate::capabilities::{Capabilities, Capability};
use crate::logging::AppLogger;
use crate::models::{AiSuggestions, InputError, MetricsInput, RecommendationResult, UserMetrics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;
use uuid::Uuid;

/// Result of the prediction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Predicted { score: f64 },
    /// Prediction is disabled for this session
    Unavailable { reason: String },
    /// The artifact was loaded but the call failed
    Failed { error: String },
}

impl PredictionOutcome {
    pub fn score(&self) -> Option<f64> {
        match self {
            PredictionOutcome::Predicted { score } => Some(*score),
            _ => None,
        }
    }
}

/// Result of the AI suggestion step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SuggestionOutcome {
    Generated { suggestions: AiSuggestions },
    /// AI suggestions are disabled for this session
    Unavailable { reason: String },
    /// The remote call failed; everything else in the report is still valid
    Failed { error: String },
}

impl SuggestionOutcome {
    pub fn suggestions(&self) -> Option<&AiSuggestions> {
        match self {
            SuggestionOutcome::Generated { suggestions } => Some(suggestions),
            _ => None,
        }
    }
}

/// Everything produced for one analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub metrics: UserMetrics,
    pub prediction: PredictionOutcome,
    pub recommendations: RecommendationResult,
    pub suggestions: SuggestionOutcome,
}

/// Runs input normalization, prediction, rules and AI suggestions in order
pub struct LifestyleAnalyzer<'a> {
    capabilities: &'a Capabilities,
    engine: RecommendationEngine,
}

impl<'a> LifestyleAnalyzer<'a> {
    pub fn new(capabilities: &'a Capabilities, engine: RecommendationEngine) -> Self {
        Self {
            capabilities,
            engine,
        }
    }

    /// Analyze raw input.
    ///
    /// Invalid input blocks the analysis. Prediction and suggestion failures
    /// never do; they are reported in the returned [`AnalysisReport`].
    pub async fn analyze(&self, input: &MetricsInput) -> Result<AnalysisReport, InputError> {
        let metrics = input.normalize()?;
        Ok(self.analyze_metrics(metrics).await)
    }

    /// Analyze already validated metrics
    pub async fn analyze_metrics(&self, metrics: UserMetrics) -> AnalysisReport {
        let started = Instant::now();
        let id = Uuid::new_v4();

        let prediction = self.predict(&metrics);
        let recommendations = self.engine.evaluate(&metrics);
        // The prompt embeds the recommendations, so they must exist first
        let suggestions = self.suggest(&metrics, &recommendations).await;

        AppLogger::log_analysis(
            &id.to_string(),
            recommendations.recommendations.len(),
            prediction.score().is_some(),
            suggestions.suggestions().is_some(),
            started.elapsed().as_millis() as u64,
        );

        AnalysisReport {
            id,
            generated_at: Utc::now(),
            metrics,
            prediction,
            recommendations,
            suggestions,
        }
    }

    fn predict(&self, metrics: &UserMetrics) -> PredictionOutcome {
        match &self.capabilities.prediction {
            Capability::Available(adapter) => match adapter.predict(&metrics.encode()) {
                Ok(score) => PredictionOutcome::Predicted { score },
                Err(e) => {
                    warn!(error = %e, "Prediction failed");
                    PredictionOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            },
            Capability::Unavailable { reason } => PredictionOutcome::Unavailable {
                reason: reason.clone(),
            },
        }
    }

    async fn suggest(
        &self,
        metrics: &UserMetrics,
        recommendations: &RecommendationResult,
    ) -> SuggestionOutcome {
        let service = match &self.capabilities.suggestions {
            Capability::Available(service) => service,
            Capability::Unavailable { reason } => {
                return SuggestionOutcome::Unavailable {
                    reason: reason.clone(),
                }
            }
        };

        let started = Instant::now();
        let result = service.suggest(metrics, recommendations).await;
        AppLogger::log_ai_call(
            &service.generator_name(),
            &service.mode().to_string(),
            result.is_ok(),
            started.elapsed().as_millis() as u64,
        );

        match result {
            Ok(suggestions) => SuggestionOutcome::Generated { suggestions },
            Err(e) => SuggestionOutcome::Failed {
                error: e.to_string(),
            },
        }
    }
}
