// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Optional features resolved once at startup
//!
//! Prediction and AI suggestions can each be unavailable for the whole session
//! (missing artifact, missing API key, client initialization failure). The
//! outcome is captured here and passed by reference to the analyzer instead of
//! being re-checked per request.

use crate::config::{AiConfig, AppConfig, ModelConfig};
use crate::constants::messages;
use crate::logging::AppLogger;
use crate::prediction::PredictionAdapter;
use crate::suggestions::{GeminiClient, SuggestionError, SuggestionService};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Availability of one capability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityStatus {
    Available,
    Unavailable,
}

/// Overall session status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Every optional capability is usable
    Full,
    /// At least one optional capability is disabled
    Degraded,
}

/// An optional capability and the reason it is missing
#[derive(Debug)]
pub enum Capability<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Capability::Available(_) => None,
            Capability::Unavailable { reason } => Some(reason),
        }
    }

    pub fn status(&self) -> CapabilityStatus {
        if self.is_available() {
            CapabilityStatus::Available
        } else {
            CapabilityStatus::Unavailable
        }
    }
}

/// Status line for one capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityReport {
    /// Capability name
    pub name: String,
    pub status: CapabilityStatus,
    /// Status description
    pub message: String,
    /// How to enable the capability, when unavailable
    pub hint: Option<String>,
}

/// Capabilities of this session
#[derive(Debug)]
pub struct Capabilities {
    pub prediction: Capability<PredictionAdapter>,
    pub suggestions: Capability<SuggestionService>,
}

impl Capabilities {
    pub fn new(
        prediction: Capability<PredictionAdapter>,
        suggestions: Capability<SuggestionService>,
    ) -> Self {
        Self {
            prediction,
            suggestions,
        }
    }

    /// Resolve all capabilities from configuration.
    ///
    /// Only a required model that fails to load is an error; everything else
    /// degrades to [`Capability::Unavailable`].
    pub fn resolve(config: &AppConfig) -> Result<Self> {
        let prediction = Self::resolve_prediction(&config.model)?;
        let suggestions = Self::resolve_suggestions(&config.ai);
        Ok(Self::new(prediction, suggestions))
    }

    /// Load the model artifact
    pub fn resolve_prediction(config: &ModelConfig) -> Result<Capability<PredictionAdapter>> {
        match PredictionAdapter::load(&config.path) {
            Ok(adapter) => {
                AppLogger::log_capability("prediction", true, &adapter.describe());
                Ok(Capability::Available(adapter))
            }
            Err(e) if config.required => {
                Err(e).with_context(|| format!("Prediction model is required: {}", config.path.display()))
            }
            Err(e) => {
                let reason = e.to_string();
                AppLogger::log_capability("prediction", false, &reason);
                Ok(Capability::unavailable(reason))
            }
        }
    }

    /// Build the AI suggestion service; never fails
    pub fn resolve_suggestions(config: &AiConfig) -> Capability<SuggestionService> {
        if !config.enabled {
            AppLogger::log_capability("ai_suggestions", false, messages::AI_DISABLED_BY_FLAG);
            return Capability::unavailable(messages::AI_DISABLED_BY_FLAG);
        }

        match GeminiClient::from_config(config) {
            Ok(client) => {
                let service = SuggestionService::new(Box::new(client), config.mode);
                AppLogger::log_capability("ai_suggestions", true, &service.generator_name());
                Capability::Available(service)
            }
            Err(SuggestionError::MissingCredential) => {
                AppLogger::log_capability("ai_suggestions", false, messages::AI_KEY_MISSING);
                Capability::unavailable(messages::AI_KEY_MISSING)
            }
            Err(e) => {
                let reason = format!("Could not initialize Gemini AI ({e}). AI-powered tips will be unavailable.");
                AppLogger::log_capability("ai_suggestions", false, &reason);
                Capability::unavailable(reason)
            }
        }
    }

    pub fn session_status(&self) -> SessionStatus {
        if self.prediction.is_available() && self.suggestions.is_available() {
            SessionStatus::Full
        } else {
            SessionStatus::Degraded
        }
    }

    /// One status line per capability, for visible warnings
    pub fn report(&self) -> Vec<CapabilityReport> {
        vec![
            CapabilityReport {
                name: "prediction".to_string(),
                status: self.prediction.status(),
                message: match &self.prediction {
                    Capability::Available(adapter) => format!("Model loaded: {}", adapter.describe()),
                    Capability::Unavailable { reason } => reason.clone(),
                },
                hint: (!self.prediction.is_available()).then(|| messages::MODEL_HINT.to_string()),
            },
            CapabilityReport {
                name: "ai_suggestions".to_string(),
                status: self.suggestions.status(),
                message: match &self.suggestions {
                    Capability::Available(service) => format!(
                        "AI suggestions via {} ({} mode)",
                        service.generator_name(),
                        service.mode()
                    ),
                    Capability::Unavailable { reason } => reason.clone(),
                },
                hint: self
                    .suggestions
                    .unavailable_reason()
                    .filter(|reason| *reason == messages::AI_KEY_MISSING)
                    .map(|_| messages::AI_KEY_HINT.to_string()),
            },
        ]
    }
}
