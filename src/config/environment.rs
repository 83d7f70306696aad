// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration: model artifact location and AI service settings

use crate::constants::{defaults, env_vars};
use crate::suggestions::SuggestionMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level
    pub log_level: String,
    /// Prediction artifact configuration
    pub model: ModelConfig,
    /// Text-generation service configuration
    pub ai: AiConfig,
    /// Explicit path of the threshold config file
    pub lifestyle_config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path of the JSON model artifact
    pub path: PathBuf,
    /// Treat a load failure as fatal instead of disabling prediction
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key; `None` disables AI suggestions
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Gemini model name
    pub model: String,
    /// Base URL of the Gemini REST API
    pub api_base: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Prompt mode
    pub mode: SuggestionMode,
    /// Master switch, e.g. from `--no-ai`
    pub enabled: bool,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        if let Err(e) = dotenv::dotenv() {
            debug!("No .env file found or failed to load: {}", e);
        }

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = AppConfig {
            log_level: var_or(env_vars::LOG_LEVEL, defaults::LOG_LEVEL),
            model: ModelConfig {
                path: PathBuf::from(var_or(env_vars::MODEL_PATH, defaults::MODEL_PATH)),
                required: false,
            },
            ai: AiConfig {
                api_key: lookup(env_vars::GEMINI_API_KEY)
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty()),
                model: var_or(env_vars::GEMINI_MODEL, defaults::GEMINI_MODEL),
                api_base: var_or(env_vars::GEMINI_API_BASE, defaults::GEMINI_API_BASE),
                timeout_seconds: var_or(
                    env_vars::AI_TIMEOUT_SECONDS,
                    &defaults::AI_TIMEOUT_SECONDS.to_string(),
                )
                .parse()
                .context("Invalid AI_TIMEOUT_SECONDS value")?,
                mode: var_or(env_vars::SUGGESTION_MODE, defaults::SUGGESTION_MODE)
                    .parse::<SuggestionMode>()
                    .map_err(anyhow::Error::msg)
                    .context("Invalid SUGGESTION_MODE value")?,
                enabled: true,
            },
            lifestyle_config_path: lookup(env_vars::LIFESTYLE_CONFIG_PATH).map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.ai.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("AI_TIMEOUT_SECONDS must be greater than zero"));
        }

        url::Url::parse(&self.ai.api_base)
            .with_context(|| format!("Invalid GEMINI_API_BASE value: {}", self.ai.api_base))?;

        if self.ai.model.trim().is_empty() {
            return Err(anyhow::anyhow!("GEMINI_MODEL must not be empty"));
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    pub fn summary(&self) -> String {
        format!(
            "Lifestyle Advisor Configuration:\n\
             - Log Level: {}\n\
             - Model Artifact: {}{}\n\
             - Gemini API Key: {}\n\
             - Gemini Model: {}\n\
             - Suggestion Mode: {}\n\
             - AI Timeout: {}s",
            self.log_level,
            self.model.path.display(),
            if self.model.required { " (required)" } else { "" },
            if self.ai.api_key.is_some() { "Configured" } else { "Missing" },
            self.ai.model,
            self.ai.mode,
            self.ai.timeout_seconds,
        )
    }
}
