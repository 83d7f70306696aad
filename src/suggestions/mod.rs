// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # AI Suggestions
//!
//! Turns the rule engine output into AI-generated help: either YouTube search
//! links or a few extra motivational tips. The remote text generator sits behind
//! the [`TextGenerator`] trait; [`gemini::GeminiClient`] is the production
//! implementation.
//!
//! Every failure is returned as a [`SuggestionError`]. Callers decide how to
//! degrade; nothing here retries.

use crate::models::{AiSuggestions, RecommendationResult, SearchSuggestion, UserMetrics};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub mod gemini;
pub mod parser;
pub mod prompts;

pub use gemini::GeminiClient;
pub use parser::{parse_search_queries, youtube_search_url};

/// Remote text generation service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String, SuggestionError>;

    /// Name used in status output and logs
    fn name(&self) -> String;
}

/// Which prompt is sent and how the reply is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionMode {
    /// Markdown bullet list of search queries, rendered as links
    #[serde(rename = "search")]
    SearchQueries,
    /// 2-3 motivational tips, rendered verbatim
    #[serde(rename = "advice")]
    FreeAdvice,
}

impl fmt::Display for SuggestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionMode::SearchQueries => f.write_str("search"),
            SuggestionMode::FreeAdvice => f.write_str("advice"),
        }
    }
}

impl FromStr for SuggestionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "search" | "search_queries" | "queries" => Ok(SuggestionMode::SearchQueries),
            "advice" | "free_advice" | "tips" => Ok(SuggestionMode::FreeAdvice),
            other => Err(format!("Unknown suggestion mode '{other}'. Expected 'search' or 'advice'")),
        }
    }
}

/// AI suggestion errors
#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("No API key configured for the text generation service")]
    MissingCredential,

    #[error("Could not initialize the text generation client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Text generation request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Text generation API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from text generation API: {0}")]
    InvalidResponse(String),

    #[error("Prompt was blocked by the text generation API: {0}")]
    Blocked(String),

    #[error("Text generation API returned no text")]
    EmptyResponse,
}

/// Builds prompts, calls the generator and parses its reply
pub struct SuggestionService {
    generator: Box<dyn TextGenerator>,
    mode: SuggestionMode,
}

impl fmt::Debug for SuggestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionService")
            .field("generator", &self.generator.name())
            .field("mode", &self.mode)
            .finish()
    }
}

impl SuggestionService {
    pub fn new(generator: Box<dyn TextGenerator>, mode: SuggestionMode) -> Self {
        Self { generator, mode }
    }

    pub fn mode(&self) -> SuggestionMode {
        self.mode
    }

    pub fn generator_name(&self) -> String {
        self.generator.name()
    }

    /// Generate suggestions for already evaluated recommendations
    pub async fn suggest(
        &self,
        metrics: &UserMetrics,
        recommendations: &RecommendationResult,
    ) -> Result<AiSuggestions, SuggestionError> {
        let prompt = prompts::build_prompt(self.mode, metrics, recommendations);
        debug!(mode = %self.mode, prompt_chars = prompt.len(), "Requesting AI suggestions");

        let text = self.generator.generate(&prompt).await?;

        Ok(match self.mode {
            SuggestionMode::SearchQueries => AiSuggestions::SearchQueries(
                parse_search_queries(&text)
                    .into_iter()
                    .map(|query| SearchSuggestion {
                        url: youtube_search_url(&query),
                        query,
                    })
                    .collect(),
            ),
            SuggestionMode::FreeAdvice => AiSuggestions::Advice(text),
        })
    }
}
