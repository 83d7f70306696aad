// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Google Gemini `generateContent` client

use super::{SuggestionError, TextGenerator};
use crate::config::AiConfig;
use crate::constants::endpoints::{GEMINI_API_KEY_HEADER, GEMINI_API_VERSION};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub struct GeminiClient {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    status: Option<String>,
}

impl GeminiClient {
    /// Create a client with a per-request timeout
    pub fn new(
        api_key: &str,
        model: &str,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, SuggestionError> {
        if api_key.trim().is_empty() {
            return Err(SuggestionError::MissingCredential);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SuggestionError::ClientBuild)?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a client from configuration; fails when no key is configured
    pub fn from_config(config: &AiConfig) -> Result<Self, SuggestionError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or(SuggestionError::MissingCredential)?;
        Self::new(api_key, &config.model, &config.api_base, config.timeout())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.api_base, GEMINI_API_VERSION, self.model
        )
    }

    async fn error_from_response(response: reqwest::Response) -> SuggestionError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
            Ok(envelope) => match envelope.error.status {
                Some(code) => format!("{} ({code})", envelope.error.message),
                None => envelope.error.message,
            },
            Err(_) if body.is_empty() => "empty response body".to_string(),
            Err(_) => body,
        };
        SuggestionError::Api { status, message }
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, SuggestionError> {
    let candidate = response.candidates.into_iter().next();

    let text: String = candidate
        .as_ref()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if !text.trim().is_empty() {
        return Ok(text);
    }

    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(SuggestionError::Blocked(reason));
    }

    match candidate.and_then(|candidate| candidate.finish_reason) {
        Some(reason) if reason == "SAFETY" => Err(SuggestionError::Blocked(reason)),
        _ => Err(SuggestionError::EmptyResponse),
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, SuggestionError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint())
            .header(GEMINI_API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SuggestionError::Timeout
                } else {
                    SuggestionError::Network(e)
                }
            })?;

        if !response.status().is_success() {
            let error = Self::error_from_response(response).await;
            warn!(model = %self.model, error = %error, "Gemini request failed");
            return Err(error);
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SuggestionError::Timeout
            } else {
                SuggestionError::Network(e)
            }
        })?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| SuggestionError::InvalidResponse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = started.elapsed().as_millis() as u64,
            "Gemini request completed"
        );

        extract_text(parsed)
    }

    fn name(&self) -> String {
        format!("gemini:{}", self.model)
    }
}
