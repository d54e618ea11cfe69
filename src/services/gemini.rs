// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini API client for generating quiz questions.
//!
//! Sends a fixed prompt with a JSON response schema and parses the returned
//! text as an array of questions. Validation of the parsed questions happens
//! in the question source.

use crate::models::Question;
use crate::services::questions::{QuestionGenerator, QuestionSourceError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
        }
    }

    /// Point the client at a different API root (proxies, local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request body for `count` questions.
    pub fn request_body(count: usize) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [{ "text": prompt(count) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "question": { "type": "STRING" },
                            "options": {
                                "type": "ARRAY",
                                "items": { "type": "STRING" }
                            },
                            "correctAnswer": { "type": "STRING" },
                            "explanation": { "type": "STRING" }
                        },
                        "required": ["question", "options", "correctAnswer", "explanation"]
                    }
                }
            }
        })
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, QuestionSourceError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            if status == 429 {
                tracing::warn!("Gemini rate limit hit (429)");
            }

            return Err(QuestionSourceError::Http { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| QuestionSourceError::Malformed(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl QuestionGenerator for GeminiClient {
    async fn generate(&self, count: usize) -> Result<Vec<Question>, QuestionSourceError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!(model = %self.model, count, "Requesting generated questions");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&Self::request_body(count))
            .send()
            .await
            .map_err(|e| QuestionSourceError::Network(e.to_string()))?;

        let body: GenerateContentResponse = self.check_response_json(response).await?;
        parse_generated_questions(&body)
    }
}

fn prompt(count: usize) -> String {
    format!(
        "Generate {} challenging React JS interview questions for a hackathon quiz. \
         Each question must have exactly 4 distinct options, and correctAnswer must be \
         copied verbatim from the options.",
        count
    )
}

/// `generateContent` response (only the fields we read).
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        Some(text)
    }
}

/// Extract the question array from a `generateContent` response.
pub fn parse_generated_questions(
    response: &GenerateContentResponse,
) -> Result<Vec<Question>, QuestionSourceError> {
    let text = response
        .text()
        .ok_or_else(|| QuestionSourceError::Malformed("response has no candidates".to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(QuestionSourceError::Malformed("empty response text".to_string()));
    }

    serde_json::from_str(text)
        .map_err(|e| QuestionSourceError::Malformed(format!("question JSON: {}", e)))
}
