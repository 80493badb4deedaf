// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for an OpenAI-compatible Responses endpoint.
//!
//! Sends coaching instructions plus the rendered activity and returns the
//! generated text. Works with any server that implements `POST /responses`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::AppError;

/// Connection timeout for the LLM endpoint.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request timeout (generation can be slow).
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Text-generation client.
#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    temperature: f32,
    instructions: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl LlmClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: f32,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key,
            model,
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Generate text for `input` under the given `instructions`.
    #[tracing::instrument(skip_all, fields(model = %self.model))]
    pub async fn generate(&self, instructions: &str, input: &str) -> Result<String, AppError> {
        let request = ResponsesRequest {
            model: &self.model,
            temperature: self.temperature,
            instructions,
            input,
        };

        tracing::debug!(
            instructions_len = instructions.len(),
            input_len = input.len(),
            "Sending generation request"
        );

        let response = self
            .http
            .post(self.api_url("responses"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(parse_error_response(status, &body));
        }

        let text = parse_output_text(&body)?;
        tracing::info!(output_len = text.len(), "Generation complete");
        Ok(text)
    }
}

/// Concatenate every `output_text` part of a Responses payload.
fn parse_output_text(body: &str) -> Result<String, AppError> {
    let parsed: ResponsesResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Llm(format!("Failed to parse response: {}", e)))?;

    let text: String = parsed
        .output
        .iter()
        .flat_map(|item| item.content.iter())
        .filter(|part| part.kind == "output_text")
        .map(|part| part.text.as_str())
        .collect();

    if text.is_empty() {
        return Err(AppError::Llm("Response contained no text".to_string()));
    }
    Ok(text)
}

fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => AppError::Llm(format!("HTTP {}: {}", status, err.error.message)),
        // Non-JSON errors (proxies, local servers)
        Err(_) => AppError::Llm(format!(
            "HTTP {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )),
    }
}
