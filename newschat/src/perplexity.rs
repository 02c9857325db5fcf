//! Perplexity chat-completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::completion::CompletionModel;
use crate::error::{ChatError, Result};

/// The Perplexity chat-completions endpoint.
const PERPLEXITY_CHAT_URL: &str = "https://api.perplexity.ai/chat/completions";

/// The default model identifier.
const DEFAULT_MODEL: &str = "sonar";

/// A [`CompletionModel`] backed by the Perplexity chat-completions API.
///
/// Sends the rendered prompt as a single user turn with temperature 0.
/// The underlying `reqwest` client is built without a request timeout, so a
/// hung endpoint hangs the call; this mirrors the upstream configuration
/// and is a preserved design property.
#[derive(Debug)]
pub struct PerplexityClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl PerplexityClient {
    /// Create a client with the given API key and the default model.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Completion`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ChatError::Completion {
                provider: "Perplexity".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.into(),
            temperature: 0.0,
        })
    }

    /// Set the model identifier (e.g. `sonar-pro`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

// ── Perplexity API request/response types ──────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── CompletionModel implementation ─────────────────────────────────

#[async_trait]
impl CompletionModel for PerplexityClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(provider = "Perplexity", model = %self.model, prompt_len = prompt.len(), "sending completion request");

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(PERPLEXITY_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Perplexity", error = %e, "request failed");
                ChatError::Completion {
                    provider: "Perplexity".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = "Perplexity", %status, "API error");
            return Err(ChatError::Completion {
                provider: "Perplexity".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = "Perplexity", error = %e, "failed to parse response");
            ChatError::Completion {
                provider: "Perplexity".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        completion.choices.into_iter().next().map(|c| c.message.content).ok_or_else(|| {
            ChatError::Completion {
                provider: "Perplexity".into(),
                message: "API returned no choices".into(),
            }
        })
    }
}
