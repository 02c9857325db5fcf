//! Hugging Face embedding provider using the inference API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::Embedder;
use crate::error::{ChatError, Result};

/// Base URL for the Hugging Face feature-extraction pipeline.
const HF_FEATURE_EXTRACTION_URL: &str = "https://api-inference.huggingface.co/pipeline/feature-extraction";

/// The default sentence-embedding model.
const DEFAULT_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// The dimensionality of `all-MiniLM-L6-v2` embeddings.
const DEFAULT_DIMENSIONS: usize = 384;

/// An [`Embedder`] backed by the Hugging Face inference API.
///
/// Calls the feature-extraction endpoint for a sentence-transformers model
/// directly over `reqwest`. The API token is optional; without one the
/// request is sent unauthenticated (rate limited by the service).
///
/// # Example
///
/// ```rust,ignore
/// use newschat::HuggingFaceEmbedder;
///
/// let embedder = HuggingFaceEmbedder::new().with_api_token("hf_...");
/// let embedding = embedder.embed("hello world").await?;
/// ```
pub struct HuggingFaceEmbedder {
    client: reqwest::Client,
    api_token: Option<String>,
    model: String,
    dimensions: usize,
}

impl Default for HuggingFaceEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl HuggingFaceEmbedder {
    /// Create a provider for the default model
    /// (`sentence-transformers/all-MiniLM-L6-v2`, 384 dimensions).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token: None,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Set the API token used as a bearer credential.
    ///
    /// Empty tokens are ignored.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.is_empty() {
            self.api_token = Some(token);
        }
        self
    }

    /// Set the model name and its embedding dimensionality.
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

// ── Hugging Face API request/response types ────────────────────────

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: Vec<&'a str>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── Embedder implementation ────────────────────────────────────────

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "HuggingFace", model = %self.model, text_len = text.len(), "embedding text");

        let url = format!("{HF_FEATURE_EXTRACTION_URL}/{}", self.model);
        let mut request = self.client.post(&url).json(&EmbedRequest { inputs: vec![text] });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(provider = "HuggingFace", error = %e, "request failed");
            ChatError::Embedding {
                provider: "HuggingFace".into(),
                message: format!("request failed: {e}"),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail =
                serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body);

            error!(provider = "HuggingFace", %status, "API error");
            return Err(ChatError::Embedding {
                provider: "HuggingFace".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let vectors: Vec<Vec<f32>> = response.json().await.map_err(|e| {
            error!(provider = "HuggingFace", error = %e, "failed to parse response");
            ChatError::Embedding {
                provider: "HuggingFace".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        vectors.into_iter().next().ok_or_else(|| ChatError::Embedding {
            provider: "HuggingFace".into(),
            message: "API returned empty response".into(),
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
