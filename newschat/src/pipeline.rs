//! Chat pipeline orchestrator.
//!
//! The [`ChatPipeline`] composes an [`Embedder`], a [`VectorIndex`], and a
//! [`CompletionModel`] into the single request → response flow the shell
//! drives: embed the question, query the index, format the hits, fill the
//! prompt template, call the completion endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use newschat::{ChatPipeline, RetrieverConfig};
//!
//! let pipeline = ChatPipeline::builder()
//!     .embedder(Arc::new(embedder))
//!     .index(Arc::new(index))
//!     .completion(Arc::new(model))
//!     .build()?;
//!
//! let answer = pipeline.ask("What happened in the election?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::completion::CompletionModel;
use crate::config::{RetrieverConfig, SearchType};
use crate::document::Document;
use crate::embedding::Embedder;
use crate::error::{ChatError, Result};
use crate::format::format_documents;
use crate::index::VectorIndex;
use crate::prompt::PromptTemplate;

/// The chat pipeline orchestrator.
///
/// Holds no mutable retrieval state across calls; every [`ask`](Self::ask)
/// is a fresh round trip with no caching. Construct one via
/// [`ChatPipeline::builder()`].
pub struct ChatPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    completion: Arc<dyn CompletionModel>,
    config: RetrieverConfig,
    template: PromptTemplate,
}

impl std::fmt::Debug for ChatPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatPipeline {
    /// Create a new [`ChatPipelineBuilder`].
    pub fn builder() -> ChatPipelineBuilder {
        ChatPipelineBuilder::default()
    }

    /// Return a reference to the retriever configuration.
    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Return a reference to the prompt template.
    pub fn prompt_template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Replace the prompt template, validating the new text.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Template`] if the text is empty or missing a
    /// required slot; the previous template stays in place.
    pub fn set_prompt_template(&mut self, template: &str) -> Result<()> {
        self.template = PromptTemplate::new(template)?;
        Ok(())
    }

    /// Answer a question: embed → retrieve → format → prompt → complete.
    ///
    /// Returns the completion text unmodified. Zero retrieved documents do
    /// not short-circuit; the template renders with empty context and the
    /// completion endpoint is still invoked.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidQuestion`] for a question that is empty
    /// after trimming, or [`ChatError::Pipeline`] naming the failed stage.
    /// Upstream failures are never retried.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::InvalidQuestion);
        }

        // 1. Embed the question
        let embedding = self.embedder.embed(question).await.map_err(|e| {
            error!(error = %e, "embedding failed during ask");
            ChatError::Pipeline(format!("question embedding failed: {e}"))
        })?;

        // 2. Query the index in the configured mode
        let hits = match self.config.search_type {
            SearchType::Similarity => {
                self.index.query(&embedding, self.config.top_k).await.map_err(|e| {
                    error!(error = %e, "vector index query failed");
                    ChatError::Pipeline(format!("index query failed: {e}"))
                })?
            }
        };

        // 3. Drop scores and render the context block
        let docs: Vec<Document> = hits.into_iter().map(|hit| hit.document).collect();
        let context = format_documents(&docs);

        // 4. Fill the template
        let prompt = self.template.fill(&context, question);

        // 5. Call the completion endpoint
        let answer = self.completion.complete(&prompt).await.map_err(|e| {
            error!(model = self.completion.name(), error = %e, "completion failed");
            ChatError::Pipeline(format!("completion failed: {e}"))
        })?;

        info!(model = self.completion.name(), retrieved = docs.len(), "answered question");
        Ok(answer)
    }
}

/// Builder for constructing a [`ChatPipeline`].
///
/// The embedder, index, and completion model are required; the retriever
/// configuration and prompt template fall back to their defaults.
#[derive(Default)]
pub struct ChatPipelineBuilder {
    embedder: Option<Arc<dyn Embedder>>,
    index: Option<Arc<dyn VectorIndex>>,
    completion: Option<Arc<dyn CompletionModel>>,
    config: Option<RetrieverConfig>,
    template: Option<PromptTemplate>,
}

impl ChatPipelineBuilder {
    /// Set the embedding provider.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector index.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the completion model.
    pub fn completion(mut self, completion: Arc<dyn CompletionModel>) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Set the retriever configuration (defaults to similarity search, k=3).
    pub fn config(mut self, config: RetrieverConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the prompt template (defaults to the built-in news template).
    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Build the [`ChatPipeline`], validating that all required fields are
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if any required field is missing.
    pub fn build(self) -> Result<ChatPipeline> {
        let embedder = self
            .embedder
            .ok_or_else(|| ChatError::Config("embedder is required".to_string()))?;
        let index =
            self.index.ok_or_else(|| ChatError::Config("index is required".to_string()))?;
        let completion = self
            .completion
            .ok_or_else(|| ChatError::Config("completion model is required".to_string()))?;

        Ok(ChatPipeline {
            embedder,
            index,
            completion,
            config: self.config.unwrap_or_default(),
            template: self.template.unwrap_or_default(),
        })
    }
}
