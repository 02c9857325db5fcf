//! Configuration for the retriever.

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

/// The query mode used against the vector index.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Rank documents by vector-space closeness to the query embedding.
    #[default]
    Similarity,
}

/// Configuration parameters for the retriever.
///
/// Immutable after construction; supplied once at pipeline setup and
/// reused for every query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrieverConfig {
    /// The query mode.
    pub search_type: SearchType,
    /// Number of top results to return from vector search.
    pub top_k: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self { search_type: SearchType::Similarity, top_k: 3 }
    }
}

impl RetrieverConfig {
    /// Create a new builder for constructing a [`RetrieverConfig`].
    pub fn builder() -> RetrieverConfigBuilder {
        RetrieverConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RetrieverConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrieverConfigBuilder {
    config: RetrieverConfig,
}

impl RetrieverConfigBuilder {
    /// Set the query mode.
    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.config.search_type = search_type;
        self
    }

    /// Set the number of top results to return from vector search.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Build the [`RetrieverConfig`], validating that parameters are
    /// consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if `top_k == 0`.
    pub fn build(self) -> Result<RetrieverConfig> {
        if self.config.top_k == 0 {
            return Err(ChatError::Config("top_k must be greater than zero".to_string()));
        }
        Ok(self.config)
    }
}
