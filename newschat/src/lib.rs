//! Retrieval-augmented chat over a fixed corpus of news articles.
//!
//! A question is embedded, the closest passages are retrieved from a
//! persisted on-disk vector index, the passages are rendered into a
//! provenance-tagged context block, a prompt template is filled with
//! context and question, and the result is sent to a remote chat-completion
//! endpoint. The answer text comes back unmodified.
//!
//! The external collaborators sit behind three narrow capability traits —
//! [`Embedder`], [`VectorIndex`], and [`CompletionModel`] — so the
//! [`ChatPipeline`] can be exercised with fakes. Concrete bindings are
//! provided for the Hugging Face inference API, a sqlite-persisted index,
//! and the Perplexity chat-completions API.

pub mod completion;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod format;
pub mod huggingface;
pub mod index;
pub mod perplexity;
pub mod pipeline;
pub mod preflight;
pub mod prompt;
pub mod sqlite;

pub use completion::CompletionModel;
pub use config::{RetrieverConfig, RetrieverConfigBuilder, SearchType};
pub use document::{Document, ScoredDocument};
pub use embedding::Embedder;
pub use error::{ChatError, Result};
pub use format::format_documents;
pub use huggingface::HuggingFaceEmbedder;
pub use index::VectorIndex;
pub use perplexity::PerplexityClient;
pub use pipeline::{ChatPipeline, ChatPipelineBuilder};
pub use preflight::Settings;
pub use prompt::{DEFAULT_TEMPLATE, PromptTemplate};
pub use sqlite::SqliteVectorIndex;
