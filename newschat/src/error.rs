//! Error types for the `newschat` crate.

use thiserror::Error;

/// Errors that can occur while answering a question.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Aggregated startup precondition failures. Raised before the
    /// interactive loop starts; the process does not start.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt template validation failure, raised at construction or
    /// assignment, never deferred to render time.
    #[error("Prompt template error: {0}")]
    Template(String),

    /// The question was empty after trimming whitespace.
    #[error("question must not be empty")]
    InvalidQuestion,

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector index backend.
    #[error("Vector index error ({backend}): {message}")]
    Index {
        /// The index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while calling the completion endpoint.
    #[error("Completion error ({provider}): {message}")]
    Completion {
        /// The completion provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error in the chat pipeline orchestration.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for chat operations.
pub type Result<T> = std::result::Result<T, ChatError>;
