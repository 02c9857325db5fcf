//! Vector index capability trait.

use async_trait::async_trait;

use crate::document::ScoredDocument;
use crate::error::Result;

/// A read-only handle to a persisted similarity-search index.
///
/// The index is owned externally; this system only queries it. Results are
/// ordered by descending similarity score and bounded by `top_k`.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Return the `top_k` documents closest to the given embedding.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredDocument>>;
}
