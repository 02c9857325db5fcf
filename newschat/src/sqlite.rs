//! Persisted sqlite vector index backend.
//!
//! Provides [`SqliteVectorIndex`], which implements [`VectorIndex`] over the
//! index database an ingestion job leaves on disk. The index directory is
//! considered ready when it contains the `chroma.sqlite3` marker file; rows
//! live in an `embeddings` table with columns `id`, `content`, `metadata`
//! (a JSON object of string values), and `embedding` (little-endian `f32`
//! bytes). Candidates are ranked in process by cosine similarity.
//!
//! This system never writes to the index; the persisted representation is
//! owned by whatever built it.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::document::{Document, ScoredDocument};
use crate::error::{ChatError, Result};
use crate::index::VectorIndex;

/// File whose presence signals the persisted index is initialized.
pub const INDEX_MARKER: &str = "chroma.sqlite3";

/// A [`VectorIndex`] backed by a sqlite database on disk.
#[derive(Debug)]
pub struct SqliteVectorIndex {
    pool: SqlitePool,
}

impl SqliteVectorIndex {
    /// Open the persisted index rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Index`] if the marker file is absent or the
    /// database cannot be opened. Startup preflight normally catches a
    /// missing index before this runs.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let marker = dir.as_ref().join(INDEX_MARKER);
        if !marker.is_file() {
            return Err(ChatError::Index {
                backend: "sqlite".into(),
                message: format!("index marker '{}' not found", marker.display()),
            });
        }

        let url = format!("sqlite://{}?mode=ro", marker.display());
        let pool =
            SqlitePoolOptions::new().max_connections(1).connect(&url).await.map_err(Self::map_err)?;

        debug!(index = %marker.display(), "opened persisted vector index");
        Ok(Self { pool })
    }

    /// Create an index from an existing connection pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_err(e: sqlx::Error) -> ChatError {
        ChatError::Index { backend: "sqlite".into(), message: e.to_string() }
    }
}

/// Decode a blob of little-endian `f32` bytes.
///
/// Returns `None` if the length is not a multiple of four.
fn decode_embedding(blob: &[u8]) -> Option<Vec<f32>> {
    if blob.len() % 4 != 0 {
        return None;
    }
    Some(
        blob.chunks_exact(4)
            .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            .collect(),
    )
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if the vectors differ in length or either has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Score candidates against the query embedding, order by descending
/// similarity, and truncate to `top_k`.
fn rank_by_similarity(
    candidates: Vec<(Document, Vec<f32>)>,
    embedding: &[f32],
    top_k: usize,
) -> Vec<ScoredDocument> {
    let mut scored: Vec<ScoredDocument> = candidates
        .into_iter()
        .map(|(document, candidate)| ScoredDocument {
            score: cosine_similarity(&candidate, embedding),
            document,
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}

/// Parse the metadata column (a JSON object) into string key-value pairs.
fn parse_metadata(raw: Option<&str>) -> HashMap<String, String> {
    raw.and_then(|text| serde_json::from_str::<serde_json::Value>(text).ok())
        .and_then(|value| {
            value.as_object().map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
        })
        .unwrap_or_default()
}

#[async_trait]
impl VectorIndex for SqliteVectorIndex {
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<ScoredDocument>> {
        let rows = sqlx::query("SELECT content, metadata, embedding FROM embeddings")
            .fetch_all(&self.pool)
            .await
            .map_err(Self::map_err)?;

        let candidates: Vec<(Document, Vec<f32>)> = rows
            .iter()
            .map(|row| {
                let content: String = row.get("content");
                let metadata_raw: Option<String> = row.get("metadata");
                let blob: Vec<u8> = row.get("embedding");

                let document =
                    Document { content, metadata: parse_metadata(metadata_raw.as_deref()) };
                // Undecodable rows score 0 rather than failing the query.
                let candidate = decode_embedding(&blob).unwrap_or_default();
                (document, candidate)
            })
            .collect();

        let results = rank_by_similarity(candidates, embedding, top_k);
        debug!(candidates = rows.len(), results = results.len(), "vector index query");
        Ok(results)
    }
}
