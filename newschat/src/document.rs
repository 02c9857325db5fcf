//! Data types for retrieved documents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata key identifying the file a document came from.
pub const SOURCE_KEY: &str = "source";

/// Fallback provenance label for documents with no recorded source.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// An immutable retrieval result: a passage of article text plus metadata.
///
/// Documents are read from the externally-owned index and flow through the
/// retrieve → format pipeline; this system never persists them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The text content of the passage.
    pub content: String,
    /// Key-value metadata; at minimum a `source` key identifying the
    /// originating file.
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a document with the given content and source file name.
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::from([(SOURCE_KEY.to_string(), source.into())]),
        }
    }

    /// The originating file name, or `"unknown"` if none was recorded.
    pub fn source(&self) -> &str {
        self.metadata.get(SOURCE_KEY).map(String::as_str).unwrap_or(UNKNOWN_SOURCE)
    }
}

/// A retrieved [`Document`] paired with a similarity score.
///
/// Scores are internal to retrieval; the pipeline drops them before
/// formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// The retrieved document.
    pub document: Document,
    /// The similarity score (higher is more relevant).
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_reads_metadata() {
        let doc = Document::new("text", "a.txt");
        assert_eq!(doc.source(), "a.txt");
    }

    #[test]
    fn source_defaults_to_unknown() {
        let doc = Document { content: "text".into(), metadata: HashMap::new() };
        assert_eq!(doc.source(), UNKNOWN_SOURCE);
    }
}
