//! Rendering retrieved documents into a context block.

use crate::document::Document;

/// Concatenate retrieved documents into a single provenance-tagged block.
///
/// Each document renders as `"\n[Source: <source>]\n<content>"`, blocks
/// joined by a blank line, in input order. Empty input yields empty text;
/// the prompt template still renders and the "not found" rule covers the
/// rest downstream.
pub fn format_documents(docs: &[Document]) -> String {
    docs.iter()
        .map(|doc| format!("\n[Source: {}]\n{}", doc.source(), doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
