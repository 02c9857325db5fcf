//! Prompt template with fixed named slots.
//!
//! The template carries the answer-shape contract for the downstream model:
//! answer strictly from the provided articles, fall back to a fixed literal
//! phrase when the answer is not found, and list source file names after the
//! answer. This system never parses or validates the model's compliance;
//! the instructions are best effort.

use crate::error::{ChatError, Result};

/// Placeholder for the formatted article context.
pub const CONTEXT_SLOT: &str = "{context}";

/// Placeholder for the raw user question.
pub const QUESTION_SLOT: &str = "{question}";

/// The default template sent to the completion endpoint.
pub const DEFAULT_TEMPLATE: &str = "\
You are answering questions using ONLY the news articles below.

Rules:
- Base your answer strictly on the provided articles.
- If the answer is not found, say \"Not mentioned in the articles\".
- After the answer (only if answer is found), list the source file name(s).

Articles:
{context}

Question:
{question}

Answer format:
Answer: <your answer>
Sources: <comma-separated file names>
";

/// A template string with two required named slots, `{context}` and
/// `{question}`.
///
/// Both slots must be present in the template text; construction fails
/// otherwise, so render can never fail. Immutable once built — replacing
/// the template on a pipeline goes through validation again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self { template: DEFAULT_TEMPLATE.to_string() }
    }
}

impl PromptTemplate {
    /// Create a template, validating that it is non-blank and contains both
    /// required slots.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Template`] naming every missing slot, or noting
    /// that the template is empty.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if template.trim().is_empty() {
            return Err(ChatError::Template("template must not be empty".to_string()));
        }

        let missing: Vec<&str> = [CONTEXT_SLOT, QUESTION_SLOT]
            .into_iter()
            .filter(|slot| !template.contains(slot))
            .collect();
        if !missing.is_empty() {
            return Err(ChatError::Template(format!(
                "template is missing required slot(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self { template })
    }

    /// The raw template text.
    pub fn text(&self) -> &str {
        &self.template
    }

    /// Substitute the context and question into the template.
    pub fn fill(&self, context: &str, question: &str) -> String {
        self.template.replace(CONTEXT_SLOT, context).replace(QUESTION_SLOT, question)
    }
}
