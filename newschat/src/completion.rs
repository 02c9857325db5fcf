//! Chat-completion capability trait.

use async_trait::async_trait;

use crate::error::Result;

/// A remote service that generates text given a prompt.
///
/// Implementations send the prompt as a single user turn and return the
/// textual content of the model's reply. Transport and API errors propagate
/// to the caller unmodified; there is no retry or backoff at this seam.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// The model identifier this client talks to.
    fn name(&self) -> &str;

    /// Send `prompt` to the completion endpoint and return the reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
