//! Interactive news-chat client.
//!
//! Wires the concrete providers into a [`ChatPipeline`] and hands control
//! to the read-eval-print loop. Startup refuses to enter the loop unless
//! every precondition (credential, persisted index) holds.

use std::sync::Arc;

use newschat::{
    ChatPipeline, HuggingFaceEmbedder, PerplexityClient, Settings, SqliteVectorIndex, preflight,
};
use tracing_subscriber::EnvFilter;

mod shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let settings = Settings::from_env();
    preflight::check(&settings)?;

    let mut embedder = HuggingFaceEmbedder::new();
    if let Some(token) = &settings.hf_api_token {
        embedder = embedder.with_api_token(token);
    }
    let index = SqliteVectorIndex::open(&settings.index_dir).await?;
    // Preflight verified the credential is present.
    let model = PerplexityClient::new(settings.api_key.clone().unwrap_or_default())?;

    let pipeline = ChatPipeline::builder()
        .embedder(Arc::new(embedder))
        .index(Arc::new(index))
        .completion(Arc::new(model))
        .build()?;

    shell::run(&pipeline).await
}
