//! Startup precondition checks.
//!
//! The process environment is read exactly once, in
//! [`Settings::from_env`]; everything downstream receives explicit values.
//! [`check`] collects every failing precondition into one aggregated
//! configuration error so a user sees all missing resources at once rather
//! than fixing them one at a time.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ChatError, Result};
use crate::sqlite::INDEX_MARKER;

/// Environment variable holding the completion-endpoint credential.
pub const API_KEY_VAR: &str = "PPLX_API_KEY";

/// Environment variable holding the optional embedding-API token.
pub const HF_TOKEN_VAR: &str = "HF_API_TOKEN";

/// Default directory containing the persisted vector index.
pub const DEFAULT_INDEX_DIR: &str = "news_chroma";

/// Resolved startup configuration.
///
/// Holds everything the rest of the system needs from the environment, so
/// no other component reads environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Completion-endpoint credential, if set and non-empty.
    pub api_key: Option<String>,
    /// Embedding-API token, if set and non-empty. Optional; the embedding
    /// endpoint accepts unauthenticated requests.
    pub hf_api_token: Option<String>,
    /// Directory containing the persisted vector index.
    pub index_dir: PathBuf,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Blank values are treated as absent. The index directory defaults to
    /// `news_chroma` in the working directory.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var(API_KEY_VAR),
            hf_api_token: non_empty_var(HF_TOKEN_VAR),
            index_dir: PathBuf::from(DEFAULT_INDEX_DIR),
        }
    }

    /// Override the index directory.
    pub fn with_index_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.index_dir = dir.into();
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Validate that every startup precondition holds.
///
/// Checks the completion credential and the persisted index (directory plus
/// its `chroma.sqlite3` marker). All failures are collected; the returned
/// [`ChatError::Config`] names every missing resource, not just the first.
pub fn check(settings: &Settings) -> Result<()> {
    let mut missing = Vec::new();

    if settings.api_key.is_none() {
        missing.push(API_KEY_VAR.to_string());
    }

    let marker = settings.index_dir.join(INDEX_MARKER);
    if !settings.index_dir.is_dir() || !marker.is_file() {
        missing.push(format!(
            "vector index resources ('{}' directory with {INDEX_MARKER})",
            settings.index_dir.display()
        ));
    }

    if missing.is_empty() {
        debug!(index_dir = %settings.index_dir.display(), "startup preconditions satisfied");
        Ok(())
    } else {
        Err(ChatError::Config(format!("Missing required resources: {}", missing.join(", "))))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn settings(api_key: Option<&str>, index_dir: PathBuf) -> Settings {
        Settings {
            api_key: api_key.map(String::from),
            hf_api_token: None,
            index_dir,
        }
    }

    fn ready_index_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(INDEX_MARKER), b"").unwrap();
        dir
    }

    #[test]
    fn passes_with_credential_and_index() {
        let dir = ready_index_dir();
        assert!(check(&settings(Some("pplx-key"), dir.path().to_path_buf())).is_ok());
    }

    #[test]
    fn missing_credential_mentions_credential_only() {
        let dir = ready_index_dir();
        let err = check(&settings(None, dir.path().to_path_buf())).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(API_KEY_VAR));
        assert!(!message.contains("vector index"));
    }

    #[test]
    fn missing_index_dir_mentions_index_only() {
        let err =
            check(&settings(Some("pplx-key"), PathBuf::from("/nonexistent/news_chroma")))
                .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("vector index"));
        assert!(!message.contains(API_KEY_VAR));
    }

    #[test]
    fn missing_marker_fails_even_when_directory_exists() {
        let dir = tempfile::tempdir().unwrap();
        let err = check(&settings(Some("pplx-key"), dir.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains(INDEX_MARKER));
    }

    #[test]
    fn aggregates_all_missing_resources_into_one_error() {
        let err =
            check(&settings(None, PathBuf::from("/nonexistent/news_chroma"))).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(API_KEY_VAR));
        assert!(message.contains("vector index"));
    }
}
