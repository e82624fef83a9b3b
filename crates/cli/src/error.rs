//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The declaration file does not exist.
    #[error("declaration file not found at {path}")]
    FileNotFound { path: PathBuf },

    /// No controller with the given name is declared.
    #[error("no controller named '{name}' (known: {known:?})")]
    UnknownController { name: String, known: Vec<String> },

    /// The declaration file is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to render output as JSON.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
