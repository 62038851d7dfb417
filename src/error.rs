//! Error taxonomy for the conversion pipeline.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConverterError {
    /// Arguments missing or invalid for the chosen mode.
    #[error("{0}")]
    Config(String),

    #[error("{kind} file not found: {}", path.display())]
    InputNotFound { kind: &'static str, path: PathBuf },

    /// Input exists but is not a usable gridded dataset.
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("grid mismatch: {0}")]
    GridMismatch(String),

    #[error("failed to write {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("failed to encode topology: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ConverterError {
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConverterError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
