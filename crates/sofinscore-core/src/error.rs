use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Failed to load model asset '{}': {reason}", .path.display())]
    AssetLoad { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ScoringError {
    pub(crate) fn asset(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ScoringError::AssetLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the error means the model bundle is unusable.
    pub fn is_asset_failure(&self) -> bool {
        matches!(self, ScoringError::AssetLoad { .. })
    }
}

impl From<serde_json::Error> for ScoringError {
    fn from(e: serde_json::Error) -> Self {
        ScoringError::SerializationError(e.to_string())
    }
}
