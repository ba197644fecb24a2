pub mod bundle;
pub mod forest;
pub mod scaler;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::ScoringError;
use crate::ScoringResult;

pub use bundle::{load_assets, shared_assets, shared_cache, AssetCache, ModelBundle};
pub use forest::RandomForest;
pub use scaler::StandardScaler;

/// Read a JSON artifact, reporting any failure as an asset-load error.
fn read_artifact<T: DeserializeOwned>(path: &Path) -> ScoringResult<T> {
    let bytes = fs::read(path).map_err(|e| ScoringError::asset(path, e.to_string()))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ScoringError::asset(path, format!("unreadable artifact: {e}")))
}
