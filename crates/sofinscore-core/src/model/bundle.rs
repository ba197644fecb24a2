//! Classifier + scaler pair, loaded once per process.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use super::forest::RandomForest;
use super::scaler::StandardScaler;
use crate::features::FEATURE_COUNT;
use crate::ScoringResult;

/// Directory the artifacts are read from, relative to the working directory.
pub const DEFAULT_MODELS_DIR: &str = "models";
pub const CLASSIFIER_FILE: &str = "credit_model.json";
pub const SCALER_FILE: &str = "scaler.json";

#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub classifier: RandomForest,
    pub scaler: StandardScaler,
    /// Directory the pair was loaded from.
    pub source: PathBuf,
}

impl ModelBundle {
    /// Scale a raw vector and return `[p(repaid), p(default)]`.
    pub fn predict_proba(&self, raw: &[f64; FEATURE_COUNT]) -> [f64; 2] {
        let scaled = self.scaler.transform(raw);
        self.classifier.predict_proba(&scaled)
    }
}

/// Deserialize both artifacts from `dir`. Either failing aborts the load.
pub fn load_assets(dir: impl AsRef<Path>) -> ScoringResult<ModelBundle> {
    let start = Instant::now();
    let dir = dir.as_ref();
    let classifier = RandomForest::load(&dir.join(CLASSIFIER_FILE))?;
    let scaler = StandardScaler::load(&dir.join(SCALER_FILE))?;
    tracing::info!(
        dir = %dir.display(),
        trees = classifier.n_trees(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "model assets loaded"
    );
    Ok(ModelBundle {
        classifier,
        scaler,
        source: dir.to_path_buf(),
    })
}

/// Lazily-initialised, read-only bundle slot.
///
/// The first successful load is kept for the lifetime of the cache; a
/// failed load leaves the slot empty so the next caller sees the error
/// again.
#[derive(Debug, Default)]
pub struct AssetCache {
    slot: OnceLock<ModelBundle>,
}

impl AssetCache {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// The cached bundle, if one has been loaded.
    pub fn get(&self) -> Option<&ModelBundle> {
        self.slot.get()
    }

    /// Return the cached bundle, loading it from `dir` on first use.
    pub fn get_or_load(&self, dir: impl AsRef<Path>) -> ScoringResult<&ModelBundle> {
        if let Some(bundle) = self.slot.get() {
            tracing::debug!(dir = %bundle.source.display(), "model assets served from cache");
            return Ok(bundle);
        }
        let bundle = load_assets(dir)?;
        Ok(self.slot.get_or_init(|| bundle))
    }
}

static SHARED: AssetCache = AssetCache::new();

/// The process-wide cache behind [`shared_assets`].
pub fn shared_cache() -> &'static AssetCache {
    &SHARED
}

/// Process-wide bundle shared by every render.
pub fn shared_assets(dir: impl AsRef<Path>) -> ScoringResult<&'static ModelBundle> {
    SHARED.get_or_load(dir)
}
