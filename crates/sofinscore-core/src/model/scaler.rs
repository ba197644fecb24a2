//! Fitted standardisation: `(x - mean) / scale` per column.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ScoringError;
use crate::features::FEATURE_COUNT;
use crate::ScoringResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column training mean.
    pub mean: Vec<f64>,
    /// Per-column training standard deviation.
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Read and validate a scaler artifact.
    pub fn load(path: &Path) -> ScoringResult<Self> {
        let scaler: StandardScaler = super::read_artifact(path)?;
        scaler
            .check()
            .map_err(|reason| ScoringError::asset(path, reason))?;
        Ok(scaler)
    }

    /// Normalise a raw feature vector.
    pub fn transform(&self, raw: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, x) in raw.iter().enumerate() {
            // A zero scale marks a constant training column.
            let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            out[i] = (x - self.mean[i]) / scale;
        }
        out
    }

    fn check(&self) -> Result<(), String> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(format!(
                "scaler expects {} features but was fitted on mean={} / scale={}",
                FEATURE_COUNT,
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err("scaler parameters must be finite".into());
        }
        if self.scale.iter().any(|s| *s < 0.0) {
            return Err("scaler scale entries must be non-negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler {
            mean: vec![3000.0, 40.0, 20000.0, 0.5, 0.6],
            scale: vec![1000.0, 10.0, 10000.0, 0.5, 0.0],
        }
    }

    #[test]
    fn test_transform_centres_and_scales() {
        let out = scaler().transform(&[2500.0, 35.0, 15000.0, 1.0, 0.5]);
        assert_eq!(out[0], -0.5);
        assert_eq!(out[1], -0.5);
        assert_eq!(out[2], -0.5);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_zero_scale_only_centres() {
        let out = scaler().transform(&[0.0, 0.0, 0.0, 0.0, 0.75]);
        assert!((out[4] - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_width_rejected() {
        let s = StandardScaler {
            mean: vec![0.0; 4],
            scale: vec![1.0; 4],
        };
        let reason = s.check().unwrap_err();
        assert!(reason.contains("expects 5 features"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut s = scaler();
        s.mean[2] = f64::NAN;
        assert!(s.check().is_err());
    }
}
