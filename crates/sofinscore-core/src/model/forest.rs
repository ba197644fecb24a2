//! Random Forest classifier exported as flat per-tree node arrays.
//!
//! Each tree stores its nodes in parallel arrays indexed by node id, the
//! layout produced by the offline trainer:
//!
//! - `children_left[i]` / `children_right[i]`: child ids, `-1` at leaves
//! - `feature[i]` / `threshold[i]`: split column and cut point
//! - `value[i]`: per-class weights at the node
//!
//! A sample goes left when `x[feature] <= threshold`. The forest
//! probability is the mean of the normalised leaf distributions.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ScoringError;
use crate::features::FEATURE_COUNT;
use crate::ScoringResult;

/// Marker for "no child" in the children arrays.
pub const LEAF: i64 = -1;

/// Only binary models are supported: [repaid, defaulted].
pub const N_CLASSES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF
    }

    /// Walk from the root to a leaf and return its class distribution.
    ///
    /// Relies on `check`: children always point past their parent, so the
    /// walk terminates.
    fn leaf_distribution(&self, x: &[f64; FEATURE_COUNT]) -> [f64; N_CLASSES] {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let column = self.feature[node] as usize;
            // Thresholds were learned on single-precision inputs.
            let v = f64::from(x[column] as f32);
            node = if v <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let weights = &self.value[node];
        let total: f64 = weights.iter().sum();
        [weights[0] / total, weights[1] / total]
    }

    fn check(&self, index: usize, n_features: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err(format!("tree {index} has no nodes"));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!("tree {index} has node arrays of unequal length"));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!(
                        "tree {index} node {node} has exactly one child"
                    ));
                }
                let weights = &self.value[node];
                if weights.len() != N_CLASSES {
                    return Err(format!(
                        "tree {index} leaf {node} has {} class weights, expected {N_CLASSES}",
                        weights.len()
                    ));
                }
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(format!(
                        "tree {index} leaf {node} has invalid class weights"
                    ));
                }
                if weights.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("tree {index} leaf {node} has zero total weight"));
                }
                continue;
            }

            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!(
                        "tree {index} node {node} points to invalid child {child}"
                    ));
                }
            }
            let column = self.feature[node];
            if column < 0 || column >= n_features as i64 {
                return Err(format!(
                    "tree {index} node {node} splits on unknown feature {column}"
                ));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!(
                    "tree {index} node {node} has a non-finite threshold"
                ));
            }
        }
        Ok(())
    }
}

impl RandomForest {
    /// Read and validate a classifier artifact.
    pub fn load(path: &Path) -> ScoringResult<Self> {
        let forest: RandomForest = super::read_artifact(path)?;
        forest
            .check()
            .map_err(|reason| ScoringError::asset(path, reason))?;
        Ok(forest)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Class probabilities `[p(repaid), p(default)]` for a scaled sample.
    pub fn predict_proba(&self, x: &[f64; FEATURE_COUNT]) -> [f64; N_CLASSES] {
        let mut acc = [0.0; N_CLASSES];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(x);
            acc[0] += dist[0];
            acc[1] += dist[1];
        }
        let n = self.trees.len() as f64;
        [acc[0] / n, acc[1] / n]
    }

    fn check(&self) -> Result<(), String> {
        if self.n_features != FEATURE_COUNT {
            return Err(format!(
                "model was trained on {} features, expected {FEATURE_COUNT}",
                self.n_features
            ));
        }
        if self.n_classes != N_CLASSES {
            return Err(format!(
                "model has {} classes, expected a binary classifier",
                self.n_classes
            ));
        }
        if self.trees.is_empty() {
            return Err("model contains no trees".into());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(i, self.n_features)?;
        }
        Ok(())
    }
}
