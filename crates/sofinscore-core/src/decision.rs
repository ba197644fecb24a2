//! Default probability to advisor decision.
//!
//! Bands are closed-open on the raw model probability:
//!
//! | Probability      | Decision     |
//! |------------------|--------------|
//! | p < 0.35         | Approved     |
//! | 0.35 <= p < 0.60 | ManualReview |
//! | p >= 0.60        | Rejected     |
//!
//! The reliability score is display-only and never feeds the banding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::applicant::ApplicantInput;
use crate::features::{compute_features, FeatureVector, FEATURE_NAMES};
use crate::model::ModelBundle;
use crate::types::{with_metadata, ComputationOutput, Probability};
use crate::ScoringResult;

/// Below this the file is approved outright.
pub const APPROVAL_THRESHOLD: Probability = 0.35;
/// Below this (and at or above approval) the file goes to an advisor.
pub const MANUAL_REVIEW_THRESHOLD: Probability = 0.60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    ManualReview,
    Rejected,
}

/// Visual treatment for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
}

impl Decision {
    /// Band a raw default probability.
    pub fn from_probability(p: Probability) -> Self {
        if p < APPROVAL_THRESHOLD {
            Decision::Approved
        } else if p < MANUAL_REVIEW_THRESHOLD {
            Decision::ManualReview
        } else {
            Decision::Rejected
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Decision::Approved => Tone::Success,
            Decision::ManualReview => Tone::Warning,
            Decision::Rejected => Tone::Error,
        }
    }

    /// Banner text shown to the advisor.
    pub fn banner(self) -> String {
        format!("DÉCISION : {self}")
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Approved => write!(f, "APPROUVÉ"),
            Decision::ManualReview => write!(f, "REVUE MANUELLE"),
            Decision::Rejected => write!(f, "REFUSÉ"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Model probability of the default class.
    pub default_probability: Probability,
    /// `default_probability` as a percentage, two decimals.
    pub default_probability_pct: Decimal,
    /// `(1 - p) * 100`, one decimal.
    pub reliability_score: Decimal,
    pub decision: Decision,
    /// Vector the model was called with, in training order.
    pub features: FeatureVector,
}

/// `round((1 - p) * 100, 1)`.
pub fn reliability_score(p: Probability) -> Decimal {
    round_f64((1.0 - p) * 100.0, 1)
}

/// `round(p * 100, 2)`.
pub fn probability_pct(p: Probability) -> Decimal {
    round_f64(p * 100.0, 2)
}

// Round the exact binary value half-to-even, always carrying `dp` places.
fn round_f64(v: f64, dp: u32) -> Decimal {
    let mut rounded = Decimal::from_f64_retain(v)
        .unwrap_or_default()
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(dp);
    rounded
}

/// Score a feature vector against the bundle.
pub fn predict(bundle: &ModelBundle, features: &FeatureVector) -> PredictionResult {
    let proba = bundle.predict_proba(&features.to_array());
    let p = proba[1];
    let decision = Decision::from_probability(p);
    tracing::debug!(probability = p, ?decision, "applicant scored");
    PredictionResult {
        default_probability: p,
        default_probability_pct: probability_pct(p),
        reliability_score: reliability_score(p),
        decision,
        features: *features,
    }
}

/// Validate the controls, derive features and score them.
pub fn evaluate(
    bundle: &ModelBundle,
    input: &ApplicantInput,
) -> ScoringResult<ComputationOutput<PredictionResult>> {
    let start = Instant::now();
    input.validate()?;

    let features = compute_features(input);
    let result = predict(bundle, &features);

    let assumptions = serde_json::json!({
        "feature_order": FEATURE_NAMES,
        "approval_threshold": APPROVAL_THRESHOLD,
        "manual_review_threshold": MANUAL_REVIEW_THRESHOLD,
        "trees": bundle.classifier.n_trees(),
        "models_dir": bundle.source.display().to_string(),
    });

    Ok(with_metadata(
        "Random Forest default probability on standardised features",
        &assumptions,
        Vec::new(),
        start,
        result,
    ))
}
