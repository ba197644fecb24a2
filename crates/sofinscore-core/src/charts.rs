//! Portfolio overview charts.
//!
//! Both charts are illustrative. The score distribution is a fresh draw
//! from Normal(70, 15) and the decision volumes are fixed figures; neither
//! is derived from real predictions.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use crate::decision::Decision;
use crate::error::ScoringError;
use crate::ScoringResult;

pub const DISTRIBUTION_SAMPLES: usize = 1000;
pub const DISTRIBUTION_MEAN: f64 = 70.0;
pub const DISTRIBUTION_STD_DEV: f64 = 15.0;
pub const HISTOGRAM_BINS: usize = 20;

/// Illustrative decision split for the bar chart.
pub const DECISION_VOLUMES: [(Decision, &str, u32); 3] = [
    (Decision::Approved, "Approuvés", 750),
    (Decision::ManualReview, "Revue Manuelle", 150),
    (Decision::Rejected, "Refusés", 100),
];

/// A single histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
    pub frequency: f64,
}

/// Synthetic "Distribution des Scores" series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub title: String,
    /// Raw draws in generation order (the area view).
    pub samples: Vec<f64>,
    pub histogram: Vec<HistogramBin>,
    pub sample_mean: f64,
    pub sample_std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionVolume {
    pub category: Decision,
    pub label: String,
    pub volume: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioCharts {
    pub score_distribution: ScoreDistribution,
    pub decision_volumes: Vec<DecisionVolume>,
}

/// Draw `n` samples from Normal(mean, std_dev).
pub fn score_distribution(
    n: usize,
    mean: f64,
    std_dev: f64,
    seed: Option<u64>,
) -> ScoringResult<ScoreDistribution> {
    if n == 0 {
        return Err(ScoringError::InvalidInput {
            field: "samples".into(),
            reason: "At least one sample is required.".into(),
        });
    }
    let normal = Normal::new(mean, std_dev).map_err(|e| ScoringError::InvalidInput {
        field: "distribution".into(),
        reason: format!("Invalid Normal parameters: {e}"),
    })?;

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let samples: Vec<f64> = (0..n).map(|_| rng.sample(normal)).collect();

    let count = n as f64;
    let sample_mean = samples.iter().sum::<f64>() / count;
    let variance = samples
        .iter()
        .map(|v| (v - sample_mean).powi(2))
        .sum::<f64>()
        / count;

    let mut sorted = samples.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(ScoreDistribution {
        title: "Distribution des Scores".into(),
        histogram: build_histogram(&sorted, HISTOGRAM_BINS),
        samples,
        sample_mean,
        sample_std_dev: variance.sqrt(),
    })
}

/// The fixed decision-volume bars.
pub fn decision_volumes() -> Vec<DecisionVolume> {
    DECISION_VOLUMES
        .iter()
        .map(|(category, label, volume)| DecisionVolume {
            category: *category,
            label: (*label).to_string(),
            volume: *volume,
        })
        .collect()
}

/// Both overview charts. Pass a seed for a reproducible distribution.
pub fn render_charts(seed: Option<u64>) -> ScoringResult<PortfolioCharts> {
    Ok(PortfolioCharts {
        score_distribution: score_distribution(
            DISTRIBUTION_SAMPLES,
            DISTRIBUTION_MEAN,
            DISTRIBUTION_STD_DEV,
            seed,
        )?,
        decision_volumes: decision_volumes(),
    })
}

/// Equal-width histogram over a **sorted**, non-empty slice.
fn build_histogram(sorted: &[f64], num_bins: usize) -> Vec<HistogramBin> {
    let min_val = sorted[0];
    let max_val = sorted[sorted.len() - 1];

    if (max_val - min_val).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lower: min_val,
            upper: max_val,
            count: sorted.len() as u32,
            frequency: 1.0,
        }];
    }

    let bin_width = (max_val - min_val) / num_bins as f64;
    let n = sorted.len() as f64;

    let mut bins: Vec<HistogramBin> = (0..num_bins)
        .map(|i| HistogramBin {
            lower: min_val + i as f64 * bin_width,
            upper: if i == num_bins - 1 {
                max_val
            } else {
                min_val + (i + 1) as f64 * bin_width
            },
            count: 0,
            frequency: 0.0,
        })
        .collect();

    for &val in sorted {
        let idx = (((val - min_val) / bin_width).floor() as usize).min(num_bins - 1);
        bins[idx].count += 1;
    }
    for bin in &mut bins {
        bin.frequency = bin.count as f64 / n;
    }
    bins
}
