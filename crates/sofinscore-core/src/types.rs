use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Monetary amounts entered by the advisor (EUR).
pub type Money = Decimal;

/// Model probabilities. The artifacts are IEEE floats, so these stay `f64`.
pub type Probability = f64;

const ENGINE: &str = "sofinscore";
const PRECISION: &str = "ieee754_f64";

/// Envelope around every scoring result handed to a front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// Model and threshold facts the result depends on.
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub engine: String,
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap `result`, timing from `started`.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    started: Instant,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.into(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            engine: ENGINE.into(),
            version: env!("CARGO_PKG_VERSION").into(),
            computation_time_us: started.elapsed().as_micros() as u64,
            precision: PRECISION.into(),
        },
    }
}
