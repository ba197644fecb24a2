pub mod applicant;
pub mod decision;
pub mod error;
pub mod features;
pub mod model;
pub mod types;

#[cfg(feature = "charts")]
pub mod charts;

#[cfg(feature = "charts")]
pub mod dashboard;

pub use error::ScoringError;
pub use types::*;

/// Standard result type for all scoring operations
pub type ScoringResult<T> = Result<T, ScoringError>;
