//! Synthetic data checks for onsetgrade.
//!
//! Validates a real/synthetic dataset pair against a shared table schema and
//! hands it to a detection scorer.

pub mod command;
pub mod dataset;
pub mod error;
pub mod mock;
pub mod schema;
pub mod scorer;

pub use command::CommandScorer;
pub use dataset::{validate_dataset, DatasetSummary};
pub use error::SyntheticError;
pub use mock::FixedScorer;
pub use schema::{FieldType, NumericalSubtype, TableSchema};
pub use scorer::{
    evaluate_synthetic, DetectionRequest, DetectionScore, DetectionScorer, SyntheticEvaluation,
};
