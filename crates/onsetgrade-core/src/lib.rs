//! onsetgrade-core: case window classification and cohort scoring.
//!
//! This crate defines the data model, the case window classifier, the
//! cohort aggregator, and the evaluation driver that the rest of onsetgrade
//! builds on.

pub mod aggregate;
pub mod classifier;
pub mod date;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod traits;

pub use aggregate::{aggregate, CohortAggregator};
pub use classifier::{CaseWindowClassifier, PredictionOutcome};
pub use engine::{evaluate, Evaluation, NoopReporter, ProgressReporter};
pub use error::EvalError;
pub use model::{CaseId, CaseResult, LabelledCase, PredictionSet, WindowConfig};
pub use report::CohortResult;
pub use traits::{CaseSource, InMemoryCaseSource};
