//! Detection scorer trait and the validate-then-score workflow.
//!
//! A detection scorer trains some classifier to tell real series from
//! synthetic ones and reports a single number. onsetgrade does not interpret
//! that number; it only checks the inputs and forwards the result.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::dataset::{validate_dataset, DatasetSummary};
use crate::schema::TableSchema;

/// A real/synthetic dataset pair sharing one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRequest {
    pub real: PathBuf,
    pub synthetic: PathBuf,
    pub schema: TableSchema,
}

/// What a scorer returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionScore {
    pub score: f64,
    pub duration_ms: u64,
}

/// Trait for backends that score how distinguishable synthetic data is.
#[async_trait]
pub trait DetectionScorer: Send + Sync {
    /// Human-readable scorer name.
    fn name(&self) -> &str;

    /// Score a dataset pair. Inputs have already been validated.
    async fn score(&self, request: &DetectionRequest) -> Result<DetectionScore>;
}

/// Result of a full synthetic evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticEvaluation {
    pub real: DatasetSummary,
    pub synthetic: DatasetSummary,
    pub score: DetectionScore,
}

/// Validate both datasets against the schema, then score them.
pub async fn evaluate_synthetic(
    scorer: &dyn DetectionScorer,
    request: &DetectionRequest,
) -> Result<SyntheticEvaluation> {
    request.schema.validate()?;
    let real = validate_dataset(&request.real, &request.schema)?;
    let synthetic = validate_dataset(&request.synthetic, &request.schema)?;

    tracing::info!(
        scorer = scorer.name(),
        real_rows = real.rows,
        synthetic_rows = synthetic.rows,
        "scoring synthetic dataset"
    );

    let start = Instant::now();
    let mut score = scorer.score(request).await?;
    if score.duration_ms == 0 {
        score.duration_ms = start.elapsed().as_millis() as u64;
    }

    tracing::info!(score = score.score, duration_ms = score.duration_ms, "detection score");

    Ok(SyntheticEvaluation {
        real,
        synthetic,
        score,
    })
}
