//! Evaluation driver.
//!
//! Walks the labelled cases of a [`CaseSource`], classifies each one and
//! folds the results into a [`CohortResult`]. Any fatal error aborts the
//! run before a result exists.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::aggregate::CohortAggregator;
use crate::classifier::CaseWindowClassifier;
use crate::model::{CaseId, CaseResult, DegenerateReason, PredictionSet, RejectedPrediction};
use crate::report::CohortResult;
use crate::traits::CaseSource;

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_case_complete(&self, result: &CaseResult);
    fn on_case_degraded(&self, case: &CaseId, reason: &DegenerateReason);
    fn on_prediction_rejected(&self, case: &CaseId, rejected: &RejectedPrediction);
    fn on_cohort_complete(&self, total: usize, degraded: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_case_complete(&self, _: &CaseResult) {}
    fn on_case_degraded(&self, _: &CaseId, _: &DegenerateReason) {}
    fn on_prediction_rejected(&self, _: &CaseId, _: &RejectedPrediction) {}
    fn on_cohort_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Output of a full run: the cohort metrics plus every case result.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub cohort: CohortResult,
    pub cases: Vec<CaseResult>,
    pub duration: Duration,
}

/// Classify every labelled case from `source` and aggregate the cohort.
pub fn evaluate(
    source: &dyn CaseSource,
    classifier: &CaseWindowClassifier,
    progress: &dyn ProgressReporter,
) -> Result<Evaluation> {
    let start = Instant::now();
    let labels = source.labels().context("failed to load labels")?;

    tracing::info!(
        cases = labels.len(),
        days_before = classifier.config().days_before_symptoms,
        days_after = classifier.config().days_after_symptom_to_omit,
        "evaluating cohort"
    );

    let mut aggregator = CohortAggregator::new();
    let mut cases = Vec::with_capacity(labels.len());

    for label in &labels {
        let raw = source
            .predictions(&label.case)
            .with_context(|| format!("failed to load predictions for case {}", label.case))?;
        let predictions = PredictionSet::parse(&raw);

        for rejected in &predictions.rejected {
            tracing::warn!(
                case = %label.case,
                row = rejected.position,
                value = %rejected.raw,
                "ignoring unparseable prediction"
            );
            progress.on_prediction_rejected(&label.case, rejected);
        }

        let day_span = source
            .day_span(&label.case)
            .with_context(|| format!("failed to read series bounds for case {}", label.case))?;

        let result = classifier.classify(&label.case, &predictions, label.symptom_onset, day_span);

        if let Some(reason) = &result.degenerate {
            tracing::warn!(case = %label.case, "{reason}");
            progress.on_case_degraded(&label.case, reason);
        }
        tracing::debug!(
            case = %result.case,
            true_positive = result.true_positive,
            false_positives = result.false_positives,
            true_negatives = result.true_negatives,
            false_positive_rate = result.false_positive_rate,
            "classified case"
        );

        aggregator.push(&result)?;
        progress.on_case_complete(&result);
        cases.push(result);
    }

    let degraded = aggregator.degraded();
    let cohort = aggregator.finish()?;
    let duration = start.elapsed();
    progress.on_cohort_complete(cases.len(), degraded, duration);

    tracing::info!(
        true_positive_rate = cohort.true_positive_rate,
        false_positive_rate = cohort.false_positive_rate,
        combined = cohort.combined_score,
        "cohort evaluated"
    );

    Ok(Evaluation {
        cohort,
        cases,
        duration,
    })
}
