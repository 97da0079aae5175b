//! Case window classifier.
//!
//! Decides, for a single case, whether the predictions hit the lead-time
//! window before the true onset and what fraction of the observation window
//! should be counted as false alarms.
//!
//! Relative to the true onset date, every parsed prediction lands in one of
//! four windows:
//!
//! ```text
//!   too early  |  lead (TP)  | onset |  grace   |  too late
//!   ---- FP ---|[-before, 0] |       | (0, after]|--- FP ----
//! ```
//!
//! Grace predictions are neither hits nor false alarms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{CaseId, CaseResult, PredictionSet, WindowConfig};

/// Where a single prediction falls relative to the true onset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionOutcome {
    /// On or up to `days_before_symptoms` before onset.
    Lead,
    /// After onset, within `days_after_symptom_to_omit`.
    Grace,
    /// More than `days_before_symptoms` before onset.
    TooEarly,
    /// More than `days_after_symptom_to_omit` after onset.
    TooLate,
}

impl PredictionOutcome {
    pub fn is_false_positive(self) -> bool {
        matches!(self, PredictionOutcome::TooEarly | PredictionOutcome::TooLate)
    }
}

/// `fp / (fp + tn)` over the signed quiet-day count.
///
/// `fp + tn` is the observation window minus the excluded days, so it is
/// zero or negative for windows no longer than the excluded span; the rate
/// is 0 there.
pub fn false_positive_rate(false_positives: u32, true_negatives: i64) -> f64 {
    let denominator = i64::from(false_positives) + true_negatives;
    if denominator <= 0 {
        return 0.0;
    }
    (f64::from(false_positives) / denominator as f64).clamp(0.0, 1.0)
}

/// Classifies one case at a time against a fixed window configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseWindowClassifier {
    config: WindowConfig,
}

impl CaseWindowClassifier {
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Place one prediction relative to the true onset.
    pub fn outcome(&self, prediction: NaiveDate, ground_truth: NaiveDate) -> PredictionOutcome {
        let lead = ground_truth.signed_duration_since(prediction).num_days();
        let before = i64::from(self.config.days_before_symptoms);
        let after = i64::from(self.config.days_after_symptom_to_omit);

        if lead > before {
            PredictionOutcome::TooEarly
        } else if lead >= 0 {
            PredictionOutcome::Lead
        } else if -lead > after {
            PredictionOutcome::TooLate
        } else {
            PredictionOutcome::Grace
        }
    }

    /// Quiet days in the observation window: `day_span - fp - excluded_days`.
    /// Negative when the window is shorter than the excluded span.
    pub fn signed_true_negatives(&self, day_span: u32, false_positives: u32) -> i64 {
        i64::from(day_span) - i64::from(false_positives) - self.config.excluded_days()
    }

    /// Quiet days as reported per case, never below zero.
    pub fn true_negatives(&self, day_span: u32, false_positives: u32) -> u32 {
        let tn = self.signed_true_negatives(day_span, false_positives);
        u32::try_from(tn.max(0)).unwrap_or(u32::MAX)
    }

    /// Classify a single case.
    ///
    /// A case with no predictions, or none that parse, scores zero on both
    /// counts and carries the reason in [`CaseResult::degenerate`].
    pub fn classify(
        &self,
        case: &CaseId,
        predictions: &PredictionSet,
        ground_truth: NaiveDate,
        day_span: u32,
    ) -> CaseResult {
        let rejected = u32::try_from(predictions.rejected.len()).unwrap_or(u32::MAX);

        if let Some(reason) = predictions.degenerate_reason() {
            return CaseResult::degenerate(case.clone(), reason, rejected);
        }

        let mut lead_hits = 0u32;
        let mut false_positives = 0u32;
        for &prediction in &predictions.parsed {
            match self.outcome(prediction, ground_truth) {
                PredictionOutcome::Lead => lead_hits += 1,
                outcome if outcome.is_false_positive() => false_positives += 1,
                _ => {}
            }
        }

        let signed_tn = self.signed_true_negatives(day_span, false_positives);
        let true_negatives = u32::try_from(signed_tn.max(0)).unwrap_or(u32::MAX);

        CaseResult {
            case: case.clone(),
            true_positive: u8::from(lead_hits > 0),
            false_positive_rate: false_positive_rate(false_positives, signed_tn),
            lead_hits,
            false_positives,
            true_negatives,
            rejected,
            degenerate: None,
        }
    }
}
