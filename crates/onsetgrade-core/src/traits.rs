//! The data access seam.
//!
//! The evaluation driver only sees cases through [`CaseSource`]. The
//! `onsetgrade-data` crate implements it over CSV files; the in-memory
//! implementation here backs tests and embedding.

use std::collections::HashMap;

use crate::error::EvalError;
use crate::model::{CaseId, LabelledCase};

/// Supplies the labelled cases, their raw predictions and series spans.
pub trait CaseSource {
    /// Labelled cases, in evaluation order.
    fn labels(&self) -> anyhow::Result<Vec<LabelledCase>>;

    /// Raw predicted onset values for a case, in supplied order.
    ///
    /// Values are parsed by the caller; a source must not drop rows it
    /// cannot read.
    fn predictions(&self, case: &CaseId) -> anyhow::Result<Vec<String>>;

    /// Days between the first and last observed dates of the case's series.
    fn day_span(&self, case: &CaseId) -> anyhow::Result<u32>;
}

/// A [`CaseSource`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseSource {
    labels: Vec<LabelledCase>,
    predictions: HashMap<CaseId, Vec<String>>,
    day_spans: HashMap<CaseId, u32>,
}

impl InMemoryCaseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a labelled case with its observation span.
    pub fn with_case(
        mut self,
        case: impl Into<CaseId>,
        symptom_onset: chrono::NaiveDate,
        day_span: u32,
    ) -> Self {
        let case = case.into();
        self.day_spans.insert(case.clone(), day_span);
        self.labels.push(LabelledCase {
            case,
            symptom_onset,
        });
        self
    }

    /// Append a raw prediction for a case.
    pub fn with_prediction(mut self, case: impl Into<CaseId>, raw: impl Into<String>) -> Self {
        self.predictions
            .entry(case.into())
            .or_default()
            .push(raw.into());
        self
    }
}

impl CaseSource for InMemoryCaseSource {
    fn labels(&self) -> anyhow::Result<Vec<LabelledCase>> {
        Ok(self.labels.clone())
    }

    fn predictions(&self, case: &CaseId) -> anyhow::Result<Vec<String>> {
        Ok(self.predictions.get(case).cloned().unwrap_or_default())
    }

    fn day_span(&self, case: &CaseId) -> anyhow::Result<u32> {
        self.day_spans
            .get(case)
            .copied()
            .ok_or_else(|| EvalError::MissingSeries(case.clone()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn in_memory_source_round_trips_inputs() {
        let onset = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let source = InMemoryCaseSource::new()
            .with_case("a", onset, 40)
            .with_prediction("a", "2020-04-28")
            .with_prediction("a", "garbage");

        let labels = source.labels().unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].symptom_onset, onset);

        let a = CaseId::from("a");
        assert_eq!(source.predictions(&a).unwrap(), vec!["2020-04-28", "garbage"]);
        assert_eq!(source.day_span(&a).unwrap(), 40);
    }

    #[test]
    fn unknown_case_has_no_predictions_and_no_series() {
        let source = InMemoryCaseSource::new();
        let ghost = CaseId::from("ghost");
        assert!(source.predictions(&ghost).unwrap().is_empty());

        let err = source.day_span(&ghost).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EvalError>(),
            Some(EvalError::MissingSeries(_))
        ));
    }
}
