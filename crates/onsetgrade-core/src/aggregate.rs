//! Cohort aggregation.
//!
//! Folds per-case classifier output into cohort-level rates:
//!
//! - true positive rate = cases with a hit / all cases
//! - false positive rate = mean of the per-case false positive rates
//! - combined score = (TPR + (1 - FPR)) / 2
//!
//! Degenerate cases count as misses with a zero false positive rate, which
//! pulls the cohort FPR down.

use std::collections::BTreeMap;

use crate::error::EvalError;
use crate::model::{CaseId, CaseResult};
use crate::report::CohortResult;

/// Average of the true positive rate and the complement of the false
/// positive rate.
pub fn combined_score(true_positive_rate: f64, false_positive_rate: f64) -> f64 {
    (true_positive_rate + (1.0 - false_positive_rate)) / 2.0
}

/// Accumulates case results until the cohort is finalized.
#[derive(Debug, Default)]
pub struct CohortAggregator {
    true_positive: BTreeMap<CaseId, u8>,
    false_positive_rate: BTreeMap<CaseId, f64>,
    degraded: usize,
}

impl CohortAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one case. Each case may only be recorded once.
    pub fn push(&mut self, result: &CaseResult) -> Result<(), EvalError> {
        if self.true_positive.contains_key(&result.case) {
            return Err(EvalError::DuplicateCase(result.case.clone()));
        }
        if result.degenerate.is_some() {
            self.degraded += 1;
        }
        self.true_positive
            .insert(result.case.clone(), result.true_positive);
        self.false_positive_rate
            .insert(result.case.clone(), result.false_positive_rate);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.true_positive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.true_positive.is_empty()
    }

    /// Cases recorded with degenerate input so far.
    pub fn degraded(&self) -> usize {
        self.degraded
    }

    /// Compute the cohort rates. Fails if no case was recorded.
    pub fn finish(self) -> Result<CohortResult, EvalError> {
        if self.is_empty() {
            return Err(EvalError::EmptyCohort);
        }

        let n = self.len() as f64;
        let hits = self.true_positive.values().filter(|&&tp| tp == 1).count();
        let true_positive_rate = hits as f64 / n;
        let false_positive_rate = self.false_positive_rate.values().sum::<f64>() / n;

        Ok(CohortResult {
            true_positive_rate,
            false_positive_rate,
            combined_score: combined_score(true_positive_rate, false_positive_rate),
            true_positive_per_case: self.true_positive,
            false_positive_per_case: self.false_positive_rate,
        })
    }
}

/// Aggregate a complete set of case results in one pass.
pub fn aggregate<'a, I>(results: I) -> Result<CohortResult, EvalError>
where
    I: IntoIterator<Item = &'a CaseResult>,
{
    let mut aggregator = CohortAggregator::new();
    for result in results {
        aggregator.push(result)?;
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DegenerateReason;

    fn result(case: &str, tp: u8, fpr: f64) -> CaseResult {
        CaseResult {
            case: CaseId::from(case),
            true_positive: tp,
            false_positive_rate: fpr,
            lead_hits: u32::from(tp),
            false_positives: 0,
            true_negatives: 0,
            rejected: 0,
            degenerate: None,
        }
    }

    #[test]
    fn three_case_cohort() {
        let results = vec![
            result("a", 1, 0.1),
            result("b", 0, 0.0),
            result("c", 1, 0.2),
        ];
        let cohort = aggregate(&results).unwrap();

        assert!((cohort.true_positive_rate - 2.0 / 3.0).abs() < 1e-12);
        assert!((cohort.false_positive_rate - 0.1).abs() < 1e-12);
        assert!((cohort.combined_score - 0.7833).abs() < 1e-3);
        assert_eq!(cohort.true_positive_per_case[&CaseId::from("b")], 0);
        assert_eq!(cohort.false_positive_per_case[&CaseId::from("c")], 0.2);
    }

    #[test]
    fn order_does_not_change_rates() {
        let forward = vec![
            result("a", 1, 0.1),
            result("b", 0, 0.0),
            result("c", 1, 0.2),
            result("d", 0, 0.35),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(2);

        let expected = aggregate(&forward).unwrap();
        for permutation in [reversed, rotated] {
            let cohort = aggregate(&permutation).unwrap();
            assert_eq!(cohort.true_positive_rate, expected.true_positive_rate);
            assert_eq!(cohort.false_positive_rate, expected.false_positive_rate);
            assert_eq!(cohort.combined_score, expected.combined_score);
        }
    }

    #[test]
    fn degenerate_cases_pull_the_mean_down() {
        let mut aggregator = CohortAggregator::new();
        aggregator.push(&result("a", 1, 0.4)).unwrap();
        aggregator
            .push(&CaseResult::degenerate(
                CaseId::from("b"),
                DegenerateReason::NoPredictions,
                0,
            ))
            .unwrap();
        assert_eq!(aggregator.degraded(), 1);

        let cohort = aggregator.finish().unwrap();
        assert!((cohort.false_positive_rate - 0.2).abs() < 1e-12);
        assert!((cohort.true_positive_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_cohort_is_an_error() {
        assert!(matches!(
            CohortAggregator::new().finish(),
            Err(EvalError::EmptyCohort)
        ));
    }

    #[test]
    fn duplicate_case_is_rejected() {
        let mut aggregator = CohortAggregator::new();
        aggregator.push(&result("a", 1, 0.0)).unwrap();
        let err = aggregator.push(&result("a", 0, 0.5)).unwrap_err();
        assert!(matches!(err, EvalError::DuplicateCase(ref c) if c.as_str() == "a"));
        assert_eq!(aggregator.len(), 1);
    }

    #[test]
    fn combined_score_bounds() {
        assert_eq!(combined_score(1.0, 0.0), 1.0);
        assert_eq!(combined_score(0.0, 1.0), 0.0);
        assert_eq!(combined_score(0.5, 0.5), 0.5);
    }
}
