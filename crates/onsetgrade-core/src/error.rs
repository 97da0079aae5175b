//! Evaluation error types.
//!
//! These are the run-level failures that abort an evaluation. Per-case
//! problems with predictions are not errors; they degrade the case instead
//! (see [`crate::model::DegenerateReason`]).

use thiserror::Error;

use crate::model::CaseId;

/// Fatal errors raised while evaluating a cohort.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A ground-truth onset date could not be parsed.
    #[error("case {case}: invalid ground-truth onset date '{value}'")]
    InvalidGroundTruth { case: CaseId, value: String },

    /// A case's observation series has no rows.
    #[error("case {0}: observation series is empty")]
    EmptySeries(CaseId),

    /// A timestamp bounding a case's observation series could not be parsed.
    #[error("case {case}: invalid series timestamp '{value}'")]
    InvalidTimestamp { case: CaseId, value: String },

    /// The last observed date precedes the first one.
    #[error("case {case}: series ends ({last}) before it starts ({first})")]
    UnorderedSeries {
        case: CaseId,
        first: chrono::NaiveDate,
        last: chrono::NaiveDate,
    },

    /// No observation series is available for a labelled case.
    #[error("case {0}: no observation series available")]
    MissingSeries(CaseId),

    /// The same case was labelled or aggregated twice.
    #[error("duplicate case: {0}")]
    DuplicateCase(CaseId),

    /// There were no cases to evaluate.
    #[error("cohort is empty, no rates can be computed")]
    EmptyCohort,
}

impl EvalError {
    /// The case this error refers to, if any.
    pub fn case(&self) -> Option<&CaseId> {
        match self {
            EvalError::InvalidGroundTruth { case, .. }
            | EvalError::InvalidTimestamp { case, .. }
            | EvalError::UnorderedSeries { case, .. } => Some(case),
            EvalError::EmptySeries(case)
            | EvalError::MissingSeries(case)
            | EvalError::DuplicateCase(case) => Some(case),
            EvalError::EmptyCohort => None,
        }
    }
}
