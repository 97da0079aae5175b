//! Dry-run checks over a set of inputs.

use std::fmt;

use onsetgrade_core::model::CaseId;
use onsetgrade_core::traits::CaseSource;

use crate::source::CsvCaseSource;

/// How bad an input issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Evaluation will still run.
    Warning,
    /// Evaluation would abort.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A problem found in the inputs.
#[derive(Debug, Clone)]
pub struct InputIssue {
    pub severity: Severity,
    /// The case ID (if applicable).
    pub case: Option<CaseId>,
    pub message: String,
}

/// Check every labelled case without scoring anything.
///
/// Labels and predictions are already validated by [`CsvCaseSource::open`];
/// this walks the series files and flags inputs that would be ignored or
/// scored as degenerate.
pub fn validate_inputs(source: &CsvCaseSource) -> Vec<InputIssue> {
    let mut issues = Vec::new();

    for case in source.unlabelled_prediction_cases() {
        issues.push(InputIssue {
            severity: Severity::Warning,
            message: "predictions given for a case with no label, they will be ignored".into(),
            case: Some(case),
        });
    }

    for case in source.cases_without_predictions() {
        issues.push(InputIssue {
            severity: Severity::Warning,
            message: "no predictions, case will score zero".into(),
            case: Some(case),
        });
    }

    for label in source.labelled_cases() {
        if let Err(e) = source.day_span(&label.case) {
            issues.push(InputIssue {
                severity: Severity::Error,
                message: format!("{e:#}"),
                case: Some(label.case.clone()),
            });
        }
    }

    issues
}
