//! Input error types.

use std::path::PathBuf;

use thiserror::Error;

use onsetgrade_core::error::EvalError;
use onsetgrade_core::model::CaseId;

/// Errors raised while reading evaluation inputs. All of them are fatal.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file could not be opened or a record could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("{}: missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A case appears more than once in the labels file.
    #[error("{}: case {case} is labelled more than once", path.display())]
    DuplicateLabel { path: PathBuf, case: CaseId },

    /// No series file exists for a labelled case.
    #[error("case {case}: series file {} not found", path.display())]
    SeriesNotFound { case: CaseId, path: PathBuf },

    /// The case id cannot be used as a series file name.
    #[error("case {case}: id is not a valid series file name")]
    InvalidCaseId { case: CaseId },

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl DataError {
    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        DataError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}
