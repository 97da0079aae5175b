//! Synthetic dataset error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while checking a real/synthetic dataset pair.
#[derive(Debug, Error)]
pub enum SyntheticError {
    /// The schema itself is inconsistent.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The dataset could not be opened or a record could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A schema field has no column in the dataset.
    #[error("{}: missing column '{column}' declared in schema", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A value does not match its declared field type.
    #[error("{}: row {row}, column '{column}': '{value}' is not a valid {expected}", path.display())]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    /// The dataset has a header but no rows.
    #[error("{}: dataset has no rows", .0.display())]
    EmptyDataset(PathBuf),
}
