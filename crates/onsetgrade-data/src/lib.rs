//! onsetgrade-data: CSV inputs and configuration.
//!
//! Reads the label, prediction and per-case series files and exposes them to
//! the evaluation driver as a [`onsetgrade_core::traits::CaseSource`].

pub mod config;
pub mod error;
pub mod loader;
pub mod source;
pub mod validate;

pub use config::{load_config, load_config_from, OnsetgradeConfig};
pub use error::DataError;
pub use source::{CsvCaseSource, InputPaths};
pub use validate::{validate_inputs, InputIssue, Severity};
