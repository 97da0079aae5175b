//! CSV loaders for labels, predictions and per-case series.
//!
//! Column names are fixed: `case` and `symptom_onset` for labels and
//! predictions, `timestamp` for the series files. Extra columns are ignored.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use onsetgrade_core::date::{day_span, parse_ground_truth};
use onsetgrade_core::error::EvalError;
use onsetgrade_core::model::{CaseId, LabelledCase};

use crate::error::DataError;

pub const CASE_COLUMN: &str = "case";
pub const ONSET_COLUMN: &str = "symptom_onset";
pub const TIMESTAMP_COLUMN: &str = "timestamp";

fn open(path: &Path) -> Result<csv::Reader<File>, DataError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::csv(path, e))
}

fn column_index(
    reader: &mut csv::Reader<File>,
    path: &Path,
    column: &'static str,
) -> Result<usize, DataError> {
    let headers = reader.headers().map_err(|e| DataError::csv(path, e))?;
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DataError::MissingColumn {
            path: path.to_path_buf(),
            column,
        })
}

/// Read `(case, symptom_onset)` pairs in file order, values untouched.
fn read_onset_rows(path: &Path) -> Result<Vec<(CaseId, String)>, DataError> {
    let mut reader = open(path)?;
    let case_idx = column_index(&mut reader, path, CASE_COLUMN)?;
    let onset_idx = column_index(&mut reader, path, ONSET_COLUMN)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DataError::csv(path, e))?;
        let case = record.get(case_idx).unwrap_or_default();
        let onset = record.get(onset_idx).unwrap_or_default();
        rows.push((CaseId::from(case), onset.to_string()));
    }
    Ok(rows)
}

/// Load the ground-truth labels, one row per case.
///
/// Unparseable onset dates and repeated cases are fatal.
pub fn load_labels(path: &Path) -> Result<Vec<LabelledCase>, DataError> {
    let rows = read_onset_rows(path)?;
    let mut seen = HashSet::new();
    let mut labels = Vec::with_capacity(rows.len());

    for (case, raw) in rows {
        if !seen.insert(case.clone()) {
            return Err(DataError::DuplicateLabel {
                path: path.to_path_buf(),
                case,
            });
        }
        let symptom_onset = parse_ground_truth(&case, &raw)?;
        labels.push(LabelledCase {
            case,
            symptom_onset,
        });
    }

    tracing::debug!(path = %path.display(), cases = labels.len(), "loaded labels");
    Ok(labels)
}

/// Load the predictions, grouped by case in file order.
pub fn load_predictions(path: &Path) -> Result<HashMap<CaseId, Vec<String>>, DataError> {
    let rows = read_onset_rows(path)?;
    let total = rows.len();
    let mut by_case: HashMap<CaseId, Vec<String>> = HashMap::new();
    for (case, raw) in rows {
        by_case.entry(case).or_default().push(raw);
    }

    tracing::debug!(
        path = %path.display(),
        rows = total,
        cases = by_case.len(),
        "loaded predictions"
    );
    Ok(by_case)
}

/// Where the observation series for `case` lives.
///
/// The id must be a plain file name; ids that could resolve outside
/// `series_dir` are rejected.
pub fn series_path(series_dir: &Path, case: &CaseId) -> Result<PathBuf, DataError> {
    let id = case.as_str();
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
        return Err(DataError::InvalidCaseId { case: case.clone() });
    }
    Ok(series_dir.join(format!("{id}.csv")))
}

/// The first and last `timestamp` values of a series file, if it has rows.
pub fn read_series_bounds(path: &Path) -> Result<Option<(String, String)>, DataError> {
    let mut reader = open(path)?;
    let idx = column_index(&mut reader, path, TIMESTAMP_COLUMN)?;

    let mut first: Option<String> = None;
    let mut last: Option<String> = None;
    for record in reader.records() {
        let record = record.map_err(|e| DataError::csv(path, e))?;
        let value = record.get(idx).unwrap_or_default().to_string();
        if first.is_none() {
            first = Some(value.clone());
        }
        last = Some(value);
    }

    Ok(first.zip(last))
}

/// Days covered by the series of `case` under `series_dir`.
pub fn load_day_span(series_dir: &Path, case: &CaseId) -> Result<u32, DataError> {
    let path = series_path(series_dir, case)?;
    if !path.is_file() {
        return Err(DataError::SeriesNotFound {
            case: case.clone(),
            path,
        });
    }

    let (first, last) =
        read_series_bounds(&path)?.ok_or_else(|| EvalError::EmptySeries(case.clone()))?;
    Ok(day_span(case, &first, &last)?)
}
