//! Dataset checks against a [`TableSchema`].
//!
//! Both datasets of a pair are checked before anything is handed to a
//! scorer, so a scorer never sees a file that does not match its schema.
//! Empty cells are treated as missing values and always accepted.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use onsetgrade_core::date::parse_date;

use crate::error::SyntheticError;
use crate::schema::{FieldType, NumericalSubtype, TableSchema};

/// Shape of a dataset that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub path: PathBuf,
    pub rows: usize,
    /// Distinct entity keys (0 when the schema declares no entity columns).
    pub entities: usize,
}

fn value_matches(field: FieldType, value: &str) -> bool {
    match field {
        FieldType::Categorical => true,
        FieldType::Datetime => parse_date(value).is_some(),
        FieldType::Numerical {
            subtype: NumericalSubtype::Float,
        } => value.parse::<f64>().is_ok(),
        FieldType::Numerical {
            subtype: NumericalSubtype::Integer,
        } => value.parse::<i64>().is_ok(),
        FieldType::Boolean => matches!(
            value.to_ascii_lowercase().as_str(),
            "true" | "false" | "1" | "0"
        ),
    }
}

/// Check that every schema field is present and every value fits its type.
pub fn validate_dataset(
    path: &Path,
    schema: &TableSchema,
) -> Result<DatasetSummary, SyntheticError> {
    let csv_err = |source: csv::Error| SyntheticError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut columns = Vec::with_capacity(schema.fields.len());
    for (name, &field) in &schema.fields {
        let idx = headers.iter().position(|h| h == name.as_str()).ok_or_else(|| {
            SyntheticError::MissingColumn {
                path: path.to_path_buf(),
                column: name.clone(),
            }
        })?;
        columns.push((name.as_str(), idx, field));
    }

    let entity_idx: Vec<usize> = schema
        .entity_columns
        .iter()
        .filter_map(|e| headers.iter().position(|h| h == e.as_str()))
        .collect();

    let mut rows = 0usize;
    let mut entities: HashSet<Vec<String>> = HashSet::new();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        rows += 1;

        for &(name, idx, field) in &columns {
            let value = record.get(idx).unwrap_or_default();
            if !value.is_empty() && !value_matches(field, value) {
                return Err(SyntheticError::InvalidValue {
                    path: path.to_path_buf(),
                    row: row + 1,
                    column: name.to_string(),
                    value: value.to_string(),
                    expected: field.name(),
                });
            }
        }

        if !entity_idx.is_empty() {
            let key = entity_idx
                .iter()
                .map(|&i| record.get(i).unwrap_or_default().to_string())
                .collect();
            entities.insert(key);
        }
    }

    if rows == 0 {
        return Err(SyntheticError::EmptyDataset(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), rows, entities = entities.len(), "dataset matches schema");

    Ok(DatasetSummary {
        path: path.to_path_buf(),
        rows,
        entities: entities.len(),
    })
}
