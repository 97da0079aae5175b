//! Table schema shared by the real and synthetic datasets.
//!
//! Serializes to the metadata layout detection scorers expect:
//!
//! ```json
//! {
//!   "fields": {
//!     "case": {"type": "categorical"},
//!     "heart_rate": {"type": "numerical", "subtype": "float"}
//!   },
//!   "entity_columns": ["case"]
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SyntheticError;

/// Storage type of a numerical field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericalSubtype {
    #[default]
    Float,
    Integer,
}

/// Declared type of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    Categorical,
    #[serde(alias = "datetime64[ns]")]
    Datetime,
    Numerical {
        #[serde(default)]
        subtype: NumericalSubtype,
    },
    #[serde(alias = "bool")]
    Boolean,
}

impl FieldType {
    /// Short name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Categorical => "categorical",
            FieldType::Datetime => "datetime",
            FieldType::Numerical {
                subtype: NumericalSubtype::Float,
            } => "float",
            FieldType::Numerical {
                subtype: NumericalSubtype::Integer,
            } => "integer",
            FieldType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column types plus the columns identifying each entity's series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub fields: BTreeMap<String, FieldType>,
    #[serde(default)]
    pub entity_columns: Vec<String>,
}

impl TableSchema {
    /// The heart-rate monitoring layout: one series per case.
    pub fn heart_rate() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("case".to_string(), FieldType::Categorical);
        fields.insert("timestamp".to_string(), FieldType::Datetime);
        fields.insert(
            "heart_rate".to_string(),
            FieldType::Numerical {
                subtype: NumericalSubtype::Float,
            },
        );
        fields.insert("symptom_onset".to_string(), FieldType::Boolean);
        Self {
            fields,
            entity_columns: vec!["case".to_string()],
        }
    }

    /// Load a schema from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schema from {}", path.display()))?;
        let schema: TableSchema =
            serde_json::from_str(&content).context("failed to parse schema JSON")?;
        schema.validate()?;
        Ok(schema)
    }

    /// Check the schema is self-consistent.
    pub fn validate(&self) -> Result<(), SyntheticError> {
        if self.fields.is_empty() {
            return Err(SyntheticError::InvalidSchema("no fields declared".into()));
        }
        for entity in &self.entity_columns {
            if !self.fields.contains_key(entity) {
                return Err(SyntheticError::InvalidSchema(format!(
                    "entity column '{entity}' is not a declared field"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heart_rate_schema_layout() {
        let value = serde_json::to_value(TableSchema::heart_rate()).unwrap();
        assert_eq!(value["fields"]["case"]["type"], "categorical");
        assert_eq!(value["fields"]["timestamp"]["type"], "datetime");
        assert_eq!(value["fields"]["heart_rate"]["type"], "numerical");
        assert_eq!(value["fields"]["heart_rate"]["subtype"], "float");
        assert_eq!(value["fields"]["symptom_onset"]["type"], "boolean");
        assert_eq!(value["entity_columns"][0], "case");
        assert!(TableSchema::heart_rate().validate().is_ok());
    }

    #[test]
    fn accepts_legacy_type_names() {
        let json = r#"{
            "fields": {
                "case": {"type": "categorical"},
                "timestamp": {"type": "datetime64[ns]"},
                "heart_rate": {"type": "numerical", "subtype": "float"},
                "symptom_onset": {"type": "bool"}
            },
            "entity_columns": ["case"]
        }"#;
        let schema: TableSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema, TableSchema::heart_rate());
    }

    #[test]
    fn numerical_subtype_defaults_to_float() {
        let field: FieldType = serde_json::from_str(r#"{"type": "numerical"}"#).unwrap();
        assert_eq!(
            field,
            FieldType::Numerical {
                subtype: NumericalSubtype::Float
            }
        );
    }

    #[test]
    fn entity_column_must_be_declared() {
        let mut schema = TableSchema::heart_rate();
        schema.entity_columns = vec!["subject".into()];
        assert!(matches!(
            schema.validate(),
            Err(SyntheticError::InvalidSchema(_))
        ));
    }

    #[test]
    fn load_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            serde_json::to_string(&TableSchema::heart_rate()).unwrap(),
        )
        .unwrap();
        assert_eq!(
            TableSchema::load_json(&path).unwrap(),
            TableSchema::heart_rate()
        );
    }
}
