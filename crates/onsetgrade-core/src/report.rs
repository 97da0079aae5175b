//! Cohort result type with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::CaseId;

/// Final metrics for one evaluation run.
///
/// Serializes to the published metrics document, encoded exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortResult {
    /// Fraction of cases with a prediction in the lead-time window.
    pub true_positive_rate: f64,
    /// Mean of the per-case false positive rates.
    pub false_positive_rate: f64,
    /// `(TPR + (1 - FPR)) / 2`.
    #[serde(rename = "combined_btpr_fpr")]
    pub combined_score: f64,
    /// Case → 0/1 hit indicator.
    pub true_positive_per_case: BTreeMap<CaseId, u8>,
    /// Case → false positive rate.
    pub false_positive_per_case: BTreeMap<CaseId, f64>,
}

impl CohortResult {
    pub fn case_count(&self) -> usize {
        self.true_positive_per_case.len()
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize metrics")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write metrics to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read metrics from {}", path.display()))?;
        let result: CohortResult =
            serde_json::from_str(&content).context("failed to parse metrics JSON")?;
        Ok(result)
    }

    /// Format the result as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} cases, TPR {:.1}%, FPR {:.1}%, combined {:.3}\n\n",
            self.case_count(),
            self.true_positive_rate * 100.0,
            self.false_positive_rate * 100.0,
            self.combined_score
        ));

        md.push_str("| Case | True positive | False positive rate |\n");
        md.push_str("|------|---------------|---------------------|\n");
        for (case, tp) in &self.true_positive_per_case {
            let fpr = self
                .false_positive_per_case
                .get(case)
                .copied()
                .unwrap_or(0.0);
            md.push_str(&format!("| {case} | {tp} | {fpr:.4} |\n"));
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CohortResult {
        let mut tp = BTreeMap::new();
        tp.insert(CaseId::from("a"), 1);
        tp.insert(CaseId::from("b"), 0);
        let mut fp = BTreeMap::new();
        fp.insert(CaseId::from("a"), 0.1);
        fp.insert(CaseId::from("b"), 0.0);
        CohortResult {
            true_positive_rate: 0.5,
            false_positive_rate: 0.05,
            combined_score: 0.725,
            true_positive_per_case: tp,
            false_positive_per_case: fp,
        }
    }

    #[test]
    fn json_uses_published_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "combined_btpr_fpr",
                "false_positive_per_case",
                "false_positive_rate",
                "true_positive_per_case",
                "true_positive_rate",
            ]
        );
        assert_eq!(value["true_positive_per_case"]["a"], 1);
    }

    #[test]
    fn saved_file_is_a_json_object_not_a_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("metrics.json");

        sample().save_json(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_object());

        let loaded = CohortResult::load_json(&path).unwrap();
        assert_eq!(loaded.true_positive_per_case, sample().true_positive_per_case);
        assert!((loaded.combined_score - 0.725).abs() < 1e-12);
        assert!((loaded.false_positive_per_case[&CaseId::from("a")] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CohortResult::load_json(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn markdown_output() {
        let md = sample().to_markdown();
        assert!(md.contains("2 cases"));
        assert!(md.contains("| a | 1 | 0.1000 |"));
        assert!(md.contains("combined 0.725"));
    }
}
