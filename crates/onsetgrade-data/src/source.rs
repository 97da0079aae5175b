//! File-backed [`CaseSource`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use onsetgrade_core::model::{CaseId, LabelledCase};
use onsetgrade_core::traits::CaseSource;

use crate::error::DataError;
use crate::loader::{load_day_span, load_labels, load_predictions, series_path};

/// Paths to one evaluation's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub labels: PathBuf,
    pub predictions: PathBuf,
    pub series_dir: PathBuf,
}

/// Labels and predictions loaded up front; series files read on demand.
#[derive(Debug)]
pub struct CsvCaseSource {
    labels: Vec<LabelledCase>,
    predictions: HashMap<CaseId, Vec<String>>,
    series_dir: PathBuf,
}

impl CsvCaseSource {
    /// Load labels and predictions. Series files are not touched yet.
    pub fn open(paths: &InputPaths) -> Result<Self, DataError> {
        let labels = load_labels(&paths.labels)?;
        let predictions = load_predictions(&paths.predictions)?;

        let source = Self {
            labels,
            predictions,
            series_dir: paths.series_dir.clone(),
        };

        let unknown = source.unlabelled_prediction_cases();
        if !unknown.is_empty() {
            tracing::warn!(
                cases = unknown.len(),
                "ignoring predictions for cases without labels"
            );
        }

        Ok(source)
    }

    pub fn series_dir(&self) -> &Path {
        &self.series_dir
    }

    pub fn labelled_cases(&self) -> &[LabelledCase] {
        &self.labels
    }

    /// Cases that have predictions but no label, sorted.
    pub fn unlabelled_prediction_cases(&self) -> Vec<CaseId> {
        let labelled: HashSet<&CaseId> = self.labels.iter().map(|l| &l.case).collect();
        let mut unknown: Vec<CaseId> = self
            .predictions
            .keys()
            .filter(|case| !labelled.contains(case))
            .cloned()
            .collect();
        unknown.sort();
        unknown
    }

    /// Labelled cases with no prediction rows at all.
    pub fn cases_without_predictions(&self) -> Vec<CaseId> {
        self.labels
            .iter()
            .filter(|l| !self.predictions.contains_key(&l.case))
            .map(|l| l.case.clone())
            .collect()
    }

    pub fn series_path(&self, case: &CaseId) -> Result<PathBuf, DataError> {
        series_path(&self.series_dir, case)
    }
}

impl CaseSource for CsvCaseSource {
    fn labels(&self) -> anyhow::Result<Vec<LabelledCase>> {
        Ok(self.labels.clone())
    }

    fn predictions(&self, case: &CaseId) -> anyhow::Result<Vec<String>> {
        Ok(self.predictions.get(case).cloned().unwrap_or_default())
    }

    fn day_span(&self, case: &CaseId) -> anyhow::Result<u32> {
        Ok(load_day_span(&self.series_dir, case)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onsetgrade_core::classifier::CaseWindowClassifier;
    use onsetgrade_core::engine::{evaluate, NoopReporter};

    fn write_inputs(root: &Path) -> InputPaths {
        let series_dir = root.join("test");
        std::fs::create_dir_all(&series_dir).unwrap();

        std::fs::write(
            root.join("labels.csv"),
            "case,symptom_onset\nA,2020-03-20\nB,2020-04-10\nC,2020-05-01\n",
        )
        .unwrap();
        std::fs::write(
            root.join("predictions.csv"),
            "case,symptom_onset\nA,2020-03-18\nA,2020-02-01\nB,2020-04-12\nZ,2020-01-01\n",
        )
        .unwrap();
        std::fs::write(
            series_dir.join("A.csv"),
            "timestamp,heart_rate\n2020-02-20 00:00:00,60\n2020-03-21 00:00:00,72\n",
        )
        .unwrap();
        std::fs::write(
            series_dir.join("B.csv"),
            "timestamp,heart_rate\n2020-03-20,60\n2020-04-29,66\n",
        )
        .unwrap();
        std::fs::write(
            series_dir.join("C.csv"),
            "timestamp,heart_rate\n2020-04-01,58\n2020-04-26,59\n",
        )
        .unwrap();

        InputPaths {
            labels: root.join("labels.csv"),
            predictions: root.join("predictions.csv"),
            series_dir,
        }
    }

    #[test]
    fn open_and_inspect() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvCaseSource::open(&write_inputs(dir.path())).unwrap();

        assert_eq!(source.labelled_cases().len(), 3);
        assert_eq!(source.unlabelled_prediction_cases(), vec![CaseId::from("Z")]);
        assert_eq!(source.cases_without_predictions(), vec![CaseId::from("C")]);
        assert_eq!(source.day_span(&CaseId::from("A")).unwrap(), 30);
    }

    #[test]
    fn evaluates_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvCaseSource::open(&write_inputs(dir.path())).unwrap();

        let eval = evaluate(&source, &CaseWindowClassifier::default(), &NoopReporter).unwrap();
        let cohort = eval.cohort;

        assert_eq!(cohort.case_count(), 3);
        assert!((cohort.true_positive_rate - 1.0 / 3.0).abs() < 1e-12);
        // A: one too-early alarm, tn = 30 - 1 - 11 = 18
        let a = cohort.false_positive_per_case[&CaseId::from("A")];
        assert!((a - 1.0 / 19.0).abs() < 1e-12);
        assert_eq!(cohort.false_positive_per_case[&CaseId::from("C")], 0.0);
        assert!(!cohort.true_positive_per_case.contains_key(&CaseId::from("Z")));
    }
}
