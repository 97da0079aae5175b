//! End-to-end pipeline tests over the library crates.
//!
//! These exercise load → classify → aggregate → persist without going
//! through the binary.

use std::path::Path;

use onsetgrade_core::engine::{evaluate, NoopReporter};
use onsetgrade_core::{CaseWindowClassifier, CohortResult, WindowConfig};
use onsetgrade_data::{CsvCaseSource, InputPaths};

fn write_inputs(root: &Path, predictions: &str) -> InputPaths {
    let series_dir = root.join("test");
    std::fs::create_dir_all(&series_dir).unwrap();
    std::fs::write(
        root.join("labels.csv"),
        "case,symptom_onset\np1,2020-06-15\np2,2020-06-15\n",
    )
    .unwrap();
    std::fs::write(root.join("predictions.csv"), predictions).unwrap();
    for case in ["p1", "p2"] {
        std::fs::write(
            series_dir.join(format!("{case}.csv")),
            "timestamp,steps\n2020-06-01T00:00:00,10\n2020-06-21T00:00:00,20\n",
        )
        .unwrap();
    }
    InputPaths {
        labels: root.join("labels.csv"),
        predictions: root.join("predictions.csv"),
        series_dir,
    }
}

#[test]
fn metrics_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_inputs(
        dir.path(),
        "case,symptom_onset\np1,2020-06-15\np2,2020-06-01\np2,2020-06-18\n",
    );

    let source = CsvCaseSource::open(&paths).unwrap();
    let classifier = CaseWindowClassifier::new(WindowConfig::default());
    let evaluation = evaluate(&source, &classifier, &NoopReporter).unwrap();

    // p2: one early alarm, one late prediction inside the grace window.
    // span 20, fp 1, tn 20 - 1 - 11 = 8, rate 1/9.
    let p2 = &evaluation.cases[1];
    assert_eq!(p2.false_positives, 1);
    assert_eq!(p2.true_negatives, 8);

    let path = dir.path().join("results").join("metrics.json");
    evaluation.cohort.save_json(&path).unwrap();
    let loaded = CohortResult::load_json(&path).unwrap();

    assert_eq!(loaded.case_count(), 2);
    assert_eq!(loaded.true_positive_per_case, evaluation.cohort.true_positive_per_case);
    assert!((loaded.true_positive_rate - 0.5).abs() < 1e-12);
    assert!((loaded.false_positive_rate - (1.0 / 9.0) / 2.0).abs() < 1e-12);
}

#[test]
fn unparseable_predictions_do_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_inputs(
        dir.path(),
        "case,symptom_onset\np1,soon\np1,2020-06-12\np2,n/a\n",
    );

    let source = CsvCaseSource::open(&paths).unwrap();
    let classifier = CaseWindowClassifier::default();
    let evaluation = evaluate(&source, &classifier, &NoopReporter).unwrap();

    let p1 = &evaluation.cases[0];
    assert_eq!(p1.true_positive, 1);
    assert_eq!(p1.rejected, 1);

    let p2 = &evaluation.cases[1];
    assert!(p2.degenerate.is_some());
    assert_eq!(p2.true_positive, 0);
    assert_eq!(p2.false_positive_rate, 0.0);

    assert!((evaluation.cohort.true_positive_rate - 0.5).abs() < 1e-12);
}
