//! The `onsetgrade evaluate` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use onsetgrade_core::engine::{evaluate, Evaluation, ProgressReporter};
use onsetgrade_core::model::{CaseId, CaseResult, DegenerateReason, RejectedPrediction};
use onsetgrade_core::CaseWindowClassifier;
use onsetgrade_data::CsvCaseSource;

use super::resolve_inputs;
use crate::InputArgs;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_case_complete(&self, result: &CaseResult) {
        if result.degenerate.is_none() {
            eprintln!(
                "  Done: {} tp {} fp {} tn {}",
                result.case, result.true_positive, result.false_positives, result.true_negatives
            );
        }
    }

    fn on_case_degraded(&self, case: &CaseId, reason: &DegenerateReason) {
        eprintln!("  Degraded: {case}: {reason}");
    }

    fn on_prediction_rejected(&self, case: &CaseId, rejected: &RejectedPrediction) {
        eprintln!(
            "  Skipped: {case} prediction #{} '{}' is not a date",
            rejected.position, rejected.raw
        );
    }

    fn on_cohort_complete(&self, total: usize, degraded: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {total} cases scored, {degraded} degraded ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub fn execute(
    inputs: InputArgs,
    output: Option<PathBuf>,
    days_before: Option<u32>,
    days_after: Option<u32>,
    format: String,
) -> Result<()> {
    let formats: Vec<&str> = match format.as_str() {
        "all" => vec!["json", "markdown"],
        other => other.split(',').map(str::trim).collect(),
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "json" | "markdown" | "md"),
            "unknown format: '{fmt}' (expected json, markdown or all)"
        );
    }

    let (config, paths) = resolve_inputs(&inputs)?;

    let mut windows = config.windows;
    if let Some(days) = days_before {
        windows.days_before_symptoms = days;
    }
    if let Some(days) = days_after {
        windows.days_after_symptom_to_omit = days;
    }
    let output = output.unwrap_or(config.output.path);

    let source = CsvCaseSource::open(&paths)?;
    let classifier = CaseWindowClassifier::new(windows);

    eprintln!(
        "onsetgrade v{}: scoring {} cases ({} days before onset, {} days after omitted)",
        env!("CARGO_PKG_VERSION"),
        source.labelled_cases().len(),
        windows.days_before_symptoms,
        windows.days_after_symptom_to_omit,
    );
    eprintln!();

    let evaluation = evaluate(&source, &classifier, &ConsoleReporter)?;

    print_summary(&evaluation);

    for fmt in &formats {
        match *fmt {
            "json" => {
                evaluation.cohort.save_json(&output)?;
                eprintln!("Results saved to: {}", output.display());
            }
            _ => {
                let path = output.with_extension("md");
                std::fs::write(&path, evaluation.cohort.to_markdown())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_summary(evaluation: &Evaluation) {
    use comfy_table::{Cell, Table};

    let mut cases = Table::new();
    cases.set_header(vec!["Case", "TP", "FP rate", "Lead hits", "FP", "TN", "Note"]);
    for result in &evaluation.cases {
        let note = match &result.degenerate {
            Some(reason) => reason.to_string(),
            None if result.rejected > 0 => format!("{} unparseable", result.rejected),
            None => String::new(),
        };
        cases.add_row(vec![
            Cell::new(&result.case),
            Cell::new(result.true_positive),
            Cell::new(format!("{:.4}", result.false_positive_rate)),
            Cell::new(result.lead_hits),
            Cell::new(result.false_positives),
            Cell::new(result.true_negatives),
            Cell::new(note),
        ]);
    }

    let cohort = &evaluation.cohort;
    let mut summary = Table::new();
    summary.set_header(vec!["Cases", "TPR", "FPR", "Combined"]);
    summary.add_row(vec![
        Cell::new(cohort.case_count()),
        Cell::new(format!("{:.1}%", cohort.true_positive_rate * 100.0)),
        Cell::new(format!("{:.1}%", cohort.false_positive_rate * 100.0)),
        Cell::new(format!("{:.4}", cohort.combined_score)),
    ]);

    eprintln!("\n{cases}");
    eprintln!("{summary}");
}
