//! The `onsetgrade validate` command.

use anyhow::Result;

use onsetgrade_data::{validate_inputs, CsvCaseSource, Severity};

use super::resolve_inputs;
use crate::InputArgs;

pub fn execute(inputs: InputArgs) -> Result<()> {
    let (_, paths) = resolve_inputs(&inputs)?;
    let source = CsvCaseSource::open(&paths)?;

    println!(
        "Inputs: {} labelled cases, series in {}",
        source.labelled_cases().len(),
        source.series_dir().display()
    );

    let issues = validate_inputs(&source);
    for issue in &issues {
        let prefix = issue
            .case
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} {}: {}", issue.severity, issue.message);
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warnings = issues.len() - errors;

    if issues.is_empty() {
        println!("All inputs valid.");
    } else {
        println!("\n{errors} error(s), {warnings} warning(s) found.");
    }

    anyhow::ensure!(errors == 0, "inputs would abort the evaluation");
    Ok(())
}
