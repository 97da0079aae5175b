//! The `onsetgrade init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let path = Path::new("onsetgrade.toml");
    if path.exists() {
        println!("onsetgrade.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG).context("failed to write onsetgrade.toml")?;
        println!("Created onsetgrade.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point [inputs] at your predictions, labels and series directory");
    println!("  2. Run: onsetgrade validate");
    println!("  3. Run: onsetgrade evaluate");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# onsetgrade configuration

[windows]
# A prediction up to this many days before onset counts as an early detection.
days_before_symptoms = 5
# Predictions up to this many days after onset are neither hits nor false alarms.
days_after_symptom_to_omit = 5

[inputs]
predictions = "predictions.csv"
labels = "labels.csv"
series_dir = "test"

[output]
path = "results/metrics.json"

[synthetic]
# Invoked as: <command> <real.csv> <synthetic.csv> <schema.json>
# command = "python3 score.py"
timeout_secs = 600
"#;
