//! The `onsetgrade synthetic` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use onsetgrade_data::load_config_from;
use onsetgrade_synthetic::{evaluate_synthetic, CommandScorer, DetectionRequest, TableSchema};

pub async fn execute(
    real: PathBuf,
    synthetic: PathBuf,
    schema_path: Option<PathBuf>,
    command: Option<String>,
    timeout_secs: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let command = command
        .or(config.synthetic.command)
        .context("no scorer command given (use --command or [synthetic].command in onsetgrade.toml)")?;
    let timeout = Duration::from_secs(timeout_secs.unwrap_or(config.synthetic.timeout_secs));
    anyhow::ensure!(!timeout.is_zero(), "timeout must be at least 1 second");

    let schema = match schema_path.or(config.synthetic.schema) {
        Some(path) => TableSchema::load_json(&path)?,
        None => TableSchema::heart_rate(),
    };

    let scorer = CommandScorer::from_command_line(&command, timeout)?;
    let request = DetectionRequest {
        real,
        synthetic,
        schema,
    };

    let evaluation = evaluate_synthetic(&scorer, &request).await?;

    eprintln!(
        "Real: {} rows, {} entities",
        evaluation.real.rows, evaluation.real.entities
    );
    eprintln!(
        "Synthetic: {} rows, {} entities",
        evaluation.synthetic.rows, evaluation.synthetic.entities
    );
    eprintln!("Scored in {}ms", evaluation.score.duration_ms);
    println!("{}", evaluation.score.score);

    Ok(())
}
