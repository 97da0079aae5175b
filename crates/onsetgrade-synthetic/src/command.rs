//! Scorer backed by an external command.
//!
//! The command is invoked as `<program> <args...> <real.csv> <synthetic.csv> <schema.json>`
//! and must print the score as the last non-empty line of stdout.

use std::io::Write;
use std::process::Stdio;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

use crate::scorer::{DetectionRequest, DetectionScore, DetectionScorer};

/// Runs an external program to score a dataset pair.
#[derive(Debug, Clone)]
pub struct CommandScorer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandScorer {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Build from a whitespace-separated command line such as `python score.py`.
    pub fn from_command_line(line: &str, timeout: Duration) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            bail!("scorer command is empty");
        };
        Ok(Self::new(program, parts.collect(), timeout))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Parse the last non-empty stdout line as a finite score.
fn parse_score(stdout: &str) -> Result<f64> {
    let line = stdout
        .lines()
        .map(str::trim)
        .rev()
        .find(|l| !l.is_empty())
        .context("scorer printed nothing")?;
    let score: f64 = line
        .parse()
        .with_context(|| format!("scorer output '{line}' is not a number"))?;
    if !score.is_finite() {
        bail!("scorer returned a non-finite score: {score}");
    }
    Ok(score)
}

#[async_trait]
impl DetectionScorer for CommandScorer {
    fn name(&self) -> &str {
        &self.program
    }

    async fn score(&self, request: &DetectionRequest) -> Result<DetectionScore> {
        let start = Instant::now();

        let mut schema_file =
            tempfile::NamedTempFile::new().context("failed to create schema file")?;
        serde_json::to_writer(&mut schema_file, &request.schema)
            .context("failed to serialize schema")?;
        schema_file.flush().context("failed to write schema file")?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(&request.real)
            .arg(&request.synthetic)
            .arg(schema_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(program = %self.program, args = ?self.args, "running scorer");

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .with_context(|| format!("scorer timed out after {}s", self.timeout.as_secs()))?
            .with_context(|| format!("failed to run scorer '{}'", self.program))?;

        let duration_ms = start.elapsed().as_millis() as u64;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "scorer '{}' failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        let score = parse_score(&String::from_utf8_lossy(&output.stdout))?;
        Ok(DetectionScore { score, duration_ms })
    }
}
