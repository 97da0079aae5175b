//! onsetgrade configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use onsetgrade_core::model::WindowConfig;

use crate::source::InputPaths;

/// Where the evaluation inputs live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_predictions")]
    pub predictions: PathBuf,
    #[serde(default = "default_labels")]
    pub labels: PathBuf,
    /// Directory holding one `<case>.csv` series per case.
    #[serde(default = "default_series_dir")]
    pub series_dir: PathBuf,
}

fn default_predictions() -> PathBuf {
    PathBuf::from("predictions.csv")
}
fn default_labels() -> PathBuf {
    PathBuf::from("labels.csv")
}
fn default_series_dir() -> PathBuf {
    PathBuf::from("test")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            predictions: default_predictions(),
            labels: default_labels(),
            series_dir: default_series_dir(),
        }
    }
}

impl InputConfig {
    pub fn to_paths(&self) -> InputPaths {
        InputPaths {
            labels: self.labels.clone(),
            predictions: self.predictions.clone(),
            series_dir: self.series_dir.clone(),
        }
    }
}

/// Where the metrics document is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("results").join("metrics.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// Settings for the external synthetic-data detection scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Command line of the scorer; receives `<real> <synthetic> <schema>`.
    #[serde(default)]
    pub command: Option<String>,
    /// Optional schema file; the built-in heart-rate schema otherwise.
    #[serde(default)]
    pub schema: Option<PathBuf>,
    #[serde(default = "default_synthetic_timeout")]
    pub timeout_secs: u64,
}

fn default_synthetic_timeout() -> u64 {
    600
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            command: None,
            schema: None,
            timeout_secs: default_synthetic_timeout(),
        }
    }
}

/// Top-level onsetgrade configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnsetgradeConfig {
    #[serde(default)]
    pub windows: WindowConfig,
    #[serde(default)]
    pub inputs: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

/// Expand `${VAR}` references. Unset variables expand to an empty string;
/// an unterminated `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

fn env_days(var: &str) -> Result<Option<u32>> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .map(Some)
            .with_context(|| format!("{var} must be a non-negative integer, got '{value}'")),
        Err(_) => Ok(None),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `onsetgrade.toml` in the current directory
/// 2. `~/.config/onsetgrade/config.toml`
///
/// Environment variable overrides: `ONSETGRADE_DAYS_BEFORE_SYMPTOMS`,
/// `ONSETGRADE_DAYS_AFTER_SYMPTOM_TO_OMIT`.
pub fn load_config() -> Result<OnsetgradeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<OnsetgradeConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => std::iter::once(PathBuf::from("onsetgrade.toml"))
            .chain(dirs_path().map(|home| home.join("config.toml")))
            .find(|candidate| candidate.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => OnsetgradeConfig::default(),
    };

    // Apply env var overrides
    if let Some(days) = env_days("ONSETGRADE_DAYS_BEFORE_SYMPTOMS")? {
        config.windows.days_before_symptoms = days;
    }
    if let Some(days) = env_days("ONSETGRADE_DAYS_AFTER_SYMPTOM_TO_OMIT")? {
        config.windows.days_after_symptom_to_omit = days;
    }

    Ok(config)
}

/// Parse a config document and expand `${VAR}` references in its strings.
pub fn parse_config(content: &str) -> Result<OnsetgradeConfig> {
    let mut config: OnsetgradeConfig = toml::from_str(content)?;

    config.inputs.predictions = resolve_path(&config.inputs.predictions);
    config.inputs.labels = resolve_path(&config.inputs.labels);
    config.inputs.series_dir = resolve_path(&config.inputs.series_dir);
    config.output.path = resolve_path(&config.output.path);
    config.synthetic.command = config.synthetic.command.as_deref().map(resolve_env_vars);
    config.synthetic.schema = config.synthetic.schema.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("onsetgrade"))
}
