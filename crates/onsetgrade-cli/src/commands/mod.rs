pub mod evaluate;
pub mod init;
pub mod schema;
pub mod synthetic;
pub mod validate;

use anyhow::Result;

use onsetgrade_data::{load_config_from, InputPaths, OnsetgradeConfig};

use crate::InputArgs;

/// Load config, then let explicit flags win over it.
fn resolve_inputs(inputs: &InputArgs) -> Result<(OnsetgradeConfig, InputPaths)> {
    let config = load_config_from(inputs.config.as_deref())?;
    let mut paths = config.inputs.to_paths();
    if let Some(p) = &inputs.predictions {
        paths.predictions = p.clone();
    }
    if let Some(p) = &inputs.labels {
        paths.labels = p.clone();
    }
    if let Some(p) = &inputs.series_dir {
        paths.series_dir = p.clone();
    }
    Ok((config, paths))
}
