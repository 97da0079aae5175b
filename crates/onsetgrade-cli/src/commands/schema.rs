//! The `onsetgrade schema` command.

use anyhow::Result;

use onsetgrade_synthetic::TableSchema;

pub fn execute() -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&TableSchema::heart_rate())?
    );
    Ok(())
}
