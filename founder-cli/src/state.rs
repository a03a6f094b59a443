use anyhow::{Context, Result};
use std::path::PathBuf;

/// `~/.founder`, where the CLI keeps its config.
pub fn founder_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".founder"))
}
