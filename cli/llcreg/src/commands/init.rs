//! `llcreg init`: write a template configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::{LlcregConfig, FILE_NAME};

/// Write `llcreg.toml` into `dir`, creating the directory if needed.
pub fn run(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(FILE_NAME);
    if path.exists() && !force {
        bail!("'{}' already exists (use --force to overwrite)", path.display());
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    fs::write(&path, LlcregConfig::template())
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(path)
}
