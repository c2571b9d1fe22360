//! `llcreg generate`: render artifacts and write them to the output
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use llcreg_emit::{render_all, Artifact};

use super::Inputs;

/// Render the requested artifacts and write them under `out_dir`.
///
/// Everything is rendered before the first file is written, so a failure
/// leaves the output directory untouched. Returns the written paths.
pub fn run(inputs: &Inputs, out_dir: Option<&Path>, requested: &[Artifact]) -> Result<Vec<PathBuf>> {
    let layout = inputs.layout()?;
    let out_dir = out_dir.map(Path::to_path_buf).unwrap_or_else(|| inputs.out_dir.clone());
    let selection = if requested.is_empty() {
        inputs.artifacts.as_slice()
    } else {
        requested
    };

    let rendered = render_all(&layout, &inputs.options, selection);
    tracing::info!(
        artifacts = rendered.len(),
        size = %format!("{:#x}", layout.size),
        fingerprint = %layout.fingerprint(),
        "rendered register artifacts"
    );

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut written = Vec::with_capacity(rendered.len());
    for artifact in rendered {
        let path = out_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.contents)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {} ({})", path.display(), artifact.artifact);
        written.push(path);
    }
    Ok(written)
}
