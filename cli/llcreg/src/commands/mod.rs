//! CLI command implementations.

pub mod check;
pub mod generate;
pub mod init;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use llcreg_core::{build_layout, MultiregStyle, ResolvedLayout, SizingParameters};
use llcreg_emit::{Artifact, EmitOptions};

use crate::config::LlcregConfig;

/// Sizing inputs shared by every layout command.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Bus register width in bits
    pub reg_width: Option<String>,
    /// Number of cache lines
    pub num_lines: Option<String>,
    /// Maximum number of partitions
    pub max_partitions: Option<String>,
    /// Enable the partitioning registers (0/1 or true/false)
    pub partitioning: Option<String>,
    /// Configuration file (default: llcreg.toml searched upward)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Multiregister layout (banked, unrolled)
    #[arg(long)]
    pub style: Option<MultiregStyle>,
}

/// Everything a command needs once arguments and configuration are merged.
#[derive(Debug)]
pub struct Inputs {
    pub params: SizingParameters,
    pub style: MultiregStyle,
    pub options: EmitOptions,
    /// Output directory from the configuration, already anchored.
    pub out_dir: PathBuf,
    pub artifacts: Vec<Artifact>,
}

impl Inputs {
    pub fn layout(&self) -> Result<ResolvedLayout> {
        build_layout(&self.params, self.style).with_context(|| {
            format!(
                "resolving layout for reg-width={} num-lines={} max-partitions={} partitioning={}",
                self.params.reg_width,
                self.params.num_lines,
                self.params.max_partitions,
                self.params.partitioning
            )
        })
    }
}

impl ParamArgs {
    fn positionals(&self) -> Result<Option<SizingParameters>> {
        match (
            &self.reg_width,
            &self.num_lines,
            &self.max_partitions,
            &self.partitioning,
        ) {
            (None, None, None, None) => Ok(None),
            (Some(w), Some(n), Some(p), Some(f)) => Ok(Some(SizingParameters::parse(w, n, p, f)?)),
            _ => bail!(
                "expected all four parameters (REG_WIDTH NUM_LINES MAX_PARTITIONS PARTITIONING) or none"
            ),
        }
    }

    /// Merge the arguments with the configuration file. Arguments win.
    pub fn resolve(&self, cwd: &Path) -> Result<Inputs> {
        let (config, base) = match &self.config {
            Some(path) => {
                let config = LlcregConfig::load(path)?;
                let base = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.to_path_buf());
                (config, cwd.join(base))
            }
            None => match LlcregConfig::find_and_load(cwd)? {
                Some((config, dir)) => {
                    tracing::debug!(dir = %dir.display(), "using configuration");
                    (config, dir)
                }
                None => (LlcregConfig::default(), cwd.to_path_buf()),
            },
        };

        let params = match (self.positionals()?, config.parameters) {
            (Some(params), _) => params,
            (None, Some(params)) => params,
            (None, None) => bail!(
                "no sizing parameters: pass REG_WIDTH NUM_LINES MAX_PARTITIONS PARTITIONING \
                 or add a [parameters] section to {}",
                crate::config::FILE_NAME
            ),
        };

        Ok(Inputs {
            params,
            style: self.style.unwrap_or(config.layout.multireg_style),
            options: config.emit_options(),
            out_dir: base.join(&config.output.dir),
            artifacts: config.output.artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: [&str; 4]) -> ParamArgs {
        ParamArgs {
            reg_width: Some(values[0].into()),
            num_lines: Some(values[1].into()),
            max_partitions: Some(values[2].into()),
            partitioning: Some(values[3].into()),
            ..ParamArgs::default()
        }
    }

    #[test]
    fn positionals_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = args(["64", "256", "256", "1"]).resolve(dir.path()).unwrap();
        assert_eq!(inputs.params, SizingParameters::new(64, 256, 256, true));
        assert_eq!(inputs.style, MultiregStyle::Banked);
        assert_eq!(inputs.options, EmitOptions::default());
        assert_eq!(inputs.out_dir, dir.path().join("out"));
    }

    #[test]
    fn positionals_override_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("llcreg.toml"), LlcregConfig::template()).unwrap();
        let inputs = args(["32", "128", "4", "0"]).resolve(dir.path()).unwrap();
        assert_eq!(inputs.params, SizingParameters::new(32, 128, 4, false));
    }

    #[test]
    fn config_supplies_parameters() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("llcreg.toml"),
            "[parameters]\nreg-width = 64\nnum-lines = 512\nmax-partitions = 8\npartitioning = true\n\
             [layout]\nmultireg-style = \"unrolled\"\n[output]\ndir = \"rtl\"\n",
        )
        .unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir(&nested).unwrap();

        let inputs = ParamArgs::default().resolve(&nested).unwrap();
        assert_eq!(inputs.params.num_lines, 512);
        assert_eq!(inputs.style, MultiregStyle::Unrolled);
        assert_eq!(inputs.out_dir, dir.path().join("rtl"));
    }

    #[test]
    fn style_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("llcreg.toml"), LlcregConfig::template()).unwrap();
        let inputs = ParamArgs {
            style: Some(MultiregStyle::Unrolled),
            ..ParamArgs::default()
        }
        .resolve(dir.path())
        .unwrap();
        assert_eq!(inputs.style, MultiregStyle::Unrolled);
    }

    #[test]
    fn partial_positionals_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let partial = ParamArgs {
            reg_width: Some("64".into()),
            ..ParamArgs::default()
        };
        let err = partial.resolve(dir.path()).unwrap_err();
        assert!(err.to_string().contains("all four parameters"));
    }

    #[test]
    fn invalid_positional_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = args(["64", "-3", "256", "1"]).resolve(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("num-lines"));
    }

    #[test]
    fn explicit_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, LlcregConfig::template()).unwrap();
        let inputs = ParamArgs {
            config: Some(path),
            ..ParamArgs::default()
        }
        .resolve(Path::new("/"))
        .unwrap();
        assert_eq!(inputs.out_dir, dir.path().join("out"));
    }
}
