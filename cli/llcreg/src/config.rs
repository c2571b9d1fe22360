//! `llcreg.toml` parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use llcreg_core::{MultiregStyle, SizingParameters};
use llcreg_emit::{Artifact, EmitOptions};
use serde::{Deserialize, Serialize};

pub const FILE_NAME: &str = "llcreg.toml";

/// The top-level configuration of a register generation project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LlcregConfig {
    #[serde(default)]
    pub module: ModuleConfig,
    /// Sizing parameters; positional arguments take precedence.
    #[serde(default)]
    pub parameters: Option<SizingParameters>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Naming of the generated module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleConfig {
    #[serde(default = "default_module")]
    pub name: String,
    #[serde(default = "default_addr_enum")]
    pub addr_enum: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: default_module(),
            addr_enum: default_addr_enum(),
        }
    }
}

fn default_module() -> String {
    EmitOptions::default().module
}

fn default_addr_enum() -> String {
    EmitOptions::default().addr_enum
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutConfig {
    #[serde(default)]
    pub multireg_style: MultiregStyle,
}

/// Output section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Output directory, relative to the configuration file.
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
    /// Artifacts to generate; empty means every applicable one.
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
            artifacts: Vec::new(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

impl LlcregConfig {
    /// Search upward from `start_dir` for an `llcreg.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(FILE_NAME);
            if candidate.is_file() {
                return Ok(Some((Self::load(&candidate)?, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            module: self.module.name.clone(),
            addr_enum: self.module.addr_enum.clone(),
        }
    }

    /// Default template written by `llcreg init`.
    pub fn template() -> String {
        r#"[module]
name = "axi_llc"
addr-enum = "llc_cfg_addr_e"

[parameters]
reg-width = 64
num-lines = 256
max-partitions = 256
partitioning = true

[layout]
multireg-style = "banked"

[output]
dir = "out"
artifacts = []
"#
        .to_string()
    }
}
