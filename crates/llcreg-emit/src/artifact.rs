//! The set of emitted artifacts and the driver that renders them.

use std::fmt;
use std::str::FromStr;

use llcreg_core::ResolvedLayout;
use serde::{Deserialize, Serialize};

use crate::error::EmitError;
use crate::{address_enum, assign, concat, register_schema, sw_header, typedef, EmitOptions};

/// One output file derived from a resolved layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Artifact {
    RegisterSchema,
    TypedefHeader,
    AssignHeader,
    AddressEnum,
    SoftwareHeader,
    PartitionConcat,
}

impl Artifact {
    pub const ALL: [Artifact; 6] = [
        Artifact::RegisterSchema,
        Artifact::TypedefHeader,
        Artifact::AssignHeader,
        Artifact::AddressEnum,
        Artifact::SoftwareHeader,
        Artifact::PartitionConcat,
    ];

    /// Parse an artifact identifier.
    pub fn parse(s: &str) -> Result<Self, EmitError> {
        match s {
            "register-schema" | "hjson" => Ok(Artifact::RegisterSchema),
            "typedef-header" | "typedef" => Ok(Artifact::TypedefHeader),
            "assign-header" | "assign" => Ok(Artifact::AssignHeader),
            "address-enum" | "addr" => Ok(Artifact::AddressEnum),
            "software-header" | "c-header" => Ok(Artifact::SoftwareHeader),
            "partition-concat" | "concat" => Ok(Artifact::PartitionConcat),
            _ => Err(EmitError::UnknownArtifact {
                name: s.to_string(),
            }),
        }
    }

    /// Kebab-case identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Artifact::RegisterSchema => "register-schema",
            Artifact::TypedefHeader => "typedef-header",
            Artifact::AssignHeader => "assign-header",
            Artifact::AddressEnum => "address-enum",
            Artifact::SoftwareHeader => "software-header",
            Artifact::PartitionConcat => "partition-concat",
        }
    }

    /// Default file name, relative to the output directory.
    pub fn file_name(&self, opts: &EmitOptions) -> String {
        match self {
            Artifact::RegisterSchema => format!("{}_regs.hjson", opts.module),
            Artifact::TypedefHeader => "typedef.svh".to_string(),
            Artifact::AssignHeader => "assign.svh".to_string(),
            Artifact::AddressEnum => format!("{}_cfg_addr.svh", opts.module),
            Artifact::SoftwareHeader => format!("{}_regs.h", opts.module),
            Artifact::PartitionConcat => "cfg_set_partition_concat.svh".to_string(),
        }
    }

    /// Whether the artifact has content for `layout`.
    pub fn applies_to(&self, layout: &ResolvedLayout) -> bool {
        match self {
            Artifact::PartitionConcat => concat::applies_to(layout),
            _ => true,
        }
    }

    pub fn render(&self, layout: &ResolvedLayout, opts: &EmitOptions) -> String {
        match self {
            Artifact::RegisterSchema => register_schema::render(layout, opts),
            Artifact::TypedefHeader => typedef::render(layout, opts),
            Artifact::AssignHeader => assign::render(layout, opts),
            Artifact::AddressEnum => address_enum::render(layout, opts),
            Artifact::SoftwareHeader => sw_header::render(layout, opts),
            Artifact::PartitionConcat => concat::render(layout, opts),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Artifact {
    type Err = EmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Artifact::parse(s)
    }
}

/// A rendered artifact, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub artifact: Artifact,
    pub file_name: String,
    pub contents: String,
}

/// Render the selected artifacts, or every applicable one when `selection`
/// is empty. Requested artifacts that do not apply are skipped with a
/// warning.
pub fn render_all(
    layout: &ResolvedLayout,
    opts: &EmitOptions,
    selection: &[Artifact],
) -> Vec<RenderedArtifact> {
    let requested: Vec<Artifact> = if selection.is_empty() {
        Artifact::ALL.to_vec()
    } else {
        let mut requested = selection.to_vec();
        requested.sort();
        requested.dedup();
        requested
    };

    let mut rendered = Vec::with_capacity(requested.len());
    for artifact in requested {
        if !artifact.applies_to(layout) {
            if !selection.is_empty() {
                tracing::warn!(%artifact, "artifact does not apply to this layout, skipping");
            }
            continue;
        }
        let contents = artifact.render(layout, opts);
        tracing::debug!(%artifact, bytes = contents.len(), "rendered artifact");
        rendered.push(RenderedArtifact {
            artifact,
            file_name: artifact.file_name(opts),
            contents,
        });
    }
    rendered
}
