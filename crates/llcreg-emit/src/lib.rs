//! Renderers projecting a [`ResolvedLayout`](llcreg_core::ResolvedLayout)
//! into the synchronized register artifacts: the register-tool description,
//! SystemVerilog typedef and assign macros, the test-bench address enum, the
//! C software header, and the partition concatenation.
//!
//! Renderers are pure functions of the layout and [`EmitOptions`]; writing
//! the results is left to the caller.

pub mod address_enum;
pub mod artifact;
pub mod assign;
pub mod concat;
pub mod error;
pub mod register_schema;
pub mod sw_header;
pub mod table;
pub mod text;
pub mod typedef;

pub use artifact::{render_all, Artifact, RenderedArtifact};
pub use error::{EmitError, Result};
pub use table::{TableFormat, TableRow};

/// Naming options shared by all renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module name, used for file names, macro prefixes, and include guards.
    pub module: String,
    /// Name of the address enum type.
    pub addr_enum: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            module: "axi_llc".to_string(),
            addr_enum: "llc_cfg_addr_e".to_string(),
        }
    }
}
