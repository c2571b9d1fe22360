//! Register layout engine for the LLC configuration interface.
//!
//! Derives the register map of the cache controller's configuration port
//! from four sizing parameters:
//! - **Parameter resolution** ([`params`]): index width, flush and partition
//!   register counts.
//! - **Register catalog** ([`schema`]): the ordered base registers plus the
//!   optional cache partitioning extension.
//! - **Layout allocation** ([`layout`]): byte addresses for every sub-word,
//!   including the padding reserved after commit strobes.
//!
//! The resulting [`ResolvedLayout`] is immutable and is the only input of
//! every renderer.

pub mod error;
pub mod hash;
pub mod layout;
pub mod params;
pub mod schema;

pub use error::{LayoutError, RegmapError, Result};
pub use layout::{allocate, build_layout, EntrySpan, Gap, ResolvedLayout, Slot};
pub use params::{resolve, DerivedConstants, SizingParameters};
pub use schema::{
    build_catalog, BitField, Catalog, Feature, GapDirective, Half, HwAccess, HwType,
    MultiregStyle, RegisterEntry, SwAccess,
};
