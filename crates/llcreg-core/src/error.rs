//! Error types for parameter resolution and layout allocation.

use thiserror::Error;

/// Errors raised while resolving sizing parameters or building a layout.
#[derive(Debug, Error)]
pub enum RegmapError {
    /// A sizing input is missing, malformed, or out of range.
    #[error("invalid parameter `{parameter}` = '{value}': {reason}")]
    InvalidParameters {
        /// Parameter name as it appears on the command line.
        parameter: &'static str,
        /// The offending value, as given.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The inputs are well formed but describe a register file that cannot
    /// be built (e.g. an index wider than a register).
    #[error("unsupported configuration: {detail}")]
    UnsupportedConfiguration {
        /// Description including the parameter values involved.
        detail: String,
    },

    /// The catalog could not be laid out.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Internal invariant violations found by the layout allocator.
///
/// These always indicate a broken catalog or gap directive, never bad user
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("gap after `{register}` jumps backward from 0x{cursor:X} to 0x{target:X}")]
    BackwardJump {
        register: String,
        cursor: u64,
        target: u64,
    },

    #[error("`{register}` collides with `{other}` at 0x{address:X}")]
    Collision {
        register: String,
        other: String,
        address: u64,
    },

    #[error("commit strobe `{register}` is not followed by a gap directive")]
    MissingStrobeGap { register: String },

    #[error("commit strobe `{register}` at 0x{address:X} reserves no padding slot (next register at 0x{target:X})")]
    StrobePadding {
        register: String,
        address: u64,
        target: u64,
    },

    #[error("gap after `{register}` targets unaligned address 0x{target:X}")]
    Misaligned { register: String, target: u64 },

    #[error("`{register}` does not fit in the 32-bit register address space")]
    AddressOverflow { register: String },
}

/// Result type for register map operations.
pub type Result<T> = std::result::Result<T, RegmapError>;
