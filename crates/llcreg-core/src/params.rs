//! Sizing parameters and the constants derived from them.
//!
//! Every emitted artifact is a function of the [`DerivedConstants`] computed
//! here, so resolution is kept pure and total: the same inputs always give
//! the same constants, or the same error.

use serde::{Deserialize, Serialize};

use crate::error::{RegmapError, Result};

/// Widest bus word the 64-bit low/high register pairs can carry.
pub const MAX_REG_WIDTH: u32 = 64;

/// Most replicas a multiregister may expand to.
pub const MAX_REPLICAS: u64 = 1 << 16;

/// Raw sizing inputs of the cache controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SizingParameters {
    /// Bus register width in bits (`RegWidth`).
    pub reg_width: u32,
    /// Number of cache lines (sets).
    pub num_lines: u64,
    /// Upper bound on simultaneous partitions.
    pub max_partitions: u64,
    /// Whether the cache partitioning register block is generated.
    pub partitioning: bool,
}

/// Constants derived from [`SizingParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DerivedConstants {
    /// `ceil(log2(num_lines))`: bits needed to index one line.
    pub index_bit_width: u32,
    /// `ceil(num_lines / reg_width)`: words holding one flush bit per line.
    pub flush_register_count: u64,
    /// `floor(reg_width / index_bit_width)`: partition slots per register.
    pub partitions_per_register: u32,
    /// `ceil(max_partitions / partitions_per_register)`.
    pub partition_register_count: u64,
    /// Meaningful low-order bits of each partition register.
    pub valid_bits_in_partition_register: u32,
}

impl SizingParameters {
    pub fn new(reg_width: u32, num_lines: u64, max_partitions: u64, partitioning: bool) -> Self {
        Self {
            reg_width,
            num_lines,
            max_partitions,
            partitioning,
        }
    }

    /// Parse the four textual inputs in command-line order.
    ///
    /// The partitioning flag accepts any integer (non-zero enables) or
    /// `true`/`false`.
    pub fn parse(
        reg_width: &str,
        num_lines: &str,
        max_partitions: &str,
        partitioning: &str,
    ) -> Result<Self> {
        let reg_width = parse_count("reg-width", reg_width)?;
        let reg_width = u32::try_from(reg_width).map_err(|_| RegmapError::InvalidParameters {
            parameter: "reg-width",
            value: reg_width.to_string(),
            reason: "exceeds 32 bits".into(),
        })?;
        Ok(Self {
            reg_width,
            num_lines: parse_count("num-lines", num_lines)?,
            max_partitions: parse_count("max-partitions", max_partitions)?,
            partitioning: parse_flag("partitioning", partitioning)?,
        })
    }

    /// Resolve the derived constants. See [`resolve`].
    pub fn resolve(&self) -> Result<DerivedConstants> {
        resolve(self)
    }
}

/// Validate `params` and derive the secondary sizing constants.
///
/// Rejects zero widths and line counts with `InvalidParameters`. Index
/// widths of zero or wider than a register are rejected with
/// `UnsupportedConfiguration` before `partitions_per_register` is divided
/// into anything.
pub fn resolve(params: &SizingParameters) -> Result<DerivedConstants> {
    if params.reg_width == 0 {
        return Err(RegmapError::InvalidParameters {
            parameter: "reg-width",
            value: "0".into(),
            reason: "must be positive".into(),
        });
    }
    if params.num_lines == 0 {
        return Err(RegmapError::InvalidParameters {
            parameter: "num-lines",
            value: "0".into(),
            reason: "must be positive".into(),
        });
    }
    if params.reg_width > MAX_REG_WIDTH {
        return Err(RegmapError::UnsupportedConfiguration {
            detail: format!(
                "reg-width {} exceeds the {MAX_REG_WIDTH}-bit configuration registers",
                params.reg_width
            ),
        });
    }

    let index_bit_width = ceil_log2(params.num_lines);
    if index_bit_width == 0 {
        return Err(RegmapError::UnsupportedConfiguration {
            detail: format!(
                "num-lines {} needs no index bits, so no partition index fits a register",
                params.num_lines
            ),
        });
    }
    if index_bit_width > params.reg_width {
        return Err(RegmapError::UnsupportedConfiguration {
            detail: format!(
                "index width {index_bit_width} (num-lines {}) exceeds reg-width {}",
                params.num_lines, params.reg_width
            ),
        });
    }

    let partitions_per_register = params.reg_width / index_bit_width;
    let constants = DerivedConstants {
        index_bit_width,
        flush_register_count: params.num_lines.div_ceil(params.reg_width as u64),
        partitions_per_register,
        partition_register_count: params
            .max_partitions
            .div_ceil(partitions_per_register as u64),
        valid_bits_in_partition_register: partitions_per_register * index_bit_width,
    };
    if params.partitioning {
        let multiregs = [
            ("cfg_set_partition", constants.partition_register_count, "max-partitions", params.max_partitions),
            ("flushed_set", constants.flush_register_count, "num-lines", params.num_lines),
        ];
        for (register, count, parameter, value) in multiregs {
            if count > MAX_REPLICAS {
                return Err(RegmapError::UnsupportedConfiguration {
                    detail: format!(
                        "{register} needs {count} replicas for {parameter} {value}, \
                         more than the {MAX_REPLICAS} one register block holds"
                    ),
                });
            }
        }
    }
    tracing::debug!(?params, ?constants, "resolved sizing parameters");
    Ok(constants)
}

/// `ceil(log2(n))` for `n >= 1`.
fn ceil_log2(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        u64::BITS - (n - 1).leading_zeros()
    }
}

fn parse_count(parameter: &'static str, raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RegmapError::InvalidParameters {
            parameter,
            value: raw.to_string(),
            reason: "missing value".into(),
        });
    }
    let value: i128 = trimmed.parse().map_err(|_| RegmapError::InvalidParameters {
        parameter,
        value: raw.to_string(),
        reason: "not an integer".into(),
    })?;
    if value < 0 {
        return Err(RegmapError::InvalidParameters {
            parameter,
            value: raw.to_string(),
            reason: "must not be negative".into(),
        });
    }
    u64::try_from(value).map_err(|_| RegmapError::InvalidParameters {
        parameter,
        value: raw.to_string(),
        reason: "too large".into(),
    })
}

fn parse_flag(parameter: &'static str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => {
            let value: i64 = other.parse().map_err(|_| RegmapError::InvalidParameters {
                parameter,
                value: raw.to_string(),
                reason: "expected 0/1 or true/false".into(),
            })?;
            Ok(value != 0)
        }
    }
}
