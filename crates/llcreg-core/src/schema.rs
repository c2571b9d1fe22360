//! Register catalog of the LLC configuration interface.
//!
//! The catalog is declared once, in address order. Registers of the cache
//! partitioning extension are always part of the catalog but only marked
//! present when the feature is enabled, so every consumer walks the same
//! list and filters on [`RegisterEntry::present`].

use serde::{Deserialize, Serialize};

use crate::params::{DerivedConstants, SizingParameters};

/// Bytes of one 32-bit bus word.
pub const WORD_BYTES: u64 = 4;
/// Bytes of one 64-bit register slot (low + high word).
pub const SLOT_BYTES: u64 = 8;

/// Address the base commit strobe skips to.
const COMMIT_SKIP_TO: u64 = 0x18;
/// First byte after the base block; `bist_status` is its last register.
const BASE_BLOCK_END: u64 = 0x4c;

/// Software view of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwAccess {
    /// `rw`
    ReadWrite,
    /// `ro`
    ReadOnly,
    /// `rw1s`: writing one sets the bit, hardware clears it.
    WriteOneToSet,
}

impl SwAccess {
    pub fn as_str(self) -> &'static str {
        match self {
            SwAccess::ReadWrite => "rw",
            SwAccess::ReadOnly => "ro",
            SwAccess::WriteOneToSet => "rw1s",
        }
    }
}

/// Hardware view of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HwAccess {
    /// `hrw`: hardware reads the value and may update it.
    ReadWrite,
    /// `hwo`: hardware only writes (status registers).
    WriteOnly,
}

impl HwAccess {
    pub fn as_str(self) -> &'static str {
        match self {
            HwAccess::ReadWrite => "hrw",
            HwAccess::WriteOnly => "hwo",
        }
    }

    /// Whether the register drives a value back into hardware.
    pub fn hardware_reads(self) -> bool {
        matches!(self, HwAccess::ReadWrite)
    }
}

/// Hardware-side data type of a register in the generated structs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HwType {
    /// One bit per cache way (`set_asso_t`).
    WayMask,
    /// A full register data word (`reg_data_t`).
    RegData,
    /// A single bit (`logic`).
    Bit,
}

/// Which half of a 64-bit register a 32-bit sub-word carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Half {
    Low,
    High,
    /// The whole register fits in one word.
    Full,
}

/// How a 64-bit multiregister is split into 32-bit sub-words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiregStyle {
    /// All low halves, then all high halves, each at 4-byte stride.
    #[default]
    Banked,
    /// One adjacent low/high pair per replica, at 8-byte stride.
    Unrolled,
}

impl std::fmt::Display for MultiregStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultiregStyle::Banked => write!(f, "banked"),
            MultiregStyle::Unrolled => write!(f, "unrolled"),
        }
    }
}

impl std::str::FromStr for MultiregStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "banked" => Ok(MultiregStyle::Banked),
            "unrolled" => Ok(MultiregStyle::Unrolled),
            other => Err(format!("unknown multireg style '{other}' (expected banked or unrolled)")),
        }
    }
}

/// Optional feature a register belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Set-based cache partitioning.
    Partitioning,
}

/// The single field of a 32-bit register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BitField {
    /// Bit range as written in the register description (`"0"`, `"0:0"`).
    pub bits: &'static str,
    /// Bit position of the field's LSB.
    pub lsb: u32,
    pub name: &'static str,
    pub description: &'static str,
}

/// "After this register, continue at absolute byte offset `target`."
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GapDirective {
    pub target: u64,
    /// Symbolic name of the reserved region.
    pub label: &'static str,
}

/// One register concept of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RegisterEntry {
    /// Lower snake-case name, e.g. `cfg_spm`.
    pub name: &'static str,
    pub description: &'static str,
    pub sw_access: SwAccess,
    pub hw_access: HwAccess,
    pub hw_type: HwType,
    /// 64 for a low/high pair, 32 for a single word.
    pub width_bits: u32,
    /// Field of a 32-bit register. 64-bit registers use implicit
    /// `low`/`high` fields.
    pub field: Option<BitField>,
    /// `None` for a singular register, `Some(n)` for an n-way multiregister.
    pub replicas: Option<u64>,
    pub feature: Option<Feature>,
    pub present: bool,
    pub reset_value: Option<u64>,
    pub gap_after: Option<GapDirective>,
    /// Half descriptions name their bit range (`[31:0]`, `[63:32]`).
    pub bit_ranges: bool,
}

impl RegisterEntry {
    pub(crate) fn wide(name: &'static str, description: &'static str, sw: SwAccess, hw: HwAccess, ty: HwType) -> Self {
        Self {
            name,
            description,
            sw_access: sw,
            hw_access: hw,
            hw_type: ty,
            width_bits: 64,
            field: None,
            replicas: None,
            feature: None,
            present: true,
            reset_value: None,
            gap_after: None,
            bit_ranges: false,
        }
    }

    pub(crate) fn narrow(name: &'static str, description: &'static str, sw: SwAccess, hw: HwAccess, field: BitField) -> Self {
        Self {
            width_bits: 32,
            field: Some(field),
            ..Self::wide(name, description, sw, hw, HwType::Bit)
        }
    }

    pub(crate) fn strobe(name: &'static str, description: &'static str, field_desc: &'static str, gap: GapDirective) -> Self {
        Self {
            gap_after: Some(gap),
            ..Self::narrow(
                name,
                description,
                SwAccess::WriteOneToSet,
                HwAccess::ReadWrite,
                BitField {
                    bits: "0",
                    lsb: 0,
                    name: "commit",
                    description: field_desc,
                },
            )
        }
    }

    fn with_reset(mut self, value: u64) -> Self {
        self.reset_value = Some(value);
        self
    }

    fn with_bit_ranges(mut self) -> Self {
        self.bit_ranges = true;
        self
    }

    fn replicated(mut self, count: u64) -> Self {
        self.replicas = Some(count);
        self
    }

    fn in_feature(mut self, feature: Feature, enabled: bool) -> Self {
        self.feature = Some(feature);
        self.present = enabled;
        self
    }

    /// Whether the register is a self-clearing commit strobe.
    pub fn is_strobe(&self) -> bool {
        self.sw_access == SwAccess::WriteOneToSet
    }

    pub fn is_multireg(&self) -> bool {
        self.replicas.is_some()
    }

    /// Number of addressable instances (1 for a singular register).
    pub fn instance_count(&self) -> u64 {
        self.replicas.unwrap_or(1)
    }

    /// Sub-words of one instance, in address order within a pair.
    pub fn halves(&self) -> &'static [Half] {
        if self.width_bits > 32 {
            &[Half::Low, Half::High]
        } else {
            &[Half::Full]
        }
    }

    /// Bytes occupied by one instance.
    pub fn instance_bytes(&self) -> u64 {
        self.halves().len() as u64 * WORD_BYTES
    }

    /// Struct member carrying the register's hardware value.
    ///
    /// Strobes are named after the register; other single-field registers
    /// after register and field.
    pub fn struct_member(&self) -> String {
        match &self.field {
            Some(field) if !self.is_strobe() => format!("{}_{}", self.name, field.name),
            _ => self.name.to_string(),
        }
    }
}

/// Ordered register catalog for one parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Catalog {
    pub params: SizingParameters,
    pub constants: DerivedConstants,
    pub style: MultiregStyle,
    pub entries: Vec<RegisterEntry>,
}

impl Catalog {
    /// Present entries with their catalog index.
    pub fn present(&self) -> impl Iterator<Item = (usize, &RegisterEntry)> {
        self.entries.iter().enumerate().filter(|(_, e)| e.present)
    }

    pub fn entry(&self, name: &str) -> Option<&RegisterEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Build the catalog for resolved constants.
pub fn build_catalog(
    params: SizingParameters,
    constants: DerivedConstants,
    style: MultiregStyle,
) -> Catalog {
    use HwAccess::{ReadWrite as Hrw, WriteOnly as Hwo};
    use HwType::{RegData, WayMask};
    use SwAccess::{ReadOnly as Ro, ReadWrite as Rw};

    let partitioning = params.partitioning;
    let n_partition = constants.partition_register_count;
    // flush partition pair, partition registers, strobe, padding
    let partition_skip_to = BASE_BLOCK_END
        .saturating_add(SLOT_BYTES)
        .saturating_add(n_partition.saturating_mul(SLOT_BYTES))
        .saturating_add(SLOT_BYTES);

    let entries = vec![
        RegisterEntry::wide("cfg_spm", "SPM Configuration", Rw, Hrw, WayMask).with_reset(0),
        RegisterEntry::wide("cfg_flush", "Flush Configuration", Rw, Hrw, WayMask),
        RegisterEntry::strobe(
            "commit_cfg",
            "Commit the configuration",
            "commit configuration",
            GapDirective {
                target: COMMIT_SKIP_TO,
                label: "commit_padding",
            },
        ),
        RegisterEntry::wide("flushed", "Flushed Flag", Ro, Hrw, WayMask),
        RegisterEntry::wide("bist_out", "Tag Storage BIST Result", Ro, Hwo, WayMask),
        RegisterEntry::wide("set_asso", "Instantiated Set-Associativity", Ro, Hwo, RegData),
        RegisterEntry::wide("num_lines", "Instantiated Number of Cache-Lines", Ro, Hwo, RegData),
        RegisterEntry::wide("num_blocks", "Instantiated Number of Blocks", Ro, Hwo, RegData),
        RegisterEntry::wide("version", "AXI LLC Version", Ro, Hwo, RegData),
        RegisterEntry::narrow(
            "bist_status",
            "Status register of the BIST",
            Ro,
            Hwo,
            BitField {
                bits: "0:0",
                lsb: 0,
                name: "done",
                description: "BIST successfully completed",
            },
        ),
        RegisterEntry::wide(
            "cfg_flush_partition",
            "Index-based Partition Flush Configuration",
            Rw,
            Hrw,
            RegData,
        )
        .with_reset(u64::MAX)
        .with_bit_ranges()
        .in_feature(Feature::Partitioning, partitioning),
        RegisterEntry::wide(
            "cfg_set_partition",
            "Index-based Partition Configuration",
            Rw,
            Hrw,
            RegData,
        )
        .replicated(n_partition)
        .with_bit_ranges()
        .in_feature(Feature::Partitioning, partitioning),
        RegisterEntry::strobe(
            "commit_partition_cfg",
            "Commit the set partition configuration",
            "commit set partition configuration",
            GapDirective {
                target: partition_skip_to,
                label: "commit_partition_padding",
            },
        )
        .in_feature(Feature::Partitioning, partitioning),
        RegisterEntry::wide("flushed_set", "Index-based Flushed Flag", Ro, Hrw, RegData)
            .replicated(constants.flush_register_count)
            .in_feature(Feature::Partitioning, partitioning),
    ];

    tracing::debug!(
        present = entries.iter().filter(|e| e.present).count(),
        total = entries.len(),
        %style,
        "built register catalog"
    );

    Catalog {
        params,
        constants,
        style,
        entries,
    }
}
