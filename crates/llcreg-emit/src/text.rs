//! Naming and formatting helpers shared by all renderers.
//!
//! Every output derives register names from the same [`NameParts`], so a
//! sub-word is called `CFG_SET_PARTITION_LOW_3` in C, `CfgSetPartitionLow3`
//! in the address enum and `cfg_set_partition_low[3]` on the regbus.

use llcreg_core::{Half, MultiregStyle, RegisterEntry, ResolvedLayout};

/// `cfg_set_partition` → `CfgSetPartition`.
pub fn camel(snake: &str) -> String {
    snake
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `cfg_spm` → `CFG_SPM`.
pub fn upper(snake: &str) -> String {
    snake.to_ascii_uppercase()
}

/// Decomposed name of one sub-word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    /// Register name, with the replica index appended for unrolled replicas.
    pub stem: String,
    /// `low`/`high`, absent for 32-bit registers.
    pub half: Option<&'static str>,
    /// Replica index of a banked multiregister.
    pub index: Option<u64>,
}

impl NameParts {
    pub fn new(entry: &RegisterEntry, replica: Option<u64>, half: Half, style: MultiregStyle) -> Self {
        let (stem, index) = match (replica, style) {
            (Some(r), MultiregStyle::Unrolled) => (format!("{}{r}", entry.name), None),
            (Some(r), MultiregStyle::Banked) => (entry.name.to_string(), Some(r)),
            (None, _) => (entry.name.to_string(), None),
        };
        Self {
            stem,
            half: half_suffix(half),
            index,
        }
    }

    /// Register-tool name, without the replica index: `CFG_SET_PARTITION_LOW`.
    pub fn register(&self) -> String {
        match self.half {
            Some(h) => format!("{}_{}", upper(&self.stem), upper(h)),
            None => upper(&self.stem),
        }
    }

    /// Register-tool instance name: `CFG_SET_PARTITION_LOW_3`.
    pub fn instance(&self) -> String {
        match self.index {
            Some(i) => format!("{}_{i}", self.register()),
            None => self.register(),
        }
    }

    /// Address enum symbol: `CfgSetPartitionLow3`.
    pub fn symbol(&self) -> String {
        let mut s = camel(&self.stem);
        if let Some(h) = self.half {
            s.push_str(&camel(h));
        }
        if let Some(i) = self.index {
            s.push_str(&i.to_string());
        }
        s
    }

    /// Regbus struct member: `cfg_set_partition_low[3]`.
    pub fn regbus(&self) -> String {
        let mut s = self.stem.clone();
        if let Some(h) = self.half {
            s.push('_');
            s.push_str(h);
        }
        if let Some(i) = self.index {
            s.push_str(&format!("[{i}]"));
        }
        s
    }
}

fn half_suffix(half: Half) -> Option<&'static str> {
    match half {
        Half::Low => Some("low"),
        Half::High => Some("high"),
        Half::Full => None,
    }
}

/// Description of one half of a register.
pub fn half_description(entry: &RegisterEntry, half: Half) -> String {
    let description = entry.description;
    match (half, entry.bit_ranges) {
        (Half::Low, true) => format!("{description} [31:0] (lower 32 bit)"),
        (Half::High, true) => format!("{description} [63:32] (upper 32 bit)"),
        (Half::Low, false) => format!("{description} (lower 32 bit)"),
        (Half::High, false) => format!("{description} (upper 32 bit)"),
        (Half::Full, _) => description.to_string(),
    }
}

/// Reset value carried by one half of a register.
pub fn half_reset(value: u64, half: Half) -> u64 {
    match half {
        Half::Low => value & 0xFFFF_FFFF,
        Half::High => value >> 32,
        Half::Full => value,
    }
}

/// Header comment identifying the layout an artifact was rendered from.
pub fn provenance(layout: &ResolvedLayout, comment: &str) -> String {
    let p = layout.params();
    format!(
        "{comment} Generated by llcreg {}. Do not edit.\n\
         {comment} Parameters: reg-width={} num-lines={} max-partitions={} partitioning={} style={}\n\
         {comment} Register block: 0x{:x} bytes, layout fingerprint {}\n",
        env!("CARGO_PKG_VERSION"),
        p.reg_width,
        p.num_lines,
        p.max_partitions,
        u8::from(p.partitioning),
        layout.style(),
        layout.size,
        layout.fingerprint(),
    )
}

/// Join macro body lines with right-aligned `\` continuations.
///
/// The last line carries no continuation.
pub fn continued(lines: &[String]) -> String {
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i + 1 == lines.len() {
            out.push_str(line);
        } else {
            out.push_str(&format!("{line:<width$} \\"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use llcreg_core::{build_layout, SizingParameters};

    #[test]
    fn camel_case() {
        assert_eq!(camel("cfg_set_partition"), "CfgSetPartition");
        assert_eq!(camel("cfg_set_partition3"), "CfgSetPartition3");
        assert_eq!(camel("commit_padding"), "CommitPadding");
    }

    #[test]
    fn sub_word_names() {
        let layout = build_layout(
            &SizingParameters::new(64, 256, 256, true),
            MultiregStyle::Banked,
        )
        .unwrap();
        let entry = layout.catalog.entry("cfg_set_partition").unwrap();

        let banked = NameParts::new(entry, Some(3), Half::Low, MultiregStyle::Banked);
        assert_eq!(banked.register(), "CFG_SET_PARTITION_LOW");
        assert_eq!(banked.instance(), "CFG_SET_PARTITION_LOW_3");
        assert_eq!(banked.symbol(), "CfgSetPartitionLow3");
        assert_eq!(banked.regbus(), "cfg_set_partition_low[3]");

        let unrolled = NameParts::new(entry, Some(3), Half::High, MultiregStyle::Unrolled);
        assert_eq!(unrolled.instance(), "CFG_SET_PARTITION3_HIGH");
        assert_eq!(unrolled.symbol(), "CfgSetPartition3High");
        assert_eq!(unrolled.regbus(), "cfg_set_partition3_high");

        let strobe = layout.catalog.entry("commit_cfg").unwrap();
        let single = NameParts::new(strobe, None, Half::Full, MultiregStyle::Banked);
        assert_eq!(single.instance(), "COMMIT_CFG");
        assert_eq!(single.symbol(), "CommitCfg");
    }

    #[test]
    fn half_descriptions() {
        let layout = build_layout(
            &SizingParameters::new(64, 256, 256, true),
            MultiregStyle::Banked,
        )
        .unwrap();
        let flush = layout.catalog.entry("cfg_flush_partition").unwrap();
        assert_eq!(
            half_description(flush, Half::Low),
            "Index-based Partition Flush Configuration [31:0] (lower 32 bit)"
        );
        assert_eq!(
            half_description(flush, Half::High),
            "Index-based Partition Flush Configuration [63:32] (upper 32 bit)"
        );
        let set = layout.catalog.entry("cfg_set_partition").unwrap();
        assert_eq!(
            half_description(set, Half::High),
            "Index-based Partition Configuration [63:32] (upper 32 bit)"
        );
        let flushed = layout.catalog.entry("flushed_set").unwrap();
        assert_eq!(
            half_description(flushed, Half::Low),
            "Index-based Flushed Flag (lower 32 bit)"
        );
        let strobe = layout.catalog.entry("commit_cfg").unwrap();
        assert_eq!(half_description(strobe, Half::Full), "Commit the configuration");
    }

    #[test]
    fn reset_halves() {
        assert_eq!(half_reset(u64::MAX, Half::Low), 0xFFFF_FFFF);
        assert_eq!(half_reset(0x1_0000_0002, Half::High), 1);
        assert_eq!(half_reset(0x1_0000_0002, Half::Low), 2);
    }

    #[test]
    fn continuation_alignment() {
        let body = continued(&["a".into(), "long line".into(), "end".into()]);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "a         \\");
        assert_eq!(lines[1], "long line \\");
        assert_eq!(lines[2], "end");
    }
}
