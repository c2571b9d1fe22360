//! Register-tool description (hjson) of the configuration register file.

use llcreg_core::{Half, MultiregStyle, RegisterEntry, ResolvedLayout};

use crate::text::{half_description, half_reset, provenance, upper, NameParts};
use crate::EmitOptions;

/// Render the register description consumed by the register generator.
///
/// Banked multiregisters become `multireg` blocks; unrolled ones become one
/// register per replica and half. A `skipto` follows every reserved gap.
pub fn render(layout: &ResolvedLayout, opts: &EmitOptions) -> String {
    let style = layout.style();
    let mut items: Vec<String> = Vec::new();

    for (_, entry) in layout.present() {
        match entry.replicas {
            None => {
                for &half in entry.halves() {
                    items.push(register_item(entry, None, half, style));
                }
            }
            Some(0) => {}
            Some(count) => match style {
                MultiregStyle::Banked => {
                    for &half in entry.halves() {
                        items.push(multireg_item(entry, half, count, opts));
                    }
                }
                MultiregStyle::Unrolled => {
                    for r in 0..count {
                        for &half in entry.halves() {
                            items.push(register_item(entry, Some(r), half, style));
                        }
                    }
                }
            },
        }
        if let Some(gap) = layout.gap_after(entry.name) {
            items.push(format!("    {{skipto: \"{:#x}\"}}", gap.end));
        }
    }

    let mut out = provenance(layout, "//");
    out.push('\n');
    out.push_str(&format!(
        "{{\n  name: \"{}\",\n  clock_primary: \"clk_i\",\n  bus_interfaces: [\n    {{ protocol: \"reg_iface\", direction: \"device\" }}\n  ],\n  regwidth: 32,\n  registers: [\n\n",
        opts.module
    ));
    out.push_str(&items.join(",\n"));
    out.push_str("\n  ]\n}\n");
    out
}

fn register_item(entry: &RegisterEntry, replica: Option<u64>, half: Half, style: MultiregStyle) -> String {
    let name = NameParts::new(entry, replica, half, style).register();
    format!(
        "    {{ name: \"{name}\",\n      desc: \"{}\",\n      swaccess: \"{}\",\n      hwaccess: \"{}\",\n      fields: [\n        {}\n      ]\n    }}",
        half_description(entry, half),
        entry.sw_access.as_str(),
        entry.hw_access.as_str(),
        field(entry, half),
    )
}

fn multireg_item(entry: &RegisterEntry, half: Half, count: u64, opts: &EmitOptions) -> String {
    let name = NameParts::new(entry, Some(0), half, MultiregStyle::Banked).register();
    format!(
        "    {{ multireg: {{\n        name: \"{name}\",\n        desc: \"{}\",\n        count: \"{count}\",\n        cname: \"{}\",\n        swaccess: \"{}\",\n        hwaccess: \"{}\",\n        fields: [\n          {}\n        ]\n      }}\n    }}",
        half_description(entry, half),
        upper(&opts.module),
        entry.sw_access.as_str(),
        entry.hw_access.as_str(),
        field(entry, half),
    )
}

fn field(entry: &RegisterEntry, half: Half) -> String {
    let resval = entry
        .reset_value
        .map(|v| format!("resval: {}, ", half_reset(v, half)))
        .unwrap_or_default();
    match (half, &entry.field) {
        (Half::Low, _) => format!("{{bits: \"31:0\", {resval}name: \"low\", desc: \"lower 32 bit\"}}"),
        (Half::High, _) => format!("{{bits: \"31:0\", {resval}name: \"high\", desc: \"upper 32 bit\"}}"),
        (Half::Full, Some(f)) => format!(
            "{{bits: \"{}\", {resval}name: \"{}\", desc: \"{}\"}}",
            f.bits, f.name, f.description
        ),
        (Half::Full, None) => format!("{{bits: \"31:0\", {resval}name: \"value\", desc: \"register value\"}}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llcreg_core::{build_layout, SizingParameters};

    fn render_for(max_partitions: u64, partitioning: bool, style: MultiregStyle) -> (ResolvedLayout, String) {
        let layout = build_layout(
            &SizingParameters::new(64, 256, max_partitions, partitioning),
            style,
        )
        .unwrap();
        let text = render(&layout, &EmitOptions::default());
        (layout, text)
    }

    #[test]
    fn base_description() {
        let (_, text) = render_for(256, false, MultiregStyle::Banked);
        assert!(text.contains("name: \"axi_llc\""));
        assert!(text.contains("{ name: \"CFG_SPM_LOW\""));
        assert!(text.contains("{bits: \"31:0\", resval: 0, name: \"low\", desc: \"lower 32 bit\"}"));
        assert!(text.contains("swaccess: \"rw1s\""));
        assert!(text.contains("{skipto: \"0x18\"}"));
        assert!(text.contains("{bits: \"0:0\", name: \"done\", desc: \"BIST successfully completed\"}"));
        assert!(!text.contains("PARTITION"));
        assert!(!text.contains("multireg"));
        assert!(text.trim_end().ends_with('}'));
    }

    #[test]
    fn partitioning_multiregs() {
        let (_, text) = render_for(256, true, MultiregStyle::Banked);
        assert!(text.contains("name: \"CFG_SET_PARTITION_LOW\""));
        assert!(text.contains("name: \"CFG_SET_PARTITION_HIGH\""));
        assert!(text.contains("count: \"32\""));
        assert!(text.contains("count: \"4\""));
        assert!(text.contains("cname: \"AXI_LLC\""));
        assert!(text.contains("resval: 4294967295, name: \"high\""));
        assert!(text.contains("{skipto: \"0x15c\"}"));
    }

    #[test]
    fn partition_halves_name_bit_ranges() {
        let (_, text) = render_for(256, true, MultiregStyle::Banked);
        assert!(text.contains("desc: \"Index-based Partition Flush Configuration [31:0] (lower 32 bit)\""));
        assert!(text.contains("desc: \"Index-based Partition Configuration [63:32] (upper 32 bit)\""));
        assert!(text.contains("desc: \"Index-based Flushed Flag (lower 32 bit)\""));
        assert!(!text.contains("Flushed Flag ["));
    }

    #[test]
    fn zero_replicas_omit_multireg() {
        let (_, text) = render_for(0, true, MultiregStyle::Banked);
        assert!(!text.contains("CFG_SET_PARTITION"));
        assert!(text.contains("CFG_FLUSH_PARTITION_LOW"));
        assert!(text.contains("COMMIT_PARTITION_CFG"));
        assert!(text.contains("{skipto: \"0x5c\"}"));
    }

    #[test]
    fn declared_words_match_layout() {
        for style in [MultiregStyle::Banked, MultiregStyle::Unrolled] {
            let (layout, text) = render_for(20, true, style);
            let singles = text.matches("{ name: \"").count() as u64;
            let replicated: u64 = text
                .lines()
                .filter_map(|l| l.trim().strip_prefix("count: \""))
                .map(|c| c.trim_end_matches("\",").parse::<u64>().unwrap())
                .sum();
            assert_eq!(singles + replicated, layout.slots.len() as u64, "{style}");
        }
    }

    #[test]
    fn unrolled_names() {
        let (_, text) = render_for(256, true, MultiregStyle::Unrolled);
        assert!(text.contains("name: \"CFG_SET_PARTITION0_LOW\""));
        assert!(text.contains("name: \"CFG_SET_PARTITION31_HIGH\""));
        assert!(text.contains("name: \"FLUSHED_SET3_HIGH\""));
        assert!(!text.contains("multireg"));
    }
}
