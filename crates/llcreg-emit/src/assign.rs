//! SystemVerilog macros connecting the regbus to the config structs
//! (`assign.svh`).

use llcreg_core::{Feature, Half, MultiregStyle, RegisterEntry, ResolvedLayout};

use crate::text::{continued, provenance, upper, NameParts};
use crate::EmitOptions;

const PARTITIONING_BANNER: &str = "/* set based cache partitioning */";

pub fn render(layout: &ResolvedLayout, opts: &EmitOptions) -> String {
    let prefix = upper(&opts.module);
    let guard = format!("{prefix}_ASSIGN_SVH_");
    let style = layout.style();

    let mut out = provenance(layout, "//");
    out.push_str(&format!("\n// Macros to connect {prefix} config registers\n\n"));
    out.push_str(&format!("`ifndef {guard}\n`define {guard}\n\n"));

    out.push_str(
        "// Assign the 32-bit HW2REG _low, _high and enable signals from the\n\
         // 64-bit d_struct member with the same name\n",
    );
    out.push_str(&continued(&[
        format!("`define {prefix}_ASSIGN_REGBUS_FROM_REGS_D_MEMBER(regbus, d_struct, member)"),
        "    assign regbus.member``_low.d = d_struct.member;".into(),
        "    assign regbus.member``_low.de = d_struct.member``_en;".into(),
        "    assign regbus.member``_high.d = d_struct.member >> 32;".into(),
        "    assign regbus.member``_high.de = d_struct.member``_en;".into(),
    ]));
    out.push('\n');
    out.push_str(&continued(&[
        format!("`define {prefix}_ASSIGN_REGBUS_FROM_MREGS_D_MEMBER(regbus, d_struct, member, offset)"),
        "    assign regbus.member``_low[offset].d = d_struct.member[offset];".into(),
        "    assign regbus.member``_low[offset].de = d_struct.member``_en[offset];".into(),
        "    assign regbus.member``_high[offset].d = d_struct.member[offset] >> 32;".into(),
        "    assign regbus.member``_high[offset].de = d_struct.member``_en[offset];".into(),
    ]));

    out.push_str("\n// Assign the HW2REG regbus struct from a d_struct\n");
    let mut d = vec![format!(
        "`define {prefix}_ASSIGN_REGBUS_FROM_REGS_D(regbus, d_struct)"
    )];
    let mut banner = false;
    for (_, entry) in layout.present() {
        if entry.replicas == Some(0) {
            continue;
        }
        mark_partitioning(entry, &mut d, &mut banner);
        d_lines(entry, style, &prefix, &mut d);
    }
    out.push_str(&continued(&d));

    out.push_str(
        "\n// Assign the 64-bit q_struct values from the corresponding 32-bit _low and _high\n\
         // REG2HW signals\n",
    );
    let mut q = vec![format!(
        "`define {prefix}_ASSIGN_REGS_Q_FROM_REGBUS(q_struct, regbus)"
    )];
    let mut banner = false;
    for (_, entry) in layout.present() {
        if !entry.hw_access.hardware_reads() || entry.replicas == Some(0) {
            continue;
        }
        mark_partitioning(entry, &mut q, &mut banner);
        q_lines(entry, style, &mut q);
    }
    out.push_str(&continued(&q));

    out.push_str("\n`endif\n");
    out
}

fn mark_partitioning(entry: &RegisterEntry, lines: &mut Vec<String>, banner: &mut bool) {
    if !*banner && entry.feature == Some(Feature::Partitioning) {
        lines.push(PARTITIONING_BANNER.to_string());
        *banner = true;
    }
}

fn d_lines(entry: &RegisterEntry, style: MultiregStyle, prefix: &str, lines: &mut Vec<String>) {
    let name = entry.name;
    match entry.replicas {
        None if entry.halves() == [Half::Full] => {
            let bus = NameParts::new(entry, None, Half::Full, style).regbus();
            lines.push(format!("    assign regbus.{bus}.d = d_struct.{};", entry.struct_member()));
            lines.push(format!("    assign regbus.{bus}.de = d_struct.{name}_en;"));
        }
        None => lines.push(format!(
            "    `{prefix}_ASSIGN_REGBUS_FROM_REGS_D_MEMBER(regbus, d_struct, {name})"
        )),
        Some(count) => {
            for r in 0..count {
                match style {
                    MultiregStyle::Banked => lines.push(format!(
                        "    `{prefix}_ASSIGN_REGBUS_FROM_MREGS_D_MEMBER(regbus, d_struct, {name}, {r})"
                    )),
                    MultiregStyle::Unrolled => {
                        for &half in entry.halves() {
                            let bus = NameParts::new(entry, Some(r), half, style).regbus();
                            let shift = if half == Half::High { " >> 32" } else { "" };
                            lines.push(format!("    assign regbus.{bus}.d = d_struct.{name}[{r}]{shift};"));
                            lines.push(format!("    assign regbus.{bus}.de = d_struct.{name}_en[{r}];"));
                        }
                    }
                }
            }
        }
    }
}

fn q_lines(entry: &RegisterEntry, style: MultiregStyle, lines: &mut Vec<String>) {
    let name = entry.name;
    let instances: Vec<(Option<u64>, String)> = match entry.replicas {
        None => vec![(None, name.to_string())],
        Some(count) => (0..count).map(|r| (Some(r), format!("{name}[{r}]"))).collect(),
    };
    for (replica, target) in instances {
        let value = if entry.halves() == [Half::Full] {
            format!("regbus.{}.q", NameParts::new(entry, replica, Half::Full, style).regbus())
        } else {
            format!(
                "{{regbus.{}.q, regbus.{}.q}}",
                NameParts::new(entry, replica, Half::High, style).regbus(),
                NameParts::new(entry, replica, Half::Low, style).regbus(),
            )
        };
        lines.push(format!("    assign q_struct.{target} = {value};"));
    }
}
