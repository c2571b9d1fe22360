//! SystemVerilog struct typedef macros (`typedef.svh`).

use llcreg_core::{Feature, HwType, RegisterEntry, ResolvedLayout};

use crate::text::{continued, provenance, upper};
use crate::EmitOptions;

const PARTITIONING_BANNER: &str = "/* set based cache partitioning */";

pub fn render(layout: &ResolvedLayout, opts: &EmitOptions) -> String {
    let prefix = upper(&opts.module);
    let guard = format!("{prefix}_TYPEDEF_SVH_");

    let mut out = provenance(layout, "//");
    out.push_str(&format!("\n// Macros to define {prefix} types and structs\n\n"));
    out.push_str(&format!("`ifndef {guard}\n`define {guard}\n\n"));

    out.push_str("// Hardware -> registers: value and write enable of every register\n");
    let mut d = vec![
        format!("`define {prefix}_TYPEDEF_REGS_D_T(cfg_regs_d_t, reg_data_t, set_asso_t)"),
        "  typedef struct packed {".to_string(),
    ];
    members(layout, &mut d, |entry, lines| {
        let (ty, dims) = declaration(entry)?;
        lines.push(format!("    {ty}{dims} {};", entry.struct_member()));
        lines.push(format!("    logic{dims} {}_en;", entry.name));
        Some(())
    });
    d.push("  } cfg_regs_d_t;".to_string());
    out.push_str(&continued(&d));

    out.push_str("\n// Registers -> hardware: value of every register hardware reads back\n");
    let mut q = vec![
        format!("`define {prefix}_TYPEDEF_REGS_Q_T(cfg_regs_q_t, reg_data_t, set_asso_t)"),
        "  typedef struct packed {".to_string(),
    ];
    members(layout, &mut q, |entry, lines| {
        if !entry.hw_access.hardware_reads() {
            return None;
        }
        let (ty, dims) = declaration(entry)?;
        lines.push(format!("    {ty}{dims} {};", entry.name));
        Some(())
    });
    q.push("  } cfg_regs_q_t;".to_string());
    out.push_str(&continued(&q));

    out.push('\n');
    out.push_str(&continued(&[
        format!("`define {prefix}_TYPEDEF_ALL(__name, __reg_data_t, __set_asso_t)"),
        format!("  `{prefix}_TYPEDEF_REGS_D_T(__name``_cfg_regs_d_t, __reg_data_t, __set_asso_t)"),
        format!("  `{prefix}_TYPEDEF_REGS_Q_T(__name``_cfg_regs_q_t, __reg_data_t, __set_asso_t)"),
    ]));
    out.push_str("\n`endif\n");
    out
}

/// Walk present entries, inserting the partitioning banner before the first
/// extension member that `emit` produces lines for.
fn members<F>(layout: &ResolvedLayout, lines: &mut Vec<String>, mut emit: F)
where
    F: FnMut(&RegisterEntry, &mut Vec<String>) -> Option<()>,
{
    let mut banner = false;
    for (_, entry) in layout.present() {
        let mark = lines.len();
        if emit(entry, lines).is_some() && !banner && entry.feature == Some(Feature::Partitioning) {
            lines.insert(mark, PARTITIONING_BANNER.to_string());
            banner = true;
        }
    }
}

/// Struct type and packed dimensions of an entry, `None` for a multiregister
/// without replicas.
fn declaration(entry: &RegisterEntry) -> Option<(&'static str, String)> {
    let ty = match entry.hw_type {
        HwType::WayMask => "set_asso_t",
        HwType::RegData => "reg_data_t",
        HwType::Bit => "logic",
    };
    match entry.replicas {
        None => Some((ty, String::new())),
        Some(0) => None,
        Some(n) => Some((ty, format!(" [{}:0]", n - 1))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llcreg_core::{build_layout, MultiregStyle, SizingParameters};

    fn render_for(max_partitions: u64, partitioning: bool) -> String {
        let layout = build_layout(
            &SizingParameters::new(64, 256, max_partitions, partitioning),
            MultiregStyle::Banked,
        )
        .unwrap();
        render(&layout, &EmitOptions::default())
    }

    fn macro_body<'a>(text: &'a str, name: &str) -> &'a str {
        let start = text.find(&format!("`define {name}(")).unwrap();
        let end = start + text[start..].find("} cfg_regs").unwrap();
        &text[start..end]
    }

    #[test]
    fn base_structs() {
        let text = render_for(256, false);
        assert!(text.contains("`ifndef AXI_LLC_TYPEDEF_SVH_"));
        let d = macro_body(&text, "AXI_LLC_TYPEDEF_REGS_D_T");
        assert!(d.contains("set_asso_t cfg_spm;"));
        assert!(d.contains("logic cfg_spm_en;"));
        assert!(d.contains("logic commit_cfg;"));
        assert!(d.contains("logic bist_status_done;"));
        assert!(d.contains("reg_data_t version;"));
        assert!(!d.contains("partition"));

        let q = macro_body(&text, "AXI_LLC_TYPEDEF_REGS_Q_T");
        assert!(q.contains("set_asso_t cfg_spm;"));
        assert!(q.contains("logic commit_cfg;"));
        assert!(q.contains("set_asso_t flushed;"));
        assert!(!q.contains("bist_out"));
        assert!(!q.contains("_en;"));
        assert!(text.trim_end().ends_with("`endif"));
    }

    #[test]
    fn partitioning_arrays() {
        let text = render_for(256, true);
        let d = macro_body(&text, "AXI_LLC_TYPEDEF_REGS_D_T");
        assert!(d.contains(PARTITIONING_BANNER));
        assert!(d.contains("reg_data_t cfg_flush_partition;"));
        assert!(d.contains("reg_data_t [31:0] cfg_set_partition;"));
        assert!(d.contains("logic [31:0] cfg_set_partition_en;"));
        assert!(d.contains("logic commit_partition_cfg;"));
        assert!(d.contains("reg_data_t [3:0] flushed_set;"));

        let q = macro_body(&text, "AXI_LLC_TYPEDEF_REGS_Q_T");
        assert!(q.contains("reg_data_t [31:0] cfg_set_partition;"));
        assert!(q.contains("reg_data_t [3:0] flushed_set;"));
    }

    #[test]
    fn zero_replicas_skip_member() {
        let text = render_for(0, true);
        assert!(!text.contains("cfg_set_partition"));
        assert!(text.contains("cfg_flush_partition;"));
    }

    #[test]
    fn continuation_lines() {
        let text = render_for(256, true);
        let d = macro_body(&text, "AXI_LLC_TYPEDEF_REGS_D_T");
        for line in d.lines().filter(|l| !l.trim().is_empty()) {
            assert!(line.ends_with('\\'), "missing continuation: {line}");
        }
    }
}
