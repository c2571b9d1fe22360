//! Concatenation packing the partition registers into one vector.

use llcreg_core::ResolvedLayout;

use crate::text::provenance;
use crate::EmitOptions;

const TARGET: &str = "conf_regs_i_cfg_set_partition";

/// Whether a concatenation exists: partitioning on, at least one register.
pub fn applies_to(layout: &ResolvedLayout) -> bool {
    layout.params().partitioning && layout.constants().partition_register_count > 0
}

/// Render the assignment, highest replica first. Only the low
/// `valid_bits_in_partition_register` bits of each register are taken.
pub fn render(layout: &ResolvedLayout, _opts: &EmitOptions) -> String {
    let constants = layout.constants();
    let count = constants.partition_register_count;
    let valid = constants.valid_bits_in_partition_register;

    let mut out = provenance(layout, "//");
    out.push_str(&format!(
        "// {} partitions per register, {valid} valid bits per register\n",
        constants.partitions_per_register
    ));
    if count == 0 {
        return out;
    }

    let lead = format!("assign {TARGET} = {{");
    let indent = " ".repeat(lead.len());
    let parts: Vec<String> = (0..count)
        .rev()
        .map(|r| format!("conf_regs_i.cfg_set_partition[{r}][{}:0]", valid - 1))
        .collect();
    out.push_str(&lead);
    out.push_str(&parts.join(&format!(",\n{indent}")));
    out.push_str("};\n");
    out
}
