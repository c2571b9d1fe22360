//! `llcreg check`: resolve the parameters and summarize the layout.

use anyhow::Result;
use llcreg_core::ResolvedLayout;
use serde_json::json;

use super::Inputs;

pub fn run(inputs: &Inputs, format: Option<&str>) -> Result<()> {
    let layout = inputs.layout()?;
    match format {
        Some("json") => println!("{}", serde_json::to_string_pretty(&summary_json(&layout))?),
        _ => print!("{}", summary(&layout)),
    }
    Ok(())
}

pub(crate) fn summary(layout: &ResolvedLayout) -> String {
    let p = layout.params();
    let c = layout.constants();
    let mut out = String::new();
    out.push_str(&format!(
        "Parameters: reg-width={} num-lines={} max-partitions={} partitioning={}\n",
        p.reg_width, p.num_lines, p.max_partitions, p.partitioning
    ));
    out.push_str(&format!("  index bit width:          {}\n", c.index_bit_width));
    out.push_str(&format!("  flush registers:          {}\n", c.flush_register_count));
    out.push_str(&format!("  partitions per register:  {}\n", c.partitions_per_register));
    out.push_str(&format!("  partition registers:      {}\n", c.partition_register_count));
    out.push_str(&format!(
        "  valid partition bits:     {}\n",
        c.valid_bits_in_partition_register
    ));
    out.push_str(&format!("  multireg style:           {}\n", layout.style()));
    out.push_str(&format!(
        "Register block: {:#x} bytes ({} words)\n",
        layout.size,
        layout.size / 4
    ));
    out.push_str(&format!("Fingerprint: {}\n", layout.fingerprint()));
    out
}

pub(crate) fn summary_json(layout: &ResolvedLayout) -> serde_json::Value {
    json!({
        "parameters": layout.params(),
        "constants": layout.constants(),
        "style": layout.style(),
        "size": layout.size,
        "fingerprint": layout.fingerprint(),
    })
}
