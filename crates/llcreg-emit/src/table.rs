//! Tabular view of a resolved layout for terminals and scripts.

use llcreg_core::ResolvedLayout;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::Result;
use crate::text::{half_description, NameParts};

/// Output format of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Text,
    Json,
}

impl TableFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => TableFormat::Json,
            _ => TableFormat::Text,
        }
    }
}

/// One 32-bit word of the register block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub address: u64,
    pub register: String,
    pub access: String,
    pub description: String,
    pub reserved: bool,
}

/// Rows for every sub-word and reserved gap, in address order.
pub fn rows(layout: &ResolvedLayout) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = layout
        .slots
        .iter()
        .map(|slot| {
            let entry = layout.entry(slot.entry);
            TableRow {
                address: slot.address,
                register: NameParts::new(entry, slot.replica, slot.half, layout.style()).instance(),
                access: format!("{}/{}", entry.sw_access.as_str(), entry.hw_access.as_str()),
                description: half_description(entry, slot.half),
                reserved: false,
            }
        })
        .collect();
    for gap in &layout.gaps {
        rows.push(TableRow {
            address: gap.start,
            register: gap.label.to_ascii_uppercase(),
            access: "-".to_string(),
            description: format!("reserved up to {:#x}", gap.end),
            reserved: true,
        });
    }
    rows.sort_by_key(|r| r.address);
    rows
}

/// Render the layout table in `format`.
pub fn render(layout: &ResolvedLayout, format: TableFormat) -> Result<String> {
    let rows = rows(layout);
    match format {
        TableFormat::Json => Ok(serde_json::to_string_pretty(&data(layout, &rows))?),
        TableFormat::Text => Ok(text(layout, &rows)),
    }
}

fn data(layout: &ResolvedLayout, rows: &[TableRow]) -> Value {
    json!({
        "parameters": layout.params(),
        "constants": layout.constants(),
        "style": layout.style(),
        "size": layout.size,
        "fingerprint": layout.fingerprint(),
        "words": rows,
    })
}

fn text(layout: &ResolvedLayout, rows: &[TableRow]) -> String {
    let p = layout.params();
    let reg_w = rows.iter().map(|r| r.register.len()).max().unwrap_or(8).max(8);
    let acc_w = rows.iter().map(|r| r.access.len()).max().unwrap_or(6).max(6);
    let desc_w = rows.iter().map(|r| r.description.len()).max().unwrap_or(11).max(11);
    let addr_w = 7;

    let mut text = format!(
        "=== Register Layout ({}, {} style) ===\n\nreg-width={} num-lines={} max-partitions={} partitioning={}\n\n",
        if p.partitioning { "partitioned" } else { "base" },
        layout.style(),
        p.reg_width,
        p.num_lines,
        p.max_partitions,
        p.partitioning,
    );

    let rule = |l: char, m: char, r: char| {
        format!(
            "{l}{:─<aw$}{m}{:─<rw$}{m}{:─<cw$}{m}{:─<dw$}{r}\n",
            "",
            "",
            "",
            "",
            aw = addr_w + 2,
            rw = reg_w + 2,
            cw = acc_w + 2,
            dw = desc_w + 2,
        )
    };
    text.push_str(&rule('┌', '┬', '┐'));
    text.push_str(&format!(
        "│ {:<addr_w$} │ {:<reg_w$} │ {:<acc_w$} │ {:<desc_w$} │\n",
        "Address", "Register", "Access", "Description"
    ));
    text.push_str(&rule('├', '┼', '┤'));
    for row in rows {
        let address = format!("{:#06x}", row.address);
        text.push_str(&format!(
            "│ {address:<addr_w$} │ {:<reg_w$} │ {:<acc_w$} │ {:<desc_w$} │\n",
            row.register, row.access, row.description
        ));
    }
    text.push_str(&rule('└', '┴', '┘'));
    text.push_str(&format!(
        "\n{} words, block size {:#x} bytes, fingerprint {}\n",
        rows.len(),
        layout.size,
        layout.fingerprint()
    ));
    text
}
