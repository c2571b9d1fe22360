//! Address enumeration used by the test benches.

use llcreg_core::ResolvedLayout;

use crate::text::{camel, provenance, NameParts};
use crate::EmitOptions;

/// Every sub-word and reserved gap as `(symbol, address)`, in address order.
pub fn symbols(layout: &ResolvedLayout) -> Vec<(String, u64)> {
    let mut symbols: Vec<(String, u64)> = layout
        .slots
        .iter()
        .map(|slot| {
            let entry = layout.entry(slot.entry);
            let name = NameParts::new(entry, slot.replica, slot.half, layout.style());
            (name.symbol(), slot.address)
        })
        .chain(layout.gaps.iter().map(|gap| (camel(gap.label), gap.start)))
        .collect();
    symbols.sort_by_key(|(_, address)| *address);
    symbols
}

pub fn render(layout: &ResolvedLayout, opts: &EmitOptions) -> String {
    let symbols = symbols(layout);
    let width = symbols.iter().map(|(s, _)| s.len()).max().unwrap_or(0);

    let mut out = provenance(layout, "//");
    out.push_str("\n  // Config register addresses\n  typedef enum logic [31:0] {\n");
    for (i, (symbol, address)) in symbols.iter().enumerate() {
        let sep = if i + 1 == symbols.len() { "" } else { "," };
        out.push_str(&format!("    {symbol:<width$} = 32'h{address:02x}{sep}\n"));
    }
    out.push_str(&format!("  }} {};\n", opts.addr_enum));
    out
}
