//! C register definitions for software (`<module>_regs.h`).

use llcreg_core::{Half, MultiregStyle, RegisterEntry, ResolvedLayout};

use crate::text::{half_description, provenance, upper, NameParts};
use crate::EmitOptions;

pub fn render(layout: &ResolvedLayout, opts: &EmitOptions) -> String {
    let prefix = upper(&opts.module);
    let guard = format!("_{prefix}_REG_DEFS_");

    let mut out = provenance(layout, "//");
    out.push_str(&format!("\n#ifndef {guard}\n#define {guard}\n\n"));
    out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n");
    out.push_str(&format!("// Register width\n#define {prefix}_PARAM_REG_WIDTH 32\n\n"));

    for (_, entry) in layout.present() {
        match (entry.replicas, layout.style()) {
            (Some(_), MultiregStyle::Banked) => banked(layout, entry, &prefix, &mut out),
            _ => {
                for slot in layout.slots_of(entry.name) {
                    let name = NameParts::new(entry, slot.replica, slot.half, layout.style());
                    out.push_str(&format!("// {}\n", half_description(entry, slot.half)));
                    offset(&prefix, &name.instance(), slot.address, &mut out);
                    if let Some(field) = entry.field.as_ref().filter(|_| slot.half == Half::Full) {
                        out.push_str(&format!(
                            "#define {prefix}_{}_{}_BIT {}\n",
                            name.instance(),
                            upper(field.name),
                            field.lsb
                        ));
                    }
                    out.push('\n');
                }
            }
        }
    }

    out.push_str("#ifdef __cplusplus\n}  // extern \"C\"\n#endif\n");
    out.push_str(&format!("#endif  // {guard}\n"));
    out
}

/// A banked multiregister: common parameters per half, then one offset per
/// replica.
fn banked(layout: &ResolvedLayout, entry: &RegisterEntry, prefix: &str, out: &mut String) {
    let count = entry.instance_count();
    if count == 0 {
        return;
    }
    for &half in entry.halves() {
        let description = half_description(entry, half);
        let register = NameParts::new(entry, Some(0), half, MultiregStyle::Banked).register();
        let field = match half {
            Half::High => "HIGH",
            Half::Low => "LOW",
            Half::Full => "VALUE",
        };
        out.push_str(&format!("// {description} (common parameters)\n"));
        out.push_str(&format!("#define {prefix}_{register}_{field}_FIELD_WIDTH 32\n"));
        out.push_str(&format!("#define {prefix}_{register}_{field}_FIELDS_PER_REG 1\n"));
        out.push_str(&format!("#define {prefix}_{register}_MULTIREG_COUNT {count}\n\n"));

        for slot in layout.slots_of(entry.name).filter(|s| s.half == half) {
            let name = NameParts::new(entry, slot.replica, half, MultiregStyle::Banked);
            out.push_str(&format!("// {description}\n"));
            offset(prefix, &name.instance(), slot.address, out);
            out.push('\n');
        }
    }
}

fn offset(prefix: &str, instance: &str, address: u64, out: &mut String) {
    out.push_str(&format!("#define {prefix}_{instance}_REG_OFFSET {address:#x}\n"));
}
