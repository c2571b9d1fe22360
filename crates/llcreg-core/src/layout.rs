//! Address allocation for the register catalog.
//!
//! The allocator walks present entries in catalog order with a byte cursor
//! starting at zero. Each instance takes one 32-bit word per half; gap
//! directives move the cursor forward to an absolute address. The result is
//! immutable and shared read-only by every renderer.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{LayoutError, Result};
use crate::hash::{content_hash, hash_hex};
use crate::params::{resolve, DerivedConstants, SizingParameters};
use crate::schema::{
    build_catalog, Catalog, Half, MultiregStyle, RegisterEntry, SLOT_BYTES, WORD_BYTES,
};

/// End of the 32-bit register address space.
pub const ADDRESS_SPACE: u64 = 1 << 32;

/// One 32-bit sub-word at its byte address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Slot {
    /// Index into [`Catalog::entries`].
    pub entry: usize,
    /// Replica index of a multiregister.
    pub replica: Option<u64>,
    pub half: Half,
    pub address: u64,
}

/// Address range occupied by all instances of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntrySpan {
    pub entry: usize,
    pub base: u64,
    pub size: u64,
}

/// Reserved range created by a gap directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Gap {
    /// Entry the directive follows.
    pub after: usize,
    pub start: u64,
    pub end: u64,
    pub label: &'static str,
}

/// The catalog with every present register placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedLayout {
    pub catalog: Catalog,
    /// Present entries in catalog order.
    pub spans: Vec<EntrySpan>,
    /// Every sub-word, sorted by address.
    pub slots: Vec<Slot>,
    pub gaps: Vec<Gap>,
    /// Final cursor: size of the register block in bytes.
    pub size: u64,
}

impl ResolvedLayout {
    pub fn params(&self) -> &SizingParameters {
        &self.catalog.params
    }

    pub fn constants(&self) -> &DerivedConstants {
        &self.catalog.constants
    }

    pub fn style(&self) -> MultiregStyle {
        self.catalog.style
    }

    pub fn entry(&self, index: usize) -> &RegisterEntry {
        &self.catalog.entries[index]
    }

    /// Present entries in catalog order.
    pub fn present(&self) -> impl Iterator<Item = (usize, &RegisterEntry)> {
        self.catalog.present()
    }

    pub fn span_of(&self, name: &str) -> Option<&EntrySpan> {
        self.spans.iter().find(|s| self.entry(s.entry).name == name)
    }

    /// Slots of the named register in address order.
    pub fn slots_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Slot> + 'a {
        self.slots
            .iter()
            .filter(move |s| self.entry(s.entry).name == name)
    }

    pub fn address_of(&self, name: &str, replica: Option<u64>, half: Half) -> Option<u64> {
        self.slots_of(name)
            .find(|s| s.replica == replica && s.half == half)
            .map(|s| s.address)
    }

    /// Gap following the named entry, if any.
    pub fn gap_after(&self, name: &str) -> Option<&Gap> {
        self.gaps.iter().find(|g| self.entry(g.after).name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.span_of(name).is_some()
    }

    /// Hex SHA-256 of the layout's canonical serialization.
    pub fn fingerprint(&self) -> String {
        hash_hex(&content_hash(self))
    }
}

/// Resolve `params`, build the catalog, and allocate it.
pub fn build_layout(params: &SizingParameters, style: MultiregStyle) -> Result<ResolvedLayout> {
    let constants = resolve(params)?;
    let catalog = build_catalog(*params, constants, style);
    Ok(allocate(catalog)?)
}

/// Assign addresses to every present entry of `catalog`.
pub fn allocate(catalog: Catalog) -> std::result::Result<ResolvedLayout, LayoutError> {
    let mut cursor: u64 = 0;
    let mut owners: BTreeMap<u64, usize> = BTreeMap::new();
    let mut spans = Vec::new();
    let mut slots = Vec::new();
    let mut gaps = Vec::new();

    for (index, entry) in catalog.present() {
        let base = cursor;
        let end = entry
            .instance_count()
            .checked_mul(entry.instance_bytes())
            .and_then(|size| base.checked_add(size))
            .filter(|end| *end <= ADDRESS_SPACE)
            .ok_or_else(|| LayoutError::AddressOverflow {
                register: entry.name.to_string(),
            })?;

        for (replica, half, address) in instance_words(entry, base, catalog.style) {
            claim(&mut owners, &catalog, index, address)?;
            slots.push(Slot {
                entry: index,
                replica,
                half,
                address,
            });
        }
        spans.push(EntrySpan {
            entry: index,
            base,
            size: end - base,
        });
        tracing::debug!(
            register = entry.name,
            base = %format!("0x{base:X}"),
            instances = entry.instance_count(),
            "placed register"
        );
        cursor = end;

        match &entry.gap_after {
            Some(gap) => {
                if gap.target % WORD_BYTES != 0 {
                    return Err(LayoutError::Misaligned {
                        register: entry.name.to_string(),
                        target: gap.target,
                    });
                }
                if gap.target < cursor {
                    return Err(LayoutError::BackwardJump {
                        register: entry.name.to_string(),
                        cursor,
                        target: gap.target,
                    });
                }
                if entry.is_strobe() && gap.target < base + SLOT_BYTES {
                    return Err(LayoutError::StrobePadding {
                        register: entry.name.to_string(),
                        address: base,
                        target: gap.target,
                    });
                }
                if gap.target > ADDRESS_SPACE {
                    return Err(LayoutError::AddressOverflow {
                        register: entry.name.to_string(),
                    });
                }
                if gap.target > cursor {
                    tracing::debug!(
                        after = entry.name,
                        start = %format!("0x{cursor:X}"),
                        end = %format!("0x{:X}", gap.target),
                        "reserved gap"
                    );
                    gaps.push(Gap {
                        after: index,
                        start: cursor,
                        end: gap.target,
                        label: gap.label,
                    });
                }
                cursor = gap.target;
            }
            None if entry.is_strobe() => {
                return Err(LayoutError::MissingStrobeGap {
                    register: entry.name.to_string(),
                });
            }
            None => {}
        }
    }

    slots.sort_by_key(|s| s.address);
    tracing::info!(
        size = %format!("0x{cursor:X}"),
        registers = spans.len(),
        words = slots.len(),
        "register layout allocated"
    );

    Ok(ResolvedLayout {
        catalog,
        spans,
        slots,
        gaps,
        size: cursor,
    })
}

/// Sub-words of every instance of `entry`, starting at `base`.
fn instance_words(
    entry: &RegisterEntry,
    base: u64,
    style: MultiregStyle,
) -> Vec<(Option<u64>, Half, u64)> {
    let halves = entry.halves();
    let Some(count) = entry.replicas else {
        return halves
            .iter()
            .enumerate()
            .map(|(i, &half)| (None, half, base + i as u64 * WORD_BYTES))
            .collect();
    };

    let capacity = usize::try_from(count)
        .ok()
        .and_then(|c| c.checked_mul(halves.len()))
        .unwrap_or(0);
    let mut words = Vec::with_capacity(capacity);
    match style {
        MultiregStyle::Banked => {
            for (h, &half) in halves.iter().enumerate() {
                let bank = base + h as u64 * count * WORD_BYTES;
                for r in 0..count {
                    words.push((Some(r), half, bank + r * WORD_BYTES));
                }
            }
        }
        MultiregStyle::Unrolled => {
            for r in 0..count {
                let pair = base + r * entry.instance_bytes();
                for (h, &half) in halves.iter().enumerate() {
                    words.push((Some(r), half, pair + h as u64 * WORD_BYTES));
                }
            }
        }
    }
    words
}

fn claim(
    owners: &mut BTreeMap<u64, usize>,
    catalog: &Catalog,
    index: usize,
    address: u64,
) -> std::result::Result<(), LayoutError> {
    if let Some(&other) = owners.get(&address) {
        return Err(LayoutError::Collision {
            register: catalog.entries[index].name.to_string(),
            other: catalog.entries[other].name.to_string(),
            address,
        });
    }
    owners.insert(address, index);
    Ok(())
}
