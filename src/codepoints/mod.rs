//! Code point allocation
//!
//! The one part of the pipeline with a real correctness contract: icons
//! must keep the code point they were first assigned, forever, across
//! regenerations. Allocation is a pure fold over the enumerated
//! identifiers so it can be tested without touching the filesystem.

use crate::metadata::MetadataRecord;
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;

/// Result of allocating code points for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// One assignment per enumerated file, in enumeration order.
    ///
    /// Duplicate identifiers appear once per file here; every entry
    /// becomes a glyph in the sheet and the font.
    pub assignments: Vec<(String, String)>,
    /// The folded name → code point mapping. For duplicate identifiers
    /// the last assignment wins, which is what the class generator and
    /// the metadata writer consume.
    pub mapping: BTreeMap<String, String>,
}

/// Assign a code point to every identifier, reusing prior assignments.
///
/// Identifiers present in the previous record keep their code point
/// unchanged. New identifiers draw from a counter seeded by the record's
/// stored count (see [`MetadataRecord::seed`]); the counter advances only
/// when a new code point is handed out.
///
/// The counter is never checked against code points already held by other
/// identifiers. The seed equals the stored icon total, so once a set's
/// codes were all counter-allocated, the next new icon re-derives the
/// highest held value; removals can likewise bring old values back into
/// range. Either way the collision fails font compilation with a duplicate
/// mapping error instead of silently remapping an icon, and raising the
/// record's `count` past the highest assigned value clears it.
pub fn allocate(previous: &MetadataRecord, identifiers: &[String]) -> Allocation {
    let (assignments, mapping, _) = identifiers.iter().fold(
        (Vec::new(), BTreeMap::new(), previous.seed()),
        |(mut assignments, mut mapping, counter), identifier| {
            let (code, counter) = match previous.icons.get(identifier) {
                Some(existing) => (existing.clone(), counter),
                None => (format_codepoint(counter), counter + 1),
            };
            assignments.push((identifier.clone(), code.clone()));
            mapping.insert(identifier.clone(), code);
            (assignments, mapping, counter)
        },
    );

    Allocation {
        assignments,
        mapping,
    }
}

/// Format a counter value as a code point string.
///
/// `E` followed by the value in uppercase hex, zero-padded to at least
/// three digits: 1 → `E001`, 4096 → `E1000`. The `E` prefix doubles as
/// a hex digit, so the whole string reads as one hex numeral.
pub fn format_codepoint(counter: u64) -> String {
    format!("E{counter:03X}")
}

/// Parse a code point string into the character it addresses.
///
/// The whole string is read as a hexadecimal numeral; the `E` prefix
/// doubles as the leading hex digit, which is what lands every icon in
/// the U+E000 private use area.
pub fn codepoint_to_char(code: &str) -> Result<char> {
    let value = u32::from_str_radix(code, 16)
        .with_context(|| format!("invalid code point {code:?}"))?;
    char::from_u32(value)
        .ok_or_else(|| anyhow!("code point {code:?} is outside the valid character range"))
}
