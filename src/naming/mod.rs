//! Icon enumeration and identifier derivation
//!
//! File stems become Dart-friendly lowerCamelCase identifiers. A
//! caller-supplied replacement table rewrites naming conventions away
//! (say, an `Ic` prefix), and an ignore list protects individual files
//! from it. Both operate on the raw stem, the way files are named on
//! disk; case normalization happens last.

use anyhow::{Context, Result};
use heck::ToLowerCamelCase;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One enumerated source icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFile {
    /// Derived identifier, unique per run unless two files collide
    pub identifier: String,
    /// Absolute path to the source `.svg`
    pub path: PathBuf,
}

/// List the input directory and derive an identifier per icon.
///
/// Non-recursive; only regular files with a `.svg` extension count.
/// File names are sorted before derivation so enumeration order, and with
/// it allocation order, is deterministic across platforms.
pub fn enumerate_icons(
    dir: &Path,
    replaces: &BTreeMap<String, String>,
    ignore: &[String],
) -> Result<Vec<IconFile>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read icons directory {}", dir.display()))?;

    let mut file_names = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if path.is_file() && is_svg {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                file_names.push(name.to_string());
            }
        }
    }
    file_names.sort();

    let icons = file_names
        .into_iter()
        .map(|file_name| {
            let stem = Path::new(&file_name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(&file_name);
            let identifier = derive_identifier(stem, replaces, ignore);
            if identifier.is_empty() || identifier.starts_with(|c: char| c.is_ascii_digit()) {
                warn!(
                    "Icon {:?} derives the identifier {:?}, which is not a valid Dart member name",
                    file_name, identifier
                );
            }
            IconFile {
                identifier,
                path: dir.join(&file_name),
            }
        })
        .collect();

    Ok(icons)
}

/// Derive an identifier from a file stem.
///
/// Stems on the ignore list skip the replacement table; everything gets
/// lowerCamelCase normalization at the end.
pub fn derive_identifier(
    stem: &str,
    replaces: &BTreeMap<String, String>,
    ignore: &[String],
) -> String {
    if ignore.iter().any(|ignored| ignored == stem) {
        return stem.to_lower_camel_case();
    }

    let mut name = stem.to_string();
    for (from, to) in replaces {
        name = name.replace(from.as_str(), to);
    }
    name.to_lower_camel_case()
}
