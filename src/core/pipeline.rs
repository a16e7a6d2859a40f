//! The conversion pipeline
//!
//! One strictly ordered pass from a directory of SVG icons to the four
//! build artifacts: load the previous code point record, enumerate and
//! name the icons, allocate code points, parse and normalize outlines,
//! then write the SVG sheet, the TTF, the Dart class and finally the
//! updated record. The record is written last so a run that dies half
//! way never publishes assignments its other artifacts do not carry.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::codegen;
use crate::codepoints;
use crate::core::config::PipelineConfig;
use crate::font;
use crate::metadata::MetadataRecord;
use crate::naming::{self, IconFile};
use crate::outlines::{self, GlyphEntry};
use crate::sheet;

/// Run the full icon font build for a resolved configuration.
pub fn run(config: &PipelineConfig) -> Result<()> {
    let previous = MetadataRecord::load(&config.metadata_path)?;

    let icons = naming::enumerate_icons(
        &config.input_dir,
        &config.replaces,
        &config.replaces_ignore,
    )?;
    info!("Found {} icons", icons.len());

    let identifiers: Vec<String> =
        icons.iter().map(|icon| icon.identifier.clone()).collect();
    let allocation = codepoints::allocate(&previous, &identifiers);

    let entries = load_glyphs(&icons, &allocation.assignments)?;

    debug!("Writing SVG font sheet to: {}", config.sheet_path.display());
    let sheet = sheet::build_svg_font(&entries, &config.class_name)?;
    write_artifact(&config.sheet_path, sheet.as_bytes())?;

    info!("Creating TTF Font in: {}", config.font_path.display());
    let ttf = font::compile_ttf(&entries, &config.class_name)?;
    write_artifact(&config.font_path, &ttf)?;

    info!("Creating Dart Class in: {}", config.class_path.display());
    let class = codegen::render_dart_class(
        &allocation.mapping,
        &config.class_name,
        &config.package_name,
    )?;
    write_artifact(&config.class_path, class.as_bytes())?;

    info!(
        "Saving collection's metadata: {}",
        config.metadata_path.display()
    );
    MetadataRecord::from_mapping(allocation.mapping).save(&config.metadata_path)?;

    Ok(())
}

/// Parse and normalize every enumerated icon into a glyph entry.
///
/// `assignments` lines up with `icons` one to one, so a duplicate
/// identifier still yields a glyph per source file even though the
/// class and the record only keep the last one.
fn load_glyphs(icons: &[IconFile], assignments: &[(String, String)]) -> Result<Vec<GlyphEntry>> {
    let mut entries = Vec::with_capacity(icons.len());
    for (icon, (name, codepoint)) in icons.iter().zip(assignments) {
        let data = fs::read(&icon.path)
            .with_context(|| format!("failed to read {}", icon.path.display()))?;
        let outline = outlines::svg::parse_icon(&data)
            .with_context(|| format!("failed to parse {}", icon.path.display()))?;
        entries.push(GlyphEntry {
            name: name.clone(),
            codepoint: codepoint.clone(),
            path: outlines::normalize_to_em(&outline),
        });
    }
    Ok(entries)
}

/// Write one artifact, creating its parent directory if needed.
fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
