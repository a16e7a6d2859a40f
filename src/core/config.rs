//! Resolved pipeline configuration
//!
//! Turns raw CLI arguments into the absolute paths and naming tables the
//! pipeline steps consume. Output paths follow the project-root + dir +
//! file-name + fixed-extension convention throughout.

use crate::core::cli::CliArgs;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything the pipeline needs to run, resolved once up front
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned for source `.svg` icons
    pub input_dir: PathBuf,
    /// The codepoint metadata record (read at start, rewritten at end)
    pub metadata_path: PathBuf,
    /// The merged SVG glyph sheet
    pub sheet_path: PathBuf,
    /// The compiled TTF
    pub font_path: PathBuf,
    /// The generated Dart class
    pub class_path: PathBuf,
    /// Dart class name; doubles as the font family and font id
    pub class_name: String,
    /// Package name baked into the generated IconData constants
    pub package_name: String,
    /// Substring replacements applied to file stems
    pub replaces: BTreeMap<String, String>,
    /// File stems exempt from replacement
    pub replaces_ignore: Vec<String>,
}

impl PipelineConfig {
    /// Resolve CLI arguments into a ready-to-run configuration
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let root = &args.project_path;

        Ok(Self {
            input_dir: root.join(&args.input_icons_dir),
            metadata_path: root
                .join(&args.output_codepoints_dir)
                .join(format!("{}.json", args.output_codepoints_file)),
            sheet_path: root
                .join(&args.output_svg_dir)
                .join(format!("{}.svg", args.output_svg_file)),
            font_path: root
                .join(&args.output_font_dir)
                .join(format!("{}.ttf", args.output_font_name)),
            class_path: root
                .join(&args.output_class_dir)
                .join(format!("{}.dart", args.output_class_file)),
            class_name: args.output_class_name.clone(),
            package_name: args.output_package_name.clone(),
            replaces: args.replaces()?,
            replaces_ignore: args.replaces_ignore()?,
        })
    }
}
