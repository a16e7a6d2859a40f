//! Command line interface for the icon font pipeline
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Every output location is split into a
//! directory flag and a file-name flag, both joined under the project
//! root, with the file extension appended automatically.

use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Glyphforge CLI arguments
///
/// Example:
///   glyphforge \
///     --project-path . \
///     --input-icons-dir assets/icons \
///     --output-codepoints-dir assets/fonts --output-codepoints-file ui_icons \
///     --output-svg-dir assets/fonts --output-svg-file ui_icons \
///     --output-font-dir assets/fonts --output-font-name ui_icons \
///     --output-class-dir lib/src --output-class-file ui_icons \
///     --output-class-name UiIcons \
///     --output-package-name my_package \
///     --icon-name-replaces '{"Ic":""}' \
///     --icon-name-replaces-ignore '["IconHome"]'
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "glyphforge",
    version,
    about = "Compile a folder of SVG icons into an icon font",
    long_about = "Glyphforge is a one-shot build tool that converts a directory of SVG icon files into a merged SVG glyph sheet, a compiled TTF font, a generated Dart class, and a JSON metadata record that keeps each icon's code point stable across repeated runs."
)]
pub struct CliArgs {
    /// Project root; all other paths are resolved beneath it
    #[clap(
        long = "project-path",
        help = "Project root directory",
        long_help = "Path to the project root. Every directory flag below is joined under this path, so the tool can be invoked from anywhere."
    )]
    pub project_path: PathBuf,

    /// Directory containing the source SVG icons
    #[clap(
        long = "input-icons-dir",
        help = "Directory of source .svg icons, relative to the project root",
        long_help = "Directory containing the source .svg icon files, relative to the project root. Only regular files with a .svg extension are picked up; subdirectories are not descended into."
    )]
    pub input_icons_dir: PathBuf,

    /// Directory for the codepoint metadata record
    #[clap(
        long = "output-codepoints-dir",
        help = "Directory for the codepoint metadata JSON",
        long_help = "Directory (relative to the project root) where the codepoint metadata record is read from and written to. The record keeps icon code points stable across runs; commit it to version control."
    )]
    pub output_codepoints_dir: PathBuf,

    /// File name for the metadata record; `.json` is appended
    #[clap(
        long = "output-codepoints-file",
        help = "Metadata file name without extension (.json is appended)"
    )]
    pub output_codepoints_file: String,

    /// Directory for the merged SVG glyph sheet
    #[clap(
        long = "output-svg-dir",
        help = "Directory for the merged SVG glyph sheet"
    )]
    pub output_svg_dir: PathBuf,

    /// File name for the glyph sheet; `.svg` is appended
    #[clap(
        long = "output-svg-file",
        help = "Sheet file name without extension (.svg is appended)"
    )]
    pub output_svg_file: String,

    /// Directory for the compiled font
    #[clap(long = "output-font-dir", help = "Directory for the compiled TTF")]
    pub output_font_dir: PathBuf,

    /// File name for the font; `.ttf` is appended
    #[clap(
        long = "output-font-name",
        help = "Font file name without extension (.ttf is appended)"
    )]
    pub output_font_name: String,

    /// Directory for the generated Dart class
    #[clap(
        long = "output-class-dir",
        help = "Directory for the generated Dart class"
    )]
    pub output_class_dir: PathBuf,

    /// File name for the Dart class; `.dart` is appended
    #[clap(
        long = "output-class-file",
        help = "Class file name without extension (.dart is appended)"
    )]
    pub output_class_file: String,

    /// Name of the generated class, also used as the font family
    #[clap(
        long = "output-class-name",
        help = "Dart class name, also the font family name",
        long_help = "Name of the generated Dart class. The same name is used as the font family and font id, so IconData constants resolve to the compiled font without further configuration."
    )]
    pub output_class_name: String,

    /// Package name baked into the generated class
    #[clap(
        long = "output-package-name",
        help = "Package name referenced by the generated IconData constants"
    )]
    pub output_package_name: String,

    /// JSON array of file stems exempt from name replacement
    ///
    /// Stems are matched the way files are named on disk, before any
    /// case normalization.
    #[clap(
        long = "icon-name-replaces-ignore",
        default_value = "[]",
        help = "JSON array of file stems exempt from replacement",
        long_help = "A JSON array of file stems (file names without the .svg extension) that skip the replacement table, e.g. '[\"IconHome\"]'. Matched verbatim against the stem before case normalization."
    )]
    pub icon_name_replaces_ignore: String,

    /// JSON object of substring replacements applied to file stems
    #[clap(
        long = "icon-name-replaces",
        help = "JSON object of substring replacements, e.g. '{\"Ic\":\"\"}'",
        long_help = "A JSON object mapping substrings to replacements, applied to each file stem before case normalization, e.g. '{\"Ic\":\"\"}' to strip an Ic prefix convention. Pass '{}' to apply no replacements."
    )]
    pub icon_name_replaces: String,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures the input locations exist before the pipeline starts,
    /// providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if !self.project_path.exists() {
            return Err(format!(
                "Project path does not exist: {}\nMake sure the path is correct.",
                self.project_path.display()
            ));
        }
        if !self.project_path.is_dir() {
            return Err(format!(
                "Project path is not a directory: {}",
                self.project_path.display()
            ));
        }

        let icons_dir = self.project_path.join(&self.input_icons_dir);
        if !icons_dir.exists() {
            return Err(format!(
                "Input icons directory does not exist: {}\nMake sure --input-icons-dir is relative to --project-path.",
                icons_dir.display()
            ));
        }
        if !icons_dir.is_dir() {
            return Err(format!(
                "Input icons path is not a directory: {}",
                icons_dir.display()
            ));
        }

        Ok(())
    }

    /// Parse the `--icon-name-replaces-ignore` flag
    pub fn replaces_ignore(&self) -> anyhow::Result<Vec<String>> {
        serde_json::from_str(&self.icon_name_replaces_ignore).map_err(|e| {
            anyhow::anyhow!(
                "--icon-name-replaces-ignore must be a JSON array of strings, e.g. '[\"IconHome\"]': {e}"
            )
        })
    }

    /// Parse the `--icon-name-replaces` flag
    ///
    /// A BTreeMap keeps the replacement pairs in a stable order, so two
    /// runs with the same table derive the same identifiers.
    pub fn replaces(&self) -> anyhow::Result<BTreeMap<String, String>> {
        serde_json::from_str(&self.icon_name_replaces).map_err(|e| {
            anyhow::anyhow!(
                "--icon-name-replaces must be a JSON object of string pairs, e.g. '{{\"Ic\":\"\"}}': {e}"
            )
        })
    }
}
