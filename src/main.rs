//! A build-time icon font pipeline built with Rust and Linebender crates.
//!
//! Point it at a folder of SVG icons and it produces a merged SVG glyph
//! sheet, a compiled TTF, a generated Dart class, and a metadata record
//! that keeps every icon's code point stable across runs.

use anyhow::Result;
use glyphforge::core;

/// Run the full pipeline with the given CLI arguments.
fn run_pipeline(cli_args: core::cli::CliArgs) -> Result<()> {
    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;

    let config = core::config::PipelineConfig::from_cli(&cli_args)?;
    core::pipeline::run(&config)
}

fn main() {
    glyphforge::logging::init();
    let cli_args = core::platform::get_cli_args();
    match run_pipeline(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}
