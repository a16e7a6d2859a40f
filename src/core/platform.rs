//! Process-level argument and error handling.
//!
//! The binary funnels every failure through one place so users get a
//! consistent, friendly message instead of a bare Debug dump.

/// Handle pipeline errors with a friendly message.
///
/// Prints the error chain to stderr and exits with code 1.
pub fn handle_error(error: anyhow::Error) {
    eprintln!();
    eprintln!("Error generating icon font:");
    eprintln!("{error:#}");
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse CLI arguments from the process environment.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    crate::core::cli::CliArgs::parse()
}
