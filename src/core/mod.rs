//! Core pipeline functionality
//!
//! This module contains the pipeline's plumbing, including:
//! - CLI parsing and validation
//! - Path and naming configuration
//! - The pipeline run itself
//! - Platform error handling

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod platform;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config::PipelineConfig;
pub use pipeline::run;
