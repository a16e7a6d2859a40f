//! Glyphforge
pub mod codegen;
pub mod codepoints;
pub mod core;
pub mod font;
pub mod logging;
pub mod metadata;
pub mod naming;
pub mod outlines;
pub mod sheet;
