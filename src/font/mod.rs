//! TrueType font compilation
//!
//! Turns normalized glyph outlines into a binary TTF. The whole
//! conversion happens in one synchronous call so the pipeline can
//! treat font compilation as a single step with a single error.

pub mod compile;

pub use compile::compile_ttf;
