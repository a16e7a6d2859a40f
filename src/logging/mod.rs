//! Console logging setup
//!
//! One-shot builds log straight to stderr. The filter honors
//! `RUST_LOG` when set and defaults to `info`, which covers the
//! per-step progress lines the pipeline emits.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
