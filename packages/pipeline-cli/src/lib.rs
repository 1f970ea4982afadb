//! Shared plumbing for the stage binaries.

pub mod config;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a stage binary.
///
/// Defaults to `info` so stage progress is visible; `RUST_LOG` overrides.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
