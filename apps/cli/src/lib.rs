//! # quill-cli
//!
//! Library half of the `quill` binary: configuration, command bodies and
//! the download-link encoder. `main.rs` only parses arguments and prints.

pub mod commands;
pub mod config;
pub mod download;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,quill=debug";

/// Initialize tracing to stderr, keeping stdout for command output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
