#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! Components log through `tracing` directly. This module re-exports the
//! macros for hosts that want a single import, and with the `tracing-json`
//! feature installs a JSON subscriber filtered by `RUST_LOG`.

pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber honoring `RUST_LOG`.
///
/// Returns an error if a global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
}
