//! Command-line host for klscript.
//!
//! Shows how an application embeds the engine: a small set of native
//! bindings, script parameters fed to `pop`, and errors reported as
//! located diagnostics.

pub mod commands;
mod host;

pub use host::{host_bindings, OutputSink};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=klsc=debug` for
/// command events, `RUST_LOG=kls_eval=debug` for subroutine calls or
/// `RUST_LOG=kls_eval=trace` for per-statement events.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
