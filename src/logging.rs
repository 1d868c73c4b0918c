//! Logging configuration for pqrunner.
//!
//! Diagnostic detail (subprocess output, rendered query dumps) is emitted
//! at debug level only; the debug toggle raises the default filter.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging.
///
/// `RUST_LOG` takes precedence; otherwise the debug toggle selects between
/// `debug` and `info` as the default filter.
pub fn init(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
