//! Log output setup.

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber for the process.
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this again (or
/// after another subscriber was installed) does nothing.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
