//! Diagnostic logging setup
//!
//! Progress output goes to stdout through the console observer. Tracing is
//! diagnostics only and always writes to stderr.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `--verbose` forces `debug`. Otherwise a subscriber is installed only when
/// `RUST_LOG` is set, so the default output stays the console lines alone.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        }
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();

    if installed.is_ok() {
        tracing::debug!("verbose logging enabled");
    }
}
