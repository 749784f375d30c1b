//! Logging bootstrap for embedding applications.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with an env-filter taken from `SAFEHOURS_LOG`,
/// falling back to `info`.
///
/// Safe to call more than once; only the first initialization wins.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SAFEHOURS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
