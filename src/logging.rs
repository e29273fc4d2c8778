//! Tracing setup. Diagnostics go to stderr so they never interleave with
//! the interactive transcript on stdout. Filtering follows `RUST_LOG`,
//! defaulting to info-level events from this crate only.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orca=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
