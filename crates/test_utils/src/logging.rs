//! Tracing for tests
//!
//! Installs a fmt subscriber writing through the test harness's captured
//! output. Filter with `RUST_LOG`, e.g. `RUST_LOG=domain_party=debug`.

use once_cell::sync::Lazy;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Another harness may already have installed a global subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_test_writer(),
        )
        .try_init();
});

/// Installs the test subscriber once per process
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
    tracing::trace!("test tracing initialized");
}
