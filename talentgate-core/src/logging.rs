//! Logging initialization shared by the service binaries

/// Initialize the tracing subscriber
///
/// `RUST_LOG` overrides the default filter when set.
pub fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
