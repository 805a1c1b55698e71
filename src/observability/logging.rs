//! Structured logging.
//!
//! Uses the tracing crate; the filter comes from `RUST_LOG` when set and
//! falls back to the configured level otherwise.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the global tracing subscriber. Call once at startup.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "grant_proxy={},tower_http=info",
            config.log_level
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
