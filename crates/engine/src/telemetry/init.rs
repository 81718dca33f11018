//! Tracing subscriber initialisation.

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter from `RUST_LOG`, falling back to `log_level`.
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Registry with `filter` and a JSON-formatted fmt layer, not yet installed.
fn subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
}

/// Install the global tracing subscriber.
///
/// Configures an [`EnvFilter`] (from `RUST_LOG`, falling back to `log_level`)
/// and a JSON-formatted [`tracing_subscriber`] layer for structured output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(log_level: &str) -> Result<()> {
    subscriber(env_filter(log_level))
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
