//! Subscriber setup shared by both binaries

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. chromiumoxide's handler and
/// connection targets are silenced; they report every unknown CDP event.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive("chromiumoxide::handler=off".parse()?)
        .add_directive("chromiumoxide::conn=off".parse()?)
        .add_directive("hyper_util=warn".parse()?);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()?;

    Ok(())
}
