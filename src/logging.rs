//! Subscriber setup for binaries and test harnesses using the helpers.
//!
//! The library itself only emits `tracing` events; nothing is printed unless
//! a subscriber is installed, e.g. with [`init_logging`].

use anyhow::anyhow;
use tracing::Level;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install `color-eyre` and a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level`. With `json` set, events are
/// written as one JSON object per line.
pub fn init_logging(level: Level, json: bool) -> anyhow::Result<()> {
    color_eyre::install().map_err(|e| anyhow!("failed to install color-eyre: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,hardhat_network_helpers={}", level)));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(ErrorLayer::default());

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()?;
    }

    Ok(())
}
