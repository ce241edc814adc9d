//! Hotswap backend library.
//!
//! GStreamer pipelines with a hot-swappable element slot, the protocol that
//! swaps elements without stopping the stream, and the basic tutorials the
//! executables under `src/bin/` run.

pub mod config;
pub mod gst;
pub mod gui;
pub mod logging;
pub mod structures;
pub mod swap;
pub mod tutorials;

use config::{CliOverrides, Config};

/// Shared start-up of every executable: layered config, logging, GStreamer.
///
/// Keep the returned guard alive until `main` returns.
pub fn init(cli: &CliOverrides) -> anyhow::Result<(Config, logging::LogGuard)> {
    let config = Config::from_figment(cli)?;
    let guard = logging::init(&config.logging)?;
    gstreamer::init()?;
    tracing::info!("GStreamer {} initialized", gstreamer::version_string());
    Ok((config, guard))
}
