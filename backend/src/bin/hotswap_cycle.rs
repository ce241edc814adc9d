//! Cycle through video effects on a timer, swapping each one in without
//! stopping the stream. The outgoing effect goes back to the end of the
//! rotation, so this runs until the video window is closed, the process is
//! interrupted or the pipeline fails. With a single effect there is nothing
//! to swap to and the first tick quits.

use clap::Parser;
use hotswap::config::CliOverrides;
use hotswap::gst::{bus, ChainSpec, SwapPipeline};
use hotswap::swap::ExhaustionPolicy;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

/// Swap video effects on a timer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Comma-separated video effect factories
    #[arg(long)]
    effects: Option<String>,

    /// Milliseconds between two swaps
    #[arg(long = "interval-ms")]
    interval_ms: Option<u64>,

    /// Video sink element
    #[arg(long)]
    sink: Option<String>,

    /// Extra config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let (config, _log_guard) = hotswap::init(&CliOverrides {
        config_file: args.config,
        effects: args.effects,
        sink: args.sink,
        swap_interval_ms: args.interval_ms,
        log_level: args.log_level,
        ..Default::default()
    })?;

    let spec = ChainSpec::video_effects(&config.pipeline, ExhaustionPolicy::Shutdown);
    let pipeline = SwapPipeline::build(&spec)?;
    pipeline.play()?;

    let interval = Duration::from_millis(config.pipeline.swap_interval_ms);
    info!("Swapping every {:?}", interval);

    let controller = pipeline.into_controller();
    let hotswap = controller.hotswap().clone();
    let failed = bus::run_main_loop(controller, Some(interval))?;

    info!("Final status: {}", serde_json::to_string(&hotswap.status())?);
    if failed {
        error!("Stopped after a pipeline error");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
