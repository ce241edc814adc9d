//! Switch between audio visualizers, one button each.

use clap::Parser;
use hotswap::config::CliOverrides;
use hotswap::gst::{ChainSpec, SwapPipeline};
use hotswap_frontend::Theme;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Pick an audio visualizer with a button
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Audio source element
    #[arg(long)]
    source: Option<String>,

    /// Video sink element
    #[arg(long)]
    sink: Option<String>,

    /// Comma-separated visualizer factories
    #[arg(long)]
    visualizers: Option<String>,

    /// Extra config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the light theme
    #[arg(long)]
    light: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let (config, _log_guard) = hotswap::init(&CliOverrides {
        config_file: args.config,
        visualizers: args.visualizers,
        source: args.source,
        sink: args.sink,
        log_level: args.log_level,
        ..Default::default()
    })?;

    let spec = ChainSpec::audio_visualizer(&config.pipeline);
    let pipeline = SwapPipeline::build(&spec)?;
    pipeline.play()?;

    // Buttons are indices into the catalog, so label them the same way
    let labels = pipeline.hotswap().catalog();
    let theme = if args.light { Theme::NordLight } else { Theme::NordDark };
    if hotswap::gui::launch_visualizer(pipeline.into_controller(), labels, theme)? {
        error!("Stopped after a pipeline error");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
