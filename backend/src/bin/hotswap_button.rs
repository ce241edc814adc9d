//! Swap to the next element whenever the button is clicked.
//!
//! The `video` preset rotates video effects on a test pattern, the `audio`
//! preset rotates visualizers on an audio source.

use clap::{Parser, ValueEnum};
use hotswap::config::CliOverrides;
use hotswap::gst::{ChainSpec, SwapPipeline};
use hotswap::swap::ExhaustionPolicy;
use hotswap_frontend::Theme;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Preset {
    #[default]
    Video,
    Audio,
}

/// Swap elements on a button click
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which element pool to rotate
    #[arg(long, value_enum, default_value_t = Preset::Video)]
    preset: Preset,

    /// Comma-separated video effect factories
    #[arg(long)]
    effects: Option<String>,

    /// Comma-separated visualizer factories (audio preset)
    #[arg(long)]
    visualizers: Option<String>,

    /// Audio source element (audio preset)
    #[arg(long)]
    source: Option<String>,

    /// Video sink element
    #[arg(long)]
    sink: Option<String>,

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
        effects: args.effects,
        visualizers: args.visualizers,
        source: args.source,
        sink: args.sink,
        log_level: args.log_level,
        ..Default::default()
    })?;

    // The window stays open when the rotation runs dry
    let spec = match args.preset {
        Preset::Video => ChainSpec::video_effects(&config.pipeline, ExhaustionPolicy::Ignore),
        Preset::Audio => ChainSpec::rotating_visualizers(&config.pipeline, ExhaustionPolicy::Ignore),
    };
    let pipeline = SwapPipeline::build(&spec)?;
    pipeline.play()?;

    let theme = if args.light { Theme::NordLight } else { Theme::NordDark };
    if hotswap::gui::launch_swap_button(pipeline.into_controller(), theme)? {
        error!("Stopped after a pipeline error");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
