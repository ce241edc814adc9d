//! Basic tutorial 3: link the demuxer's pads as they appear.

use clap::Parser;
use hotswap::config::CliOverrides;
use hotswap::tutorials::dynamic_pads;
use std::path::PathBuf;

/// Play a URI through uridecodebin with dynamically linked pads
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Media to play
    #[arg(long)]
    uri: Option<String>,

    /// Extra config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (config, _log_guard) = hotswap::init(&CliOverrides {
        config_file: args.config,
        uri: args.uri,
        log_level: args.log_level,
        ..Default::default()
    })?;

    dynamic_pads::run(&config.tutorial.uri)
}
