//! Basic tutorial 4: query position and duration, seek once.

use clap::Parser;
use hotswap::config::CliOverrides;
use hotswap::tutorials::seek_query;
use std::path::PathBuf;

/// Play a URI with playbin, print progress and seek to 30 s after 10 s
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

    seek_query::run(&config.tutorial.uri)
}
