//! Basic tutorial 2: build a pipeline element by element.
//!
//! `videotestsrc ! vertigotv ! videoconvert ! autovideosink`, run until
//! error or end of stream.

use clap::Parser;
use hotswap::config::CliOverrides;
use hotswap::tutorials::element_chain;
use std::path::PathBuf;

/// Manually linked test pattern with a video effect
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// videotestsrc pattern, by nick or number
    #[arg(long)]
    pattern: Option<String>,

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
        pattern: args.pattern,
        log_level: args.log_level,
        ..Default::default()
    })?;

    element_chain::run(&config.tutorial.pattern)
}
