//! Small egui layout demos.

use clap::Parser;
use hotswap_frontend::GalleryPage;
use std::path::PathBuf;

/// Show one widget gallery page
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page to show (click, two-buttons, grid, styled)
    #[arg(long, default_value = "click")]
    page: GalleryPage,

    /// TOML stylesheet for the styled page
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let logging = hotswap::config::LoggingConfig {
        log_level: args.log_level,
        ..Default::default()
    };
    let _log_guard = hotswap::logging::init(&logging)?;

    hotswap::gui::launch_gallery(args.page, args.stylesheet.as_deref())
}
