//! Check that the structure accessors agree with each other.

use clap::Parser;
use hotswap::config::CliOverrides;
use hotswap::structures::CHECKS;
use tracing::error;

/// Run the structure accessor checks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (_config, _log_guard) = hotswap::init(&CliOverrides {
        log_level: args.log_level,
        ..Default::default()
    })?;

    let mut failures = 0;
    for (name, check) in CHECKS {
        match check() {
            Ok(()) => println!("{}: PASS", name),
            Err(err) => {
                error!("{}: {}", name, err);
                println!("{}: FAIL", name);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} checks failed", failures, CHECKS.len());
    }
    println!("PASS");
    Ok(())
}
