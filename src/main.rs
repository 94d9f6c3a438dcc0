//! skirmish - combat and status tracker for tabletop sessions

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skirmish::cli::App;
use skirmish::Config;

/// Combat and status tracker for tabletop sessions
#[derive(Parser, Debug)]
#[command(name = "skirmish", version, about = "Combat & status tracker")]
struct Args {
    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Seed the dice roller for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize tracing; the interactive transcript owns stdout, so the log
    // goes to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    let config = Config {
        color: !args.no_color,
        seed: args.seed,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    App::new(&config, stdin.lock(), stdout.lock()).run()?;

    Ok(())
}
