use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use rg_status::{build_bar, BarConfig};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// rg-status - i3bar/swaybar status line with click support
#[derive(Parser, Debug, Clone)]
#[command(name = "rg-status")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the one in the config directory
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "print-config")]
    print_config: bool,
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting. Logs go to stderr; stdout
    // belongs to the bar protocol.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting rg-status v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("rg-status: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => BarConfig::load_from_path(path)?,
        None => BarConfig::load()?,
    };

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let bar = build_bar(&config)?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start the async runtime")?;
    let result = runtime.block_on(async {
        let input = BufReader::new(tokio::io::stdin());
        bar.run(input, io::stdout()).await
    });

    // Don't wait on a block stuck in its update
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
    result?;

    info!("Bar stopped");
    Ok(())
}
