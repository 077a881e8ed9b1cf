//! browseract - command-line client for the BrowserAct task API
//!
//! Main entry point for the CLI application.

use clap::Parser;

use browseract::cli::{self, Command};
use browseract::Config;

/// Command-line client for the BrowserAct browser-automation API
#[derive(Parser, Debug)]
#[command(name = "browseract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// API key (overrides the config file and BROWSERACT_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Print request/response debug output to stderr
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Print raw JSON payloads instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref api_key) = args.api_key {
        config.auth.api_key = Some(api_key.clone());
    }

    if let Some(ref base_url) = args.base_url {
        config.api.base_url = base_url.clone();
    }

    if let Some(timeout) = args.timeout {
        config.api.timeout_secs = Some(timeout);
    }

    if args.debug {
        config.api.debug = true;
    }

    cli::run(args.command, config, args.json).await?;

    Ok(())
}
