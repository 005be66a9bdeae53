//! Larder
//!
//! Typed client for the recipe sharing REST API.
//!
//! This is the main entry point for the command-line tool.

use clap::Parser;
use larder_cli::Cli;
use tracing::debug;

#[tokio::main]
async fn main() {
    // Initialize logging
    larder_cli::init_logging();
    debug!("{} v{}", larder_cli::NAME, larder_cli::VERSION);

    let cli = Cli::parse();
    let code = larder_cli::run(cli).await;
    std::process::exit(code);
}
