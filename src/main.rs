//! Posts API test suite CLI
//!
//! Runs table-driven CRUD checks against a JSONPlaceholder-style posts
//! resource and writes an Allure-compatible report.

use clap::Parser;
use posts_api::cli;
use posts_api::commands::Commands;
use posts_api::common::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "posts-api", about = "Table-driven API tests for the posts resource")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show status and timing for every case, and debug logs
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        logging::init_verbose();
    } else {
        logging::init_cli();
    }

    if let Err(e) = cli::dispatch(cli.command, cli.config.as_deref(), cli.verbose).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
