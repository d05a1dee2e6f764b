//! CLI command definitions
//!
//! Defines the clap commands for the posts API test CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in posts suite
    Run {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Execute a test suite defined in a YAML file
    Test {
        /// Path to the YAML test suite file
        path: PathBuf,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// List the scenario rows of a suite without sending any request
    List {
        /// YAML suite to list (default: the built-in suite)
        path: Option<PathBuf>,
    },
}

/// Options shared by the commands that send requests
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Base URL of the API under test (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for report result and attachment files
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Do not write report files
    #[arg(long)]
    pub no_report: bool,

    /// Directory with schema documents overriding the built-in ones
    #[arg(long)]
    pub schemas: Option<PathBuf>,

    /// Do not print request/response payloads
    #[arg(long, short)]
    pub quiet: bool,
}
