//! CLI command handling
//!
//! Resolves configuration, builds the client, schema registry and report
//! writer, and hands the suite to the runner.

use std::path::Path;

use colored::Colorize;

use crate::api::PostsClient;
use crate::commands::{Commands, TargetArgs};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::report::ReportWriter;
use crate::schema::SchemaRegistry;
use crate::testing::{RunOptions, Runner, Suite};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    match command {
        Commands::Run { target } => {
            let config = load_config(config_path)?;
            run(&Suite::builtin(), config, target, verbose).await
        }

        Commands::Test { path, target } => {
            let config = load_config(config_path)?;
            let suite = Suite::load(&path)?;
            run(&suite, config, target, verbose).await
        }

        Commands::List { path } => {
            let suite = match path {
                Some(path) => Suite::load(&path)?,
                None => Suite::builtin(),
            };
            list(&suite)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run(suite: &Suite, config: Config, target: TargetArgs, verbose: bool) -> Result<()> {
    let base_url = target.base_url.unwrap_or(config.target.base_url);
    let client = PostsClient::new(&base_url, &config.timeouts)?;

    let schema_dir = target.schemas.or(config.schemas.dir);
    let schemas = SchemaRegistry::load(schema_dir.as_deref())?;

    let writer = if target.no_report || !config.report.enabled {
        None
    } else {
        Some(ReportWriter::new(
            target.results_dir.unwrap_or(config.report.results_dir),
        ))
    };

    let options = RunOptions {
        echo: !target.quiet,
        verbose,
    };
    let runner = Runner::new(&client, &schemas, writer.as_ref(), options);
    let result = runner.run_suite(suite).await?;

    if let Some(writer) = &writer {
        println!("Report written to {}", writer.dir().display());
    }

    if result.all_passed() {
        Ok(())
    } else {
        Err(Error::SuiteFailed {
            failed: result.failed(),
            total: result.total(),
        })
    }
}

fn list(suite: &Suite) -> Result<()> {
    println!("{}", suite.name.white().bold());
    if let Some(desc) = &suite.description {
        println!("  {}", desc.dimmed());
    }

    for case in &suite.cases {
        println!(
            "\n{} {}",
            format!("{}:", case.story()).cyan(),
            format!("[{}]", case.severity()).dimmed()
        );
        for row in case.operation.rows() {
            let request = row.request()?;
            let params: Vec<String> = row
                .parameters()
                .into_iter()
                .map(|(name, value)| format!("{name}={value:?}"))
                .collect();
            println!("  {:<18} {}", request.title(), params.join(" ").dimmed());
        }
    }

    println!("\n{} rows", suite.rows().len());
    Ok(())
}
