//! `cmsdbt`: keep the data.cms.gov dbt source catalog up to date.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Command};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let layout = cli.layout();

    let result = match cli.command {
        Command::FetchColumns(args) => commands::fetch_columns(&layout, &args).await,
        Command::GenerateSources { output_dir } => {
            commands::generate_sources(&layout.with_sources_dir(output_dir))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
