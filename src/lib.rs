//! notes-harness - sequential end-to-end tests for a notes CLI

pub mod assert;
pub mod cli;
pub mod client;
pub mod error;
pub mod executor;
pub mod fixture;
pub mod logger;
pub mod runner;
pub mod store;
pub mod suite;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_list, handle_run},
};

/// Main entry point for the CLI application.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Run(args) => handle_run(args, &config, cli.verbose).await,
        Command::List => handle_list(),
        Command::Completions(args) => handle_completions(args),
    }
}
