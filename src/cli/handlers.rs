//! Command handlers for the CLI.

use anyhow::{Context, Result};
use clap::CommandFactory;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use super::{Cli, CompletionsArgs, RunArgs};
use super::config::Config;
use crate::assert::Reporter;
use crate::runner::run_suite;
use crate::suite::default_registry;

/// Runs the built-in suite.
///
/// A failing run is logged at ERROR and reported through the exit code;
/// only setup problems (bad config, unwritable log file) are returned as errors.
pub async fn handle_run(args: &RunArgs, config: &Config, verbose: u8) -> Result<ExitCode> {
    let settings = config.settings(args, verbose)?;
    let logger = Arc::new(settings.build_logger());
    let registry = default_registry()?;

    match run_suite(&settings, &registry, Arc::clone(&logger), Reporter::stdout()).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            logger
                .error(format!("{err:#}"))
                .with_context(|| "failed to log run failure")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Prints the unit names in execution order.
pub fn handle_list() -> Result<ExitCode> {
    for name in default_registry()?.names() {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn handle_completions(args: &CompletionsArgs) -> Result<ExitCode> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
