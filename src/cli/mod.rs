//! CLI command definitions and handlers

pub mod config;
pub mod handlers;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::logger::Level;

/// notes-harness - end-to-end tests for a notes CLI
#[derive(Parser, Debug)]
#[command(name = "notes-harness", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/notes-harness/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the test units against the program
    Run(RunArgs),

    /// List test units in execution order
    List,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Program under test
    #[arg(short, long)]
    pub program: Option<PathBuf>,

    /// Argument passed to the program before its startup flags (repeatable)
    #[arg(long = "program-arg", action = ArgAction::Append, allow_hyphen_values = true)]
    pub program_args: Vec<String>,

    /// Directory for client profiles (removed at startup)
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// Run only this test unit
    #[arg(short, long)]
    pub only: Option<String>,

    /// Minimum log severity
    #[arg(short, long, value_enum)]
    pub log_level: Option<Level>,

    /// Also append log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
