//! Reference notes CLI used to exercise the harness end to end.
//!
//! Speaks the same command surface as the program the built-in suite targets
//! (`version`, `mkbook`, `mknote`, `rm`, `cat`) on top of a small SQLite store
//! inside the profile directory.

pub mod handlers;
pub mod schema;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::DATABASE_FILE;
use handlers::{CatArgs, RmArgs};

/// notes-fixture - minimal notes CLI for harness tests
#[derive(Parser, Debug)]
#[command(name = "notes-fixture", version, about, long_about = None)]
pub struct FixtureCli {
    /// Accepted for compatibility; no location lookups are ever made
    #[arg(long)]
    pub update_geolocation_disabled: bool,

    /// Environment name reported by `version`
    #[arg(long, default_value = "prod")]
    pub env: String,

    /// Profile directory holding the store
    #[arg(long)]
    pub profile: PathBuf,

    #[command(subcommand)]
    pub command: FixtureCommand,
}

#[derive(Subcommand, Debug)]
pub enum FixtureCommand {
    /// Print the program version
    Version,

    /// Create a notebook unless one with this title exists
    Mkbook { title: String },

    /// Create a note in the most recently created notebook
    Mknote { title: String },

    /// Remove notes (and notebooks with -r) whose title matches a pattern
    Rm(RmArgs),

    /// Print a note
    Cat(CatArgs),
}

/// Entry point for the `notes-fixture` binary.
pub fn run() -> Result<()> {
    let cli = FixtureCli::parse();
    let output = execute(&cli)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Runs one parsed command and returns what it prints.
pub fn execute(cli: &FixtureCli) -> Result<String> {
    let mut conn = open_store(&cli.profile)?;

    match &cli.command {
        FixtureCommand::Version => Ok(handlers::version(&cli.env)),
        FixtureCommand::Mkbook { title } => handlers::mkbook(&conn, title),
        FixtureCommand::Mknote { title } => handlers::mknote(&conn, title),
        FixtureCommand::Rm(args) => handlers::rm(&mut conn, args),
        FixtureCommand::Cat(args) => handlers::cat(&conn, args),
    }
}

/// Opens (creating if needed) the store inside `profile`.
pub fn open_store(profile: &Path) -> Result<Connection> {
    fs::create_dir_all(profile)
        .with_context(|| format!("failed to create profile directory {}", profile.display()))?;

    let path = profile.join(DATABASE_FILE);
    let conn = Connection::open(&path)
        .with_context(|| format!("failed to open store {}", path.display()))?;
    schema::create_schema(&conn).with_context(|| "failed to create schema")?;
    Ok(conn)
}
