//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::RunArgs;
use crate::logger::Level;
use crate::runner::HarnessSettings;

/// Program run when neither the CLI nor the config file names one.
pub const DEFAULT_PROGRAM: &str = "joplin";

/// Base directory used when neither the CLI nor the config file names one.
pub const DEFAULT_BASE_DIR: &str = "tests/cli-integration";

/// Harness configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Program under test
    pub program: Option<PathBuf>,

    /// Arguments placed before the startup flags
    pub program_args: Option<Vec<String>>,

    /// Directory for client profiles
    pub base_dir: Option<PathBuf>,

    /// Minimum log severity
    pub log_level: Option<Level>,

    /// Log file appended to alongside the console
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default config file yields the default config; a missing
    /// explicit one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::config_path();
                if !config_path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&config_path)
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notes-harness/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notes-harness")
            .join("config.toml")
    }

    /// Resolve run settings, with CLI arguments taking precedence.
    ///
    /// Precedence order for every setting:
    /// 1. CLI argument
    /// 2. Config file setting
    /// 3. Built-in default
    ///
    /// `verbose` raises the log level to INFO (`-v`) or DEBUG (`-vv`).
    pub fn settings(&self, args: &RunArgs, verbose: u8) -> Result<HarnessSettings> {
        let program = args
            .program
            .clone()
            .or_else(|| self.program.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM));

        let program_args = if args.program_args.is_empty() {
            self.program_args.clone().unwrap_or_default()
        } else {
            args.program_args.clone()
        };

        let base_dir = args
            .base_dir
            .clone()
            .or_else(|| self.base_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR));
        let base_dir = std::path::absolute(&base_dir)
            .with_context(|| format!("failed to resolve base directory: {}", base_dir.display()))?;

        let log_level = args.log_level.or(self.log_level).unwrap_or_default();
        let log_level = match verbose {
            0 => log_level,
            1 => log_level.max(Level::Info),
            _ => Level::Debug,
        };

        Ok(HarnessSettings {
            program,
            program_args,
            base_dir,
            only: args.only.clone().filter(|name| !name.is_empty()),
            log_level,
            log_file: args.log_file.clone().or_else(|| self.log_file.clone()),
        })
    }
}
