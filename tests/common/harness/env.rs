//! Isolated run environment with temp directory.

// Allow dead code since not every test file uses every helper
#![allow(dead_code)]

use super::{FixtureCommand, HarnessCommand};
use notes_harness::client::ClientProfile;
use notes_harness::logger::Level;
use notes_harness::runner::HarnessSettings;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment for one harness run against `notes-fixture`.
///
/// Holds a temp directory with an empty config file and the base directory
/// for client profiles; everything is removed on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        std::fs::write(root.join("config.toml"), "").expect("Failed to write config");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding client profiles; wiped by every run.
    pub fn base_dir(&self) -> PathBuf {
        self.root.join("cli-integration")
    }

    /// Empty config file, so runs never pick up the user's config.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path to the fixture binary built alongside the tests.
    pub fn fixture_program() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_notes-fixture"))
    }

    /// The profile the harness uses for its single client.
    pub fn client(&self) -> ClientProfile {
        ClientProfile::new(&self.base_dir(), 1).expect("temp path is absolute")
    }

    /// Settings for a library-level run with logging off.
    pub fn settings(&self) -> HarnessSettings {
        HarnessSettings {
            program: Self::fixture_program(),
            program_args: Vec::new(),
            base_dir: self.base_dir(),
            only: None,
            log_level: Level::None,
            log_file: None,
        }
    }

    /// A `notes-harness` command with the isolated config.
    pub fn cmd(&self) -> HarnessCommand {
        HarnessCommand::new().config(&self.config_path())
    }

    /// A `notes-harness run` command against the fixture.
    pub fn run_cmd(&self) -> HarnessCommand {
        let program = Self::fixture_program();
        let base_dir = self.base_dir();
        self.cmd().args([
            "run",
            "--program",
            program.to_str().expect("fixture path is UTF-8"),
            "--base-dir",
            base_dir.to_str().expect("temp path is UTF-8"),
        ])
    }

    /// A direct fixture command using the client's profile.
    pub fn fixture(&self) -> FixtureCommand {
        FixtureCommand::new(self.client().profile_dir())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_paths_live_in_temp_dir() {
        let env = TestEnv::new();
        assert!(env.base_dir().starts_with(env.root()));
        assert!(env.config_path().exists());
        assert!(!env.base_dir().exists(), "base dir is created by runs");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_settings_point_at_fixture() {
        let env = TestEnv::new();
        let settings = env.settings();
        assert!(settings.program.ends_with(
            Path::new(env!("CARGO_BIN_EXE_notes-fixture")).file_name().unwrap()
        ));
        assert_eq!(settings.base_dir, env.base_dir());
    }
}
