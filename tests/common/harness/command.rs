//! Fluent wrappers around assert_cmd::Command.

// Allow dead code since not every test file uses every helper
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Builder for a `notes-harness` invocation.
pub struct HarnessCommand {
    args: Vec<String>,
}

impl HarnessCommand {
    /// Creates a new command for the `notes-harness` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the `--config` option.
    pub fn config(mut self, path: &Path) -> Self {
        self.args.push("--config".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notes-harness").expect("Failed to find notes-harness binary");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }
}

impl Default for HarnessCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a direct `notes-fixture` invocation with the harness flags.
pub struct FixtureCommand {
    args: Vec<String>,
}

impl FixtureCommand {
    /// Creates a command bound to `profile`, as the harness would issue it.
    pub fn new(profile: &Path) -> Self {
        Self {
            args: vec![
                "--update-geolocation-disabled".to_string(),
                "--env".to_string(),
                "dev".to_string(),
                "--profile".to_string(),
                profile.to_string_lossy().to_string(),
            ],
        }
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notes-fixture").expect("Failed to find notes-fixture binary");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns trimmed stdout.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output)
            .expect("Output was not valid UTF-8")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_harness_command_runs_binary() {
        HarnessCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_harness_command_with_config() {
        let temp = TempDir::new().unwrap();
        let cmd = HarnessCommand::new().config(temp.path()).args(["list"]);
        let args = cmd.get_args();
        assert_eq!(args[0], "--config");
        assert_eq!(args[1], temp.path().to_string_lossy());
        assert_eq!(args[2], "list");
    }

    #[test]
    fn test_fixture_command_runs_binary() {
        let temp = TempDir::new().unwrap();
        let out = FixtureCommand::new(temp.path()).args(["version"]).output_success();
        assert!(out.contains("(dev)"));
    }
}
