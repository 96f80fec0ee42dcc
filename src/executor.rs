//! Runs the program under test as a child process.

use crate::client::ClientProfile;
use crate::error::{HarnessError, HarnessResult};
use crate::logger::Logger;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

/// Flags passed ahead of every command.
const STARTUP_FLAGS: [&str; 3] = ["--update-geolocation-disabled", "--env", "dev"];

/// Per-invocation options.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    envs: Vec<(String, String)>,
    current_dir: Option<PathBuf>,
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Runs the child in `dir` instead of the harness's working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

/// Spawns the program under test, one invocation at a time.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    program: PathBuf,
    program_args: Vec<String>,
    logger: Arc<Logger>,
}

impl CommandExecutor {
    /// `program_args` go before the startup flags (e.g. a script path when the
    /// program is an interpreter).
    pub fn new(program: impl Into<PathBuf>, program_args: Vec<String>, logger: Arc<Logger>) -> Self {
        Self {
            program: program.into(),
            program_args,
            logger,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds the argument list for `command_text` run as `client`.
    pub fn invocation_args(
        &self,
        client: &ClientProfile,
        command_text: &str,
    ) -> HarnessResult<Vec<String>> {
        let mut args = self.program_args.clone();
        args.extend(STARTUP_FLAGS.iter().map(|s| s.to_string()));
        args.push("--profile".to_string());
        args.push(client.profile_dir().to_string_lossy().into_owned());
        args.extend(split_command(command_text)?);
        Ok(args)
    }

    /// Runs `command_text` for `client` and returns its trimmed stdout.
    ///
    /// # Errors
    ///
    /// - `Spawn` if the program cannot be started
    /// - `Exit` if it exits unsuccessfully; stderr is logged at ERROR first
    /// - `InvalidCommand` if the command text has unbalanced quotes
    pub async fn execute(
        &self,
        client: &ClientProfile,
        command_text: &str,
        options: &ExecOptions,
    ) -> HarnessResult<String> {
        let args = self.invocation_args(client, command_text)?;
        self.logger
            .info(format!("{}: {}", client.id(), command_text))?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        for (key, value) in &options.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &options.current_dir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output().await {
            Ok(output) => output,
            Err(source) => {
                let program = self.program.display().to_string();
                self.logger
                    .error(format!("failed to spawn {program}: {source}"))?;
                return Err(HarnessError::Spawn { program, source });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            self.logger.error(stderr.clone())?;
            return Err(HarnessError::Exit {
                command: command_text.to_string(),
                status: output.status,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

// ===========================================
// Command Splitting
// ===========================================

/// Splits command text into arguments the way a POSIX shell would quote them.
///
/// Supports whitespace separation, single quotes (literal), double quotes
/// (with `\"` and `\\` escapes) and backslash escapes outside quotes. No
/// expansion of any kind is performed.
pub fn split_command(text: &str) -> HarnessResult<Vec<String>> {
    let invalid = |reason| HarnessError::InvalidCommand {
        command: text.to_string(),
        reason,
    };

    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(invalid("unterminated single quote")),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(invalid("unterminated double quote")),
                        },
                        Some(c) => current.push(c),
                        None => return Err(invalid("unterminated double quote")),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(c) => current.push(c),
                    None => return Err(invalid("trailing backslash")),
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Level;
    use pretty_assertions::assert_eq;

    fn executor(program: &str, program_args: &[&str]) -> CommandExecutor {
        CommandExecutor::new(
            program,
            program_args.iter().map(|s| s.to_string()).collect(),
            Arc::new(Logger::new(Level::None)),
        )
    }

    fn client() -> ClientProfile {
        ClientProfile::new(Path::new("/tmp/harness"), 1).unwrap()
    }

    // ===========================================
    // split_command
    // ===========================================

    #[test]
    fn split_plain_words() {
        assert_eq!(split_command("mkbook nb1").unwrap(), vec!["mkbook", "nb1"]);
        assert_eq!(split_command("  rm   -r -f nb1 ").unwrap(), vec!["rm", "-r", "-f", "nb1"]);
    }

    #[test]
    fn split_single_quotes_are_literal() {
        assert_eq!(split_command("rm -f 'n*'").unwrap(), vec!["rm", "-f", "n*"]);
        assert_eq!(split_command(r"cat 'a\b'").unwrap(), vec!["cat", r"a\b"]);
    }

    #[test]
    fn split_double_quotes_and_escapes() {
        assert_eq!(
            split_command(r#"mknote "my \"big\" note""#).unwrap(),
            vec!["mknote", r#"my "big" note"#]
        );
        assert_eq!(split_command(r"mknote my\ note").unwrap(), vec!["mknote", "my note"]);
    }

    #[test]
    fn split_keeps_empty_quoted_argument() {
        assert_eq!(split_command("mknote ''").unwrap(), vec!["mknote", ""]);
    }

    #[test]
    fn split_empty_text() {
        assert!(split_command("").unwrap().is_empty());
        assert!(split_command("   ").unwrap().is_empty());
    }

    #[test]
    fn split_rejects_unbalanced_quotes() {
        assert!(matches!(
            split_command("rm -f 'n*"),
            Err(HarnessError::InvalidCommand { .. })
        ));
        assert!(matches!(
            split_command("mknote \"open"),
            Err(HarnessError::InvalidCommand { .. })
        ));
        assert!(matches!(
            split_command("mknote trailing\\"),
            Err(HarnessError::InvalidCommand { .. })
        ));
    }

    // ===========================================
    // Invocation
    // ===========================================

    #[test]
    fn invocation_args_prefix_fixed_flags() {
        let exec = executor("node", &["app/main.js"]);
        let args = exec.invocation_args(&client(), "rm -f 'n*'").unwrap();
        assert_eq!(
            args,
            vec![
                "app/main.js",
                "--update-geolocation-disabled",
                "--env",
                "dev",
                "--profile",
                "/tmp/harness/client1",
                "rm",
                "-f",
                "n*",
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_returns_trimmed_stdout() {
        let exec = executor("echo", &[]);
        let out = exec
            .execute(&client(), "mkbook 'my book'", &ExecOptions::default())
            .await
            .unwrap();
        assert_eq!(
            out,
            "--update-geolocation-disabled --env dev --profile /tmp/harness/client1 mkbook my book"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_passes_environment() {
        let exec = executor("sh", &["-c", "printf '  %s  ' \"$NOTES_HARNESS_VALUE\"", "sh"]);
        let options = ExecOptions::new().env("NOTES_HARNESS_VALUE", "hello");
        let out = exec.execute(&client(), "version", &options).await.unwrap();
        assert_eq!(out, "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_reports_exit_failure_with_stderr() {
        let exec = executor("sh", &["-c", "echo 'no such note' >&2; exit 3", "sh"]);
        let err = exec
            .execute(&client(), "cat missing", &ExecOptions::default())
            .await
            .unwrap_err();
        match err {
            HarnessError::Exit {
                command,
                status,
                stderr,
            } => {
                assert_eq!(command, "cat missing");
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "no such note");
            }
            other => panic!("expected exit failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_failure_message_leaves_out_logged_stderr() {
        let exec = executor("sh", &["-c", "echo 'no such note' >&2; exit 3", "sh"]);
        let err = exec
            .execute(&client(), "cat missing", &ExecOptions::default())
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("`cat missing` failed ("));
        assert!(!message.contains("no such note"));
    }

    #[tokio::test]
    async fn execute_reports_spawn_failure() {
        let exec = executor("/nonexistent/notes-program", &[]);
        let err = exec
            .execute(&client(), "version", &ExecOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::Spawn { .. }));
    }

    #[tokio::test]
    async fn execute_rejects_bad_quotes_before_spawning() {
        let exec = executor("/nonexistent/notes-program", &[]);
        let err = exec
            .execute(&client(), "rm 'n*", &ExecOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidCommand { .. }));
    }
}
