//! Leveled logger with console and file targets.

use chrono::Local;
use clap::ValueEnum;
use serde::Deserialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ===========================================
// Severity Levels
// ===========================================

/// Log severity.
///
/// A logger configured at a given level emits every call at that level or
/// below it; `Debug` is the most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    None = 0,
    #[default]
    Error = 10,
    Warn = 20,
    Info = 30,
    Debug = 40,
}

impl Level {
    /// Tag written after the timestamp.
    fn tag(self) -> &'static str {
        match self {
            Level::None => "",
            Level::Error => "[error] ",
            Level::Warn => "[warn] ",
            Level::Info => "[info] ",
            Level::Debug => "[debug] ",
        }
    }
}

// ===========================================
// Targets and Payloads
// ===========================================

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// stderr for errors and warnings, stdout otherwise
    Console,
    /// Append-only UTF-8 text file
    File { path: PathBuf },
}

/// Something to log: plain text or a structured JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Json(Value),
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<Value> for Payload {
    fn from(v: Value) -> Self {
        Payload::Json(v)
    }
}

/// A file target could not be appended to.
#[derive(Debug, Error)]
#[error("failed to append to log file {path}: {source}")]
pub struct LogError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

// ===========================================
// Logger
// ===========================================

/// Multi-target leveled logger.
///
/// Built once at startup and handed to collaborators (usually behind an `Arc`).
#[derive(Debug, Default)]
pub struct Logger {
    level: Level,
    targets: Vec<LogTarget>,
}

impl Logger {
    /// Creates a logger at the given level with no targets.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            targets: Vec::new(),
        }
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Appends a target; targets are written in insertion order.
    pub fn add_target(&mut self, target: LogTarget) {
        self.targets.push(target);
    }

    /// Removes every target.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn targets(&self) -> &[LogTarget] {
        &self.targets
    }

    /// Returns true if a call at `level` would be written anywhere.
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::None && level <= self.level && !self.targets.is_empty()
    }

    /// Writes `payload` to every target if `level` is enabled.
    ///
    /// # Errors
    ///
    /// Returns `LogError` if a file target cannot be appended to.
    pub fn log(&self, level: Level, payload: impl Into<Payload>) -> Result<(), LogError> {
        if !self.enabled(level) {
            return Ok(());
        }

        let payload = payload.into();
        let line = format!(
            "{}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level.tag()
        );

        for target in &self.targets {
            match target {
                LogTarget::Console => write_console(level, &line, &payload),
                LogTarget::File { path } => {
                    let text = match &payload {
                        Payload::Text(s) => s.clone(),
                        Payload::Json(v) => v.to_string(),
                    };
                    append_line(path, &format!("{line}{text}\n"))?;
                }
            }
        }
        Ok(())
    }

    pub fn error(&self, payload: impl Into<Payload>) -> Result<(), LogError> {
        self.log(Level::Error, payload)
    }

    pub fn warn(&self, payload: impl Into<Payload>) -> Result<(), LogError> {
        self.log(Level::Warn, payload)
    }

    pub fn info(&self, payload: impl Into<Payload>) -> Result<(), LogError> {
        self.log(Level::Info, payload)
    }

    pub fn debug(&self, payload: impl Into<Payload>) -> Result<(), LogError> {
        self.log(Level::Debug, payload)
    }
}

// ===========================================
// Console Output
// ===========================================

/// Standard stream a console line goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Errors and warnings go to stderr, everything else to stdout.
fn console_stream(level: Level) -> ConsoleStream {
    match level {
        Level::Error | Level::Warn => ConsoleStream::Stderr,
        Level::None | Level::Info | Level::Debug => ConsoleStream::Stdout,
    }
}

/// Console text for one entry; JSON is pretty-printed below the line.
fn console_text(line: &str, payload: &Payload) -> String {
    match payload {
        Payload::Text(s) => format!("{line}{s}"),
        Payload::Json(v) => {
            let pretty = serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string());
            format!("{line}\n{pretty}")
        }
    }
}

fn write_console(level: Level, line: &str, payload: &Payload) {
    let text = console_text(line, payload);
    // A closed console stream is not a sink failure
    let _ = match console_stream(level) {
        ConsoleStream::Stderr => writeln!(io::stderr().lock(), "{text}"),
        ConsoleStream::Stdout => writeln!(io::stdout().lock(), "{text}"),
    };
}

fn append_line(path: &Path, text: &str) -> Result<(), LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(text.as_bytes()))
        .map_err(|source| LogError {
            path: path.to_path_buf(),
            source,
        })
}
