//! Assertion primitives and progress reporting.
//!
//! Checks are pure: they either pass or return an `AssertionError`. The
//! [`Reporter`] prints the progress marks and unit headers that make up the
//! run's human-readable output.

use crate::error::{HarnessError, HarnessResult};
use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use thiserror::Error;

/// An expectation did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionError {
    message: String,
}

impl AssertionError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fails unless `v` is true.
pub fn check_true(v: bool) -> Result<(), AssertionError> {
    if v {
        return Ok(());
    }
    Err(AssertionError {
        message: format!("Expected \"true\", got \"{v}\"."),
    })
}

/// Fails unless `v` is false.
pub fn check_false(v: bool) -> Result<(), AssertionError> {
    if !v {
        return Ok(());
    }
    Err(AssertionError {
        message: format!("Expected \"false\", got \"{v}\"."),
    })
}

/// Fails unless `expected == actual`.
pub fn check_equals<T>(expected: T, actual: T) -> Result<(), AssertionError>
where
    T: PartialEq + Display,
{
    if expected == actual {
        return Ok(());
    }
    Err(AssertionError {
        message: format!("Expecting \"{expected}\", got \"{actual}\"."),
    })
}

// ===========================================
// Progress Output
// ===========================================

/// Writes unit headers, progress marks and line breaks to the run's output.
pub struct Reporter {
    out: RefCell<Box<dyn Write>>,
}

impl Reporter {
    pub fn new(out: impl Write + 'static) -> Self {
        Self {
            out: RefCell::new(Box::new(out)),
        }
    }

    /// Reporter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Reporter that discards everything.
    pub fn sink() -> Self {
        Self::new(io::sink())
    }

    /// Writes `"<name>: "` ahead of a unit's marks.
    pub fn header(&self, name: &str) -> HarnessResult<()> {
        self.write(&format!("{name}: "))
    }

    /// Writes one progress mark for a passed assertion.
    pub fn mark(&self) -> HarnessResult<()> {
        self.write(".")
    }

    pub fn line_break(&self) -> HarnessResult<()> {
        self.write("\n")
    }

    fn write(&self, text: &str) -> HarnessResult<()> {
        let mut out = self.out.borrow_mut();
        out.write_all(text.as_bytes())
            .and_then(|()| out.flush())
            .map_err(HarnessError::Output)
    }
}
