//! Ordered registry of named test units.

use super::TestContext;
use crate::error::{HarnessError, HarnessResult};
use std::future::Future;
use std::pin::Pin;

/// Future returned by a test unit; borrows the context for its whole run.
pub type UnitFuture<'a> = Pin<Box<dyn Future<Output = HarnessResult<()>> + 'a>>;

/// A test unit procedure.
pub type UnitFn = for<'a> fn(&'a TestContext) -> UnitFuture<'a>;

/// A named test unit.
#[derive(Clone, Copy)]
pub struct TestUnit<'r> {
    pub name: &'r str,
    pub run: UnitFn,
}

/// Test units in registration order.
#[derive(Default)]
pub struct Registry {
    units: Vec<(String, UnitFn)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit at the end of the execution order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUnit` if the name is already registered.
    pub fn register(&mut self, name: impl Into<String>, run: UnitFn) -> HarnessResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(HarnessError::DuplicateUnit(name));
        }
        self.units.push((name, run));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(n, _)| n.as_str())
    }

    /// Returns the units to run: all of them, or just the one named by `filter`.
    ///
    /// An empty filter means all units.
    ///
    /// # Errors
    ///
    /// Returns `UnknownUnit` if `filter` names no registered unit.
    pub fn select(&self, filter: Option<&str>) -> HarnessResult<Vec<TestUnit<'_>>> {
        let filter = filter.filter(|f| !f.is_empty());
        if let Some(name) = filter
            && !self.contains(name)
        {
            return Err(HarnessError::UnknownUnit(name.to_string()));
        }

        Ok(self
            .units
            .iter()
            .filter(|(n, _)| filter.is_none_or(|f| f == n))
            .map(|(name, run)| TestUnit {
                name: name.as_str(),
                run: *run,
            })
            .collect())
    }
}
