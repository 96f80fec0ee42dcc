//! Sequential test runner.
//!
//! One run: wipe the base directory, probe the program with `version`, open
//! the shared store, then run each selected unit in registration order with a
//! store reset in front of it. Units never overlap and the first error ends
//! the run.

mod context;
mod registry;

pub use context::TestContext;
pub use registry::{Registry, TestUnit, UnitFn, UnitFuture};

use crate::assert::Reporter;
use crate::client::{self, ClientProfile};
use crate::error::HarnessResult;
use crate::executor::{CommandExecutor, ExecOptions};
use crate::logger::{Level, LogTarget, Logger};
use crate::store::{Repository, SqliteStore};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

/// Id of the single client every run uses.
const CLIENT_ID: u32 = 1;

// ===========================================
// Settings
// ===========================================

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessSettings {
    /// Program under test
    pub program: PathBuf,
    /// Arguments placed before the startup flags
    pub program_args: Vec<String>,
    /// Directory holding the client profiles; wiped at startup. Relative
    /// paths resolve against the working directory.
    pub base_dir: PathBuf,
    /// Run only this unit
    pub only: Option<String>,
    pub log_level: Level,
    pub log_file: Option<PathBuf>,
}

impl HarnessSettings {
    /// Builds the run's logger: console always, plus the log file if set.
    pub fn build_logger(&self) -> Logger {
        let mut logger = Logger::new(self.log_level);
        logger.add_target(LogTarget::Console);
        if let Some(path) = &self.log_file {
            logger.add_target(LogTarget::File { path: path.clone() });
        }
        logger
    }
}

// ===========================================
// Runner
// ===========================================

/// Names of the units a run executed, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: Vec<String>,
}

/// Runs the selected units of a registry one at a time.
pub struct Runner<'r> {
    units: Vec<TestUnit<'r>>,
}

impl<'r> Runner<'r> {
    /// Selects the units to run.
    ///
    /// # Errors
    ///
    /// Returns `UnknownUnit` if `filter` names no registered unit.
    pub fn new(registry: &'r Registry, filter: Option<&str>) -> HarnessResult<Self> {
        Ok(Self {
            units: registry.select(filter)?,
        })
    }

    pub fn units(&self) -> &[TestUnit<'r>] {
        &self.units
    }

    /// Runs every selected unit, each after a store reset.
    ///
    /// Stops at the first error and returns it.
    pub async fn run(&self, ctx: &mut TestContext) -> HarnessResult<RunSummary> {
        let mut queue: VecDeque<TestUnit<'r>> = self.units.iter().copied().collect();
        let mut summary = RunSummary::default();

        while let Some(unit) = queue.pop_front() {
            ctx.store_mut().reset()?;
            ctx.reporter().header(unit.name)?;

            if let Err(err) = (unit.run)(&*ctx).await {
                // End the partial progress line; the unit's error wins over
                // a failed write
                let _ = ctx.reporter().line_break();
                return Err(err);
            }
            ctx.reporter().line_break()?;

            summary.executed.push(unit.name.to_string());
        }

        Ok(summary)
    }
}

// ===========================================
// Setup
// ===========================================

/// Prepares a fresh run: wipes the base directory, runs `version` so the
/// program creates the profile and its store, then opens that store.
pub async fn setup(
    settings: &HarnessSettings,
    logger: Arc<Logger>,
    reporter: Reporter,
) -> HarnessResult<TestContext> {
    let client = ClientProfile::new(&settings.base_dir, CLIENT_ID)?;
    client::reset_base_dir(client.base_dir())?;

    let executor = CommandExecutor::new(
        settings.program.clone(),
        settings.program_args.clone(),
        Arc::clone(&logger),
    );

    let version = executor
        .execute(&client, "version", &ExecOptions::default())
        .await?;
    logger.info(version)?;

    let store = SqliteStore::open(&client.database_path())?;
    Ok(TestContext::new(client, executor, store, reporter, logger))
}

/// Sets up a run and executes the registry against it.
///
/// The filter is checked before anything on disk is touched.
pub async fn run_suite(
    settings: &HarnessSettings,
    registry: &Registry,
    logger: Arc<Logger>,
    reporter: Reporter,
) -> HarnessResult<RunSummary> {
    let runner = Runner::new(registry, settings.only.as_deref())?;
    let mut ctx = setup(settings, logger, reporter).await?;
    runner.run(&mut ctx).await
}
