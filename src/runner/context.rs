//! State shared by the test units of one run.

use crate::assert::{Reporter, check_equals, check_false, check_true};
use crate::client::ClientProfile;
use crate::error::HarnessResult;
use crate::executor::{CommandExecutor, ExecOptions};
use crate::logger::Logger;
use crate::store::SqliteStore;
use std::fmt::Display;
use std::sync::Arc;

/// Everything a test unit can reach: the client, the program under test, the
/// shared store, the progress output and the logger.
pub struct TestContext {
    client: ClientProfile,
    executor: CommandExecutor,
    store: SqliteStore,
    reporter: Reporter,
    logger: Arc<Logger>,
}

impl TestContext {
    pub fn new(
        client: ClientProfile,
        executor: CommandExecutor,
        store: SqliteStore,
        reporter: Reporter,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            client,
            executor,
            store,
            reporter,
            logger,
        }
    }

    pub fn client(&self) -> &ClientProfile {
        &self.client
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut SqliteStore {
        &mut self.store
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    // ===========================================
    // Program Under Test
    // ===========================================

    /// Runs `command` as this run's client and returns its trimmed stdout.
    pub async fn exec(&self, command: &str) -> HarnessResult<String> {
        self.exec_with(command, &ExecOptions::default()).await
    }

    pub async fn exec_with(&self, command: &str, options: &ExecOptions) -> HarnessResult<String> {
        self.executor.execute(&self.client, command, options).await
    }

    // ===========================================
    // Assertions
    // ===========================================

    pub fn assert_true(&self, v: bool) -> HarnessResult<()> {
        check_true(v)?;
        self.reporter.mark()
    }

    pub fn assert_false(&self, v: bool) -> HarnessResult<()> {
        check_false(v)?;
        self.reporter.mark()
    }

    pub fn assert_equals<T>(&self, expected: T, actual: T) -> HarnessResult<()>
    where
        T: PartialEq + Display,
    {
        check_equals(expected, actual)?;
        self.reporter.mark()
    }
}
