//! Connection management for SqliteStore.

use super::SqliteStore;
use super::transaction::Transaction;
use crate::store::{StoreError, StoreResult};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

impl SqliteStore {
    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens the existing store file at `path`.
    ///
    /// The file is never created here: the program under test owns the schema,
    /// so a missing file means it has not run yet.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an empty in-memory database, with no schema.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    // ===========================================
    // Connection Accessors
    // ===========================================

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ===========================================
    // Transaction Support
    // ===========================================

    /// Begins a new transaction.
    ///
    /// The transaction will automatically rollback on drop unless `commit()` is called.
    pub fn transaction(&mut self) -> StoreResult<Transaction<'_>> {
        self.conn.execute_batch("BEGIN")?;
        Ok(Transaction::new(&self.conn))
    }

    /// Runs every statement in one transaction; any failure rolls back all of them.
    pub fn transaction_exec_batch(&mut self, statements: &[&str]) -> StoreResult<()> {
        let tx = self.transaction()?;
        for sql in statements {
            tx.execute(sql, [])?;
        }
        tx.commit()
    }
}
