//! SQLite-backed store shared with the program under test.

mod connection;
mod repo_impl;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

/// Tables cleared before every test unit.
pub const RESET_TABLES: [&str; 6] = [
    "folders",
    "notes",
    "tags",
    "note_tags",
    "resources",
    "deleted_items",
];

// ===========================================
// SqliteStore Struct
// ===========================================

/// Handle to the store file the program under test writes.
///
/// The harness holds one of these for the whole run; the program opens its
/// own connection to the same file on every invocation.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
