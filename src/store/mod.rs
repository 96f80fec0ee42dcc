//! Shared persistent store: reset and read-back accessors.

mod repository;
pub mod sqlite;

pub use repository::{Folder, Note, NoteField, Repository, StoreError, StoreResult};
pub use sqlite::{RESET_TABLES, SqliteStore, Transaction};
