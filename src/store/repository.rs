//! Repository trait, model rows and error types.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Errors that can occur while resetting or reading the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record the test expected to exist is absent.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The store file is missing or could not be opened.
    #[error("cannot open store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// Model Rows
// ===========================================

/// A notebook as stored in the `folders` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: String,
    pub title: String,
}

/// A note as stored in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub body: String,
}

/// Note columns that can be used as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Id,
    Title,
    Body,
}

impl NoteField {
    /// Column name in the `notes` table.
    pub fn column(self) -> &'static str {
        match self {
            NoteField::Id => "id",
            NoteField::Title => "title",
            NoteField::Body => "body",
        }
    }
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ===========================================
// Repository Trait
// ===========================================

/// Read-back and reset operations the harness performs on the store.
///
/// The schema belongs to the program under test; these queries only assume
/// the tables and columns they name exist.
pub trait Repository {
    /// Deletes every row from the mutable tables in a single transaction.
    fn reset(&mut self) -> StoreResult<()>;

    /// Returns all folders in insertion order.
    fn all_folders(&self) -> StoreResult<Vec<Folder>>;

    /// Returns the first folder with the given title.
    fn folder_by_title(&self, title: &str) -> StoreResult<Option<Folder>>;

    /// Returns all notes in insertion order.
    fn all_notes(&self) -> StoreResult<Vec<Note>>;

    /// Returns the first note in `folder_id` whose `field` equals `value`.
    fn folder_note_by_field(
        &self,
        folder_id: &str,
        field: NoteField,
        value: &str,
    ) -> StoreResult<Option<Note>>;
}
