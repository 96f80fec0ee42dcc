//! Repository trait implementation for SqliteStore.

use super::{RESET_TABLES, SqliteStore};
use crate::store::{Folder, Note, NoteField, Repository, StoreResult};
use rusqlite::{OptionalExtension, Row};

fn folder_from_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder {
        id: row.get(0)?,
        title: row.get(1)?,
    })
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        parent_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        title: row.get(2)?,
        body: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

impl Repository for SqliteStore {
    fn reset(&mut self) -> StoreResult<()> {
        let statements: Vec<String> = RESET_TABLES
            .iter()
            .map(|table| format!("DELETE FROM {table}"))
            .collect();
        let refs: Vec<&str> = statements.iter().map(String::as_str).collect();
        self.transaction_exec_batch(&refs)
    }

    fn all_folders(&self) -> StoreResult<Vec<Folder>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title FROM folders ORDER BY rowid")?;
        let folders = stmt
            .query_map([], folder_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(folders)
    }

    fn folder_by_title(&self, title: &str) -> StoreResult<Option<Folder>> {
        let folder = self
            .conn
            .query_row(
                "SELECT id, title FROM folders WHERE title = ? ORDER BY rowid LIMIT 1",
                [title],
                folder_from_row,
            )
            .optional()?;
        Ok(folder)
    }

    fn all_notes(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, parent_id, title, body FROM notes ORDER BY rowid")?;
        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn folder_note_by_field(
        &self,
        folder_id: &str,
        field: NoteField,
        value: &str,
    ) -> StoreResult<Option<Note>> {
        // Column names come from NoteField, never from caller text
        let sql = format!(
            "SELECT id, parent_id, title, body FROM notes
             WHERE parent_id = ?1 AND {} = ?2 ORDER BY rowid LIMIT 1",
            field.column()
        );
        let note = self
            .conn
            .query_row(&sql, [folder_id, value], note_from_row)
            .optional()?;
        Ok(note)
    }
}
