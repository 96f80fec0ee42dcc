//! SQLite schema for the fixture's store.

use rusqlite::Connection;

/// Creates the fixture's tables.
///
/// Idempotent: calling it on an existing store is safe.
///
/// # Tables Created
/// - `folders` - Notebooks
/// - `notes` - Notes, each inside a folder
/// - `tags`, `note_tags` - Tags and their note links
/// - `resources` - Attachments
/// - `deleted_items` - Deletion markers for sync
/// - `settings` - Key/value profile settings
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS folders (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            created_time INTEGER NOT NULL,
            updated_time INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            parent_id TEXT NOT NULL DEFAULT '',
            title TEXT NOT NULL DEFAULT '',
            body TEXT NOT NULL DEFAULT '',
            created_time INTEGER NOT NULL,
            updated_time INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tags (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS note_tags (
            id TEXT PRIMARY KEY,
            note_id TEXT NOT NULL,
            tag_id TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS resources (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            mime TEXT NOT NULL DEFAULT '',
            filename TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS deleted_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_type INTEGER NOT NULL,
            item_id TEXT NOT NULL,
            deleted_time INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_notes_parent_id ON notes(parent_id);
        CREATE INDEX IF NOT EXISTS idx_folders_title ON folders(title);",
    )
}
