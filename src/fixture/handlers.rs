//! Command handlers for the fixture CLI.

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Parser;
use rusqlite::{Connection, OptionalExtension};
use std::collections::BTreeSet;
use ulid::Ulid;

/// `deleted_items.item_type` for notes.
const ITEM_TYPE_NOTE: i64 = 1;
/// `deleted_items.item_type` for folders.
const ITEM_TYPE_FOLDER: i64 = 2;

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Also remove matching notebooks and their notes
    #[arg(short, long)]
    pub recursive: bool,

    /// Do not fail when nothing matches
    #[arg(short, long)]
    pub force: bool,

    /// Title pattern (`*` and `?` wildcards)
    pub pattern: String,
}

/// Arguments for the `cat` command
#[derive(Parser, Debug)]
pub struct CatArgs {
    /// Include the note's metadata
    #[arg(short, long)]
    pub verbose: bool,

    /// Note title
    pub title: String,
}

fn new_id() -> String {
    Ulid::new().to_string().to_lowercase()
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn version(env: &str) -> String {
    format!("notes-fixture {} ({env})", env!("CARGO_PKG_VERSION"))
}

/// Creates a notebook unless one with the same title already exists.
pub fn mkbook(conn: &Connection, title: &str) -> Result<String> {
    let existing: Option<String> = conn
        .query_row("SELECT id FROM folders WHERE title = ?", [title], |row| {
            row.get(0)
        })
        .optional()?;
    if existing.is_some() {
        return Ok(String::new());
    }

    let now = now_ms();
    conn.execute(
        "INSERT INTO folders (id, title, created_time, updated_time) VALUES (?1, ?2, ?3, ?3)",
        rusqlite::params![new_id(), title, now],
    )?;
    Ok(String::new())
}

/// Creates an empty note in the most recently created notebook.
pub fn mknote(conn: &Connection, title: &str) -> Result<String> {
    let parent: Option<String> = conn
        .query_row(
            "SELECT id FROM folders ORDER BY created_time DESC, rowid DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let Some(parent_id) = parent else {
        bail!("no notebook selected; create one with mkbook");
    };

    let now = now_ms();
    conn.execute(
        "INSERT INTO notes (id, parent_id, title, body, created_time, updated_time)
         VALUES (?1, ?2, ?3, '', ?4, ?4)",
        rusqlite::params![new_id(), parent_id, title, now],
    )?;
    Ok(String::new())
}

fn ids_matching(conn: &Connection, sql: &str, value: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map([value], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(ids)
}

/// Removes items whose title matches the pattern, recording deletion markers.
pub fn rm(conn: &mut Connection, args: &RmArgs) -> Result<String> {
    let tx = conn.transaction()?;

    let mut note_ids: BTreeSet<String> =
        ids_matching(&tx, "SELECT id FROM notes WHERE title GLOB ?", &args.pattern)?
            .into_iter()
            .collect();
    let mut folder_ids = Vec::new();
    if args.recursive {
        folder_ids = ids_matching(&tx, "SELECT id FROM folders WHERE title GLOB ?", &args.pattern)?;
        for folder_id in &folder_ids {
            note_ids.extend(ids_matching(
                &tx,
                "SELECT id FROM notes WHERE parent_id = ?",
                folder_id,
            )?);
        }
    }

    if note_ids.is_empty() && folder_ids.is_empty() {
        if args.force {
            return Ok(String::new());
        }
        bail!("no item matches pattern: {}", args.pattern);
    }

    let now = now_ms();
    for id in &note_ids {
        tx.execute("DELETE FROM notes WHERE id = ?", [id])?;
        tx.execute("DELETE FROM note_tags WHERE note_id = ?", [id])?;
        tx.execute(
            "INSERT INTO deleted_items (item_type, item_id, deleted_time) VALUES (?1, ?2, ?3)",
            rusqlite::params![ITEM_TYPE_NOTE, id, now],
        )?;
    }
    for id in &folder_ids {
        tx.execute("DELETE FROM folders WHERE id = ?", [id])?;
        tx.execute(
            "INSERT INTO deleted_items (item_type, item_id, deleted_time) VALUES (?1, ?2, ?3)",
            rusqlite::params![ITEM_TYPE_FOLDER, id, now],
        )?;
    }
    tx.commit()?;
    Ok(String::new())
}

/// Prints a note's title and body; `-v` adds its identifiers.
pub fn cat(conn: &Connection, args: &CatArgs) -> Result<String> {
    let note: Option<(String, String, String)> = conn
        .query_row(
            "SELECT id, parent_id, body FROM notes WHERE title = ? ORDER BY rowid LIMIT 1",
            [&args.title],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;
    let Some((id, parent_id, body)) = note else {
        bail!("no note titled: {}", args.title);
    };

    let mut out = format!("{}\n\n{}", args.title, body);
    if args.verbose {
        out.push_str(&format!("\n\nid: {id}\nparent_id: {parent_id}"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::schema::create_schema;

    fn store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    fn rm_args(pattern: &str, recursive: bool, force: bool) -> RmArgs {
        RmArgs {
            recursive,
            force,
            pattern: pattern.to_string(),
        }
    }

    #[test]
    fn mkbook_is_create_if_absent() {
        let conn = store();
        mkbook(&conn, "nb1").unwrap();
        mkbook(&conn, "nb1").unwrap();
        mkbook(&conn, "nb2").unwrap();
        assert_eq!(count(&conn, "folders"), 2);
    }

    #[test]
    fn mknote_requires_a_notebook() {
        let conn = store();
        let err = mknote(&conn, "n1").unwrap_err();
        assert!(err.to_string().contains("no notebook"));
    }

    #[test]
    fn mknote_uses_latest_notebook() {
        let conn = store();
        mkbook(&conn, "nb1").unwrap();
        mkbook(&conn, "nb2").unwrap();
        mknote(&conn, "n1").unwrap();

        let parent_title: String = conn
            .query_row(
                "SELECT folders.title FROM notes JOIN folders ON folders.id = notes.parent_id",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(parent_title, "nb2");
    }

    #[test]
    fn rm_glob_removes_matching_notes_only() {
        let mut conn = store();
        mkbook(&conn, "nb1").unwrap();
        mknote(&conn, "n1").unwrap();
        mknote(&conn, "n2").unwrap();
        mknote(&conn, "other").unwrap();

        rm(&mut conn, &rm_args("n*", false, true)).unwrap();

        assert_eq!(count(&conn, "notes"), 1);
        assert_eq!(count(&conn, "folders"), 1);
        assert_eq!(count(&conn, "deleted_items"), 2);
    }

    #[test]
    fn rm_without_match_fails_unless_forced() {
        let mut conn = store();
        assert!(rm(&mut conn, &rm_args("blabla*", false, false)).is_err());
        assert!(rm(&mut conn, &rm_args("blabla*", false, true)).is_ok());
    }

    #[test]
    fn rm_recursive_removes_notebook_and_its_notes() {
        let mut conn = store();
        mkbook(&conn, "nb1").unwrap();
        mknote(&conn, "n1").unwrap();

        rm(&mut conn, &rm_args("nb1", true, true)).unwrap();

        assert_eq!(count(&conn, "folders"), 0);
        assert_eq!(count(&conn, "notes"), 0);
    }

    #[test]
    fn rm_without_recursive_keeps_notebooks() {
        let mut conn = store();
        mkbook(&conn, "nb1").unwrap();

        assert!(rm(&mut conn, &rm_args("nb1", false, false)).is_err());
        assert_eq!(count(&conn, "folders"), 1);
    }

    #[test]
    fn cat_hides_id_unless_verbose() {
        let conn = store();
        mkbook(&conn, "nb1").unwrap();
        mknote(&conn, "mynote").unwrap();
        let id: String = conn
            .query_row("SELECT id FROM notes", [], |row| row.get(0))
            .unwrap();

        let plain = cat(
            &conn,
            &CatArgs {
                verbose: false,
                title: "mynote".to_string(),
            },
        )
        .unwrap();
        assert!(plain.contains("mynote"));
        assert!(!plain.contains(&id));

        let verbose = cat(
            &conn,
            &CatArgs {
                verbose: true,
                title: "mynote".to_string(),
            },
        )
        .unwrap();
        assert!(verbose.contains(&id));
    }

    #[test]
    fn cat_unknown_note_fails() {
        let conn = store();
        let err = cat(
            &conn,
            &CatArgs {
                verbose: false,
                title: "missing".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
