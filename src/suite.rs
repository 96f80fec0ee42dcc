//! Built-in test units for the notes CLI.

use crate::error::HarnessResult;
use crate::runner::{Registry, TestContext, UnitFuture};
use crate::store::{NoteField, Repository, StoreError};

/// Registry holding the built-in units in execution order.
pub fn default_registry() -> HarnessResult<Registry> {
    let mut registry = Registry::new();
    registry.register("folders", folders)?;
    registry.register("notes", notes)?;
    registry.register("cat", cat)?;
    Ok(registry)
}

/// mkbook is create-if-absent; `rm -r` removes the notebook.
fn folders(ctx: &TestContext) -> UnitFuture<'_> {
    Box::pin(async move {
        ctx.exec("mkbook nb1").await?;

        let folders = ctx.store().all_folders()?;
        ctx.assert_equals(1, folders.len())?;
        ctx.assert_equals("nb1", folders[0].title.as_str())?;

        ctx.exec("mkbook nb1").await?;

        let folders = ctx.store().all_folders()?;
        ctx.assert_equals(1, folders.len())?;
        ctx.assert_equals("nb1", folders[0].title.as_str())?;

        ctx.exec("rm -r -f nb1").await?;

        let folders = ctx.store().all_folders()?;
        ctx.assert_equals(0, folders.len())?;
        Ok(())
    })
}

/// mknote and rm by exact title and by pattern.
fn notes(ctx: &TestContext) -> UnitFuture<'_> {
    Box::pin(async move {
        ctx.exec("mkbook nb1").await?;
        ctx.exec("mknote n1").await?;

        let notes = ctx.store().all_notes()?;
        ctx.assert_equals(1, notes.len())?;
        ctx.assert_equals("n1", notes[0].title.as_str())?;

        ctx.exec("rm -f n1").await?;
        ctx.assert_equals(0, ctx.store().all_notes()?.len())?;

        ctx.exec("mknote n1").await?;
        ctx.exec("mknote n2").await?;
        ctx.assert_equals(2, ctx.store().all_notes()?.len())?;

        ctx.exec("rm -f 'blabla*'").await?;
        ctx.assert_equals(2, ctx.store().all_notes()?.len())?;

        ctx.exec("rm -f 'n*'").await?;
        ctx.assert_equals(0, ctx.store().all_notes()?.len())?;
        ctx.assert_equals(1, ctx.store().all_folders()?.len())?;
        Ok(())
    })
}

/// `cat` shows the title; `cat -v` also shows the note id.
fn cat(ctx: &TestContext) -> UnitFuture<'_> {
    Box::pin(async move {
        ctx.exec("mkbook nb1").await?;
        ctx.exec("mknote mynote").await?;

        let folder = ctx
            .store()
            .folder_by_title("nb1")?
            .ok_or_else(|| StoreError::NotFound {
                kind: "folder",
                key: "nb1".to_string(),
            })?;
        let note = ctx
            .store()
            .folder_note_by_field(&folder.id, NoteField::Title, "mynote")?
            .ok_or_else(|| StoreError::NotFound {
                kind: "note",
                key: "mynote".to_string(),
            })?;

        let out = ctx.exec("cat mynote").await?;
        ctx.assert_true(out.contains("mynote"))?;
        ctx.assert_false(out.contains(&note.id))?;

        let out = ctx.exec("cat -v mynote").await?;
        ctx.assert_true(out.contains(&note.id))?;
        Ok(())
    })
}
