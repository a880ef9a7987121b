//! Search entry maintenance. Callers run these inside the mutation's
//! transaction.

use crate::domain::PageId;
use rusqlite::Connection;

/// Replaces the search entry for a page.
pub(crate) fn upsert_entry(
    conn: &Connection,
    page: PageId,
    title: &str,
    content: &str,
) -> rusqlite::Result<()> {
    remove_entry(conn, page)?;
    conn.execute(
        "INSERT INTO pages_fts (rowid, title, content) VALUES (?1, ?2, ?3)",
        rusqlite::params![page, title, content],
    )?;
    Ok(())
}

/// Drops the search entry for a page, if any.
pub(crate) fn remove_entry(conn: &Connection, page: PageId) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM pages_fts WHERE rowid = ?", [page])?;
    Ok(())
}
