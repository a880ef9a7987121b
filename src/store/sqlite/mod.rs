//! SQLite-backed page store implementation.

mod comments;
mod connection;
mod fts;
mod oracle;
mod repo_impl;
mod transaction;


use crate::domain::{Comment, CommentId, Page, PageId, Revision, RevisionId, UserId};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row};

pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed page store.
///
/// Holds no cached page state; every read goes to the database. Open one
/// store per thread when sharing a database file.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

// ===========================================
// Id Conversions
// ===========================================

macro_rules! sql_id {
    ($($name:ident),*) => {$(
        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.get()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map($name::new)
            }
        }
    )*};
}

sql_id!(PageId, RevisionId, UserId, CommentId);

// ===========================================
// Timestamps
// ===========================================

/// Formats a timestamp for storage. Fixed-width UTC text sorts
/// chronologically.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn now() -> String {
    timestamp(Utc::now())
}

fn parse_timestamp(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    parse_timestamp(idx, &row.get::<_, String>(idx)?)
}

fn optional_timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    row.get::<_, Option<String>>(idx)?
        .map(|text| parse_timestamp(idx, &text))
        .transpose()
}

// ===========================================
// Row Mapping
// ===========================================

/// Column list matching [`page_from_row`].
pub(crate) const PAGE_COLUMNS: &str = "p.id, p.slug, p.title, p.is_phantom, \
     p.first_cited_by_user_id, p.first_cited_in_page_id, p.deleted_at, p.created_at, p.updated_at";

pub(crate) fn page_from_row(row: &Row<'_>) -> rusqlite::Result<Page> {
    Ok(Page {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        is_phantom: row.get(3)?,
        first_cited_by: row.get(4)?,
        first_cited_in: row.get(5)?,
        deleted_at: optional_timestamp_at(row, 6)?,
        created_at: timestamp_at(row, 7)?,
        updated_at: timestamp_at(row, 8)?,
    })
}

/// Column list matching [`revision_from_row`].
pub(crate) const REVISION_COLUMNS: &str = "id, page_id, content, author_id, created_at";

pub(crate) fn revision_from_row(row: &Row<'_>) -> rusqlite::Result<Revision> {
    Ok(Revision {
        id: row.get(0)?,
        page_id: row.get(1)?,
        content: row.get(2)?,
        author: row.get(3)?,
        created_at: timestamp_at(row, 4)?,
    })
}

/// Column list matching [`comment_from_row`].
pub(crate) const COMMENT_COLUMNS: &str = "id, page_id, author_id, content, created_at, updated_at";

pub(crate) fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        page_id: row.get(1)?,
        author: row.get(2)?,
        content: row.get(3)?,
        created_at: timestamp_at(row, 4)?,
        updated_at: timestamp_at(row, 5)?,
    })
}

/// Loads a page by id regardless of visibility.
pub(crate) fn fetch_page(conn: &Connection, id: PageId) -> rusqlite::Result<Option<Page>> {
    conn.query_row(
        &format!("SELECT {PAGE_COLUMNS} FROM pages p WHERE p.id = ?"),
        [id],
        page_from_row,
    )
    .optional()
}

/// Loads the newest revision of a page.
pub(crate) fn fetch_current_revision(
    conn: &Connection,
    page: PageId,
) -> rusqlite::Result<Option<Revision>> {
    conn.query_row(
        &format!(
            "SELECT {REVISION_COLUMNS} FROM revisions WHERE page_id = ?
             ORDER BY created_at DESC, id DESC LIMIT 1"
        ),
        [page],
        revision_from_row,
    )
    .optional()
}
