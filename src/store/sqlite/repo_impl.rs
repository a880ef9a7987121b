//! PageRepository trait implementation for SqliteStore.

use super::transaction::Transaction;
use super::{
    PAGE_COLUMNS, REVISION_COLUMNS, SqliteStore, fetch_current_revision, fetch_page, fts, now,
    page_from_row, revision_from_row,
};
use crate::domain::{
    Page, PageId, PageStats, PhantomWithSource, Revision, RevisionId, SearchHit, UserId,
};
use crate::markup::PageStatus;
use crate::store::search::{MATCH_END, MATCH_START, highlight_snippet};
use crate::store::{
    PageRepository, StoreError, StoreResult, Visibility, sanitize_query, validate,
};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info};

/// Extra filter applied to page reads for a visibility level.
fn visibility_clause(visibility: Visibility) -> &'static str {
    if visibility.includes_deleted() {
        ""
    } else {
        " AND p.deleted_at IS NULL"
    }
}

fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn insert_revision(
    tx: &Transaction<'_>,
    page: PageId,
    content: &str,
    author: UserId,
    created_at: &str,
) -> StoreResult<()> {
    tx.execute(
        "INSERT INTO revisions (page_id, content, author_id, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![page, content, author, created_at],
    )?;
    Ok(())
}

/// Reads back a page written earlier in the same transaction.
fn written_page(tx: &Transaction<'_>, id: PageId) -> StoreResult<Page> {
    fetch_page(tx.conn(), id)?.ok_or_else(|| StoreError::not_found("page", id))
}

impl SqliteStore {
    fn pages_where(&self, filter: &str, params: impl rusqlite::Params) -> StoreResult<Vec<Page>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PAGE_COLUMNS} FROM pages p WHERE {filter}"))?;
        let pages = stmt
            .query_map(params, page_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pages)
    }
}

impl PageRepository for SqliteStore {
    fn create_page(
        &mut self,
        slug: &str,
        title: &str,
        content: &str,
        author: UserId,
    ) -> StoreResult<Page> {
        validate::slug(slug)?;
        validate::title(title)?;
        validate::content(content)?;

        let now = now();
        let tx = self.transaction()?;

        let existing: Option<(PageId, bool)> = tx
            .conn()
            .query_row(
                "SELECT id, is_phantom FROM pages WHERE slug = ?",
                [slug],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let id = match existing {
            Some((_, false)) => {
                return Err(StoreError::AlreadyExists {
                    slug: slug.to_string(),
                });
            }
            Some((id, true)) => {
                tx.execute(
                    "UPDATE pages SET title = ?1, is_phantom = 0, updated_at = ?2 WHERE id = ?3",
                    params![title, now, id],
                )?;
                debug!(%id, slug, "phantom page written");
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO pages (slug, title, is_phantom, created_at, updated_at)
                     VALUES (?1, ?2, 0, ?3, ?3)",
                    params![slug, title, now],
                )?;
                let id = PageId::new(tx.last_insert_rowid());
                debug!(%id, slug, "page created");
                id
            }
        };

        insert_revision(&tx, id, content, author, &now)?;
        fts::upsert_entry(tx.conn(), id, title, content)?;
        let page = written_page(&tx, id)?;
        tx.commit()?;
        Ok(page)
    }

    fn update_page(
        &mut self,
        id: PageId,
        title: &str,
        content: &str,
        author: UserId,
    ) -> StoreResult<Page> {
        validate::title(title)?;
        validate::content(content)?;

        let now = now();
        let tx = self.transaction()?;

        let changed = tx.execute(
            "UPDATE pages SET title = ?1, updated_at = ?2
             WHERE id = ?3 AND is_phantom = 0 AND deleted_at IS NULL",
            params![title, now, id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("page", id));
        }

        insert_revision(&tx, id, content, author, &now)?;
        fts::upsert_entry(tx.conn(), id, title, content)?;
        let page = written_page(&tx, id)?;
        tx.commit()?;
        debug!(%id, slug = page.slug(), "page updated");
        Ok(page)
    }

    fn create_phantom(
        &mut self,
        slug: &str,
        title: &str,
        cited_by: UserId,
        cited_in: PageId,
    ) -> StoreResult<Page> {
        validate::slug(slug)?;
        validate::title(title)?;

        let now = now();
        let tx = self.transaction()?;

        let inserted = tx.execute(
            "INSERT INTO pages (slug, title, is_phantom, first_cited_by_user_id,
                                first_cited_in_page_id, created_at, updated_at)
             VALUES (?1, ?2, 1, ?3, ?4, ?5, ?5)
             ON CONFLICT(slug) DO NOTHING",
            params![slug, title, cited_by, cited_in, now],
        )?;

        let page = tx
            .conn()
            .query_row(
                &format!("SELECT {PAGE_COLUMNS} FROM pages p WHERE p.slug = ?"),
                [slug],
                page_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("page", slug))?;
        tx.commit()?;

        if inserted > 0 {
            info!(id = %page.id(), slug, %cited_in, "phantom page created");
        }
        Ok(page)
    }

    fn soft_delete(&mut self, id: PageId) -> StoreResult<()> {
        let now = now();
        let tx = self.transaction()?;

        let changed = tx.execute(
            "UPDATE pages SET deleted_at = ?1, updated_at = ?1
             WHERE id = ?2 AND is_phantom = 0 AND deleted_at IS NULL",
            params![now, id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("page", id));
        }

        fts::remove_entry(tx.conn(), id)?;
        tx.commit()?;
        debug!(%id, "page soft-deleted");
        Ok(())
    }

    fn restore(&mut self, id: PageId) -> StoreResult<()> {
        let now = now();
        let tx = self.transaction()?;

        let title: String = tx
            .conn()
            .query_row(
                "SELECT title FROM pages WHERE id = ? AND deleted_at IS NOT NULL",
                [id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("deleted page", id))?;
        let revision = fetch_current_revision(tx.conn(), id)?
            .ok_or_else(|| StoreError::not_found("revision for page", id))?;

        tx.execute(
            "UPDATE pages SET deleted_at = NULL, updated_at = ?1 WHERE id = ?2",
            params![now, id],
        )?;
        fts::upsert_entry(tx.conn(), id, &title, revision.content())?;
        tx.commit()?;
        debug!(%id, "page restored");
        Ok(())
    }

    fn page_by_slug(&self, slug: &str, visibility: Visibility) -> StoreResult<Option<Page>> {
        let page = self
            .conn
            .query_row(
                &format!(
                    "SELECT {PAGE_COLUMNS} FROM pages p WHERE p.slug = ?{}",
                    visibility_clause(visibility)
                ),
                [slug],
                page_from_row,
            )
            .optional()?;
        Ok(page)
    }

    fn page_by_id(&self, id: PageId, visibility: Visibility) -> StoreResult<Option<Page>> {
        let page = self
            .conn
            .query_row(
                &format!(
                    "SELECT {PAGE_COLUMNS} FROM pages p WHERE p.id = ?{}",
                    visibility_clause(visibility)
                ),
                [id],
                page_from_row,
            )
            .optional()?;
        Ok(page)
    }

    fn status(&self, slug: &str) -> StoreResult<PageStatus> {
        let is_phantom: Option<bool> = self
            .conn
            .query_row(
                "SELECT is_phantom FROM pages WHERE slug = ? AND deleted_at IS NULL",
                [slug],
                |row| row.get(0),
            )
            .optional()?;

        Ok(match is_phantom {
            None => PageStatus::Absent,
            Some(true) => PageStatus::Phantom,
            Some(false) => PageStatus::Real,
        })
    }

    fn current_revision(&self, page: PageId) -> StoreResult<Revision> {
        fetch_current_revision(&self.conn, page)?
            .ok_or_else(|| StoreError::not_found("revision for page", page))
    }

    fn get_revision(&self, id: RevisionId) -> StoreResult<Revision> {
        self.conn
            .query_row(
                &format!("SELECT {REVISION_COLUMNS} FROM revisions WHERE id = ?"),
                [id],
                revision_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("revision", id))
    }

    fn list_revisions(&self, page: PageId) -> StoreResult<Vec<Revision>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REVISION_COLUMNS} FROM revisions WHERE page_id = ?
             ORDER BY created_at DESC, id DESC"
        ))?;
        let revisions = stmt
            .query_map([page], revision_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(revisions)
    }

    fn revision_count(&self, page: PageId) -> StoreResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM revisions WHERE page_id = ?",
            [page],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn list_pages(&self) -> StoreResult<Vec<Page>> {
        self.pages_where(
            "p.is_phantom = 0 AND p.deleted_at IS NULL
             ORDER BY p.title COLLATE NOCASE, p.id",
            [],
        )
    }

    fn list_phantoms(&self) -> StoreResult<Vec<PhantomWithSource>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PAGE_COLUMNS}, src.slug, src.title
             FROM pages p
             LEFT JOIN pages src ON src.id = p.first_cited_in_page_id
             WHERE p.is_phantom = 1 AND p.deleted_at IS NULL
             ORDER BY p.title COLLATE NOCASE, p.id"
        ))?;
        let phantoms = stmt
            .query_map([], |row| {
                Ok(PhantomWithSource {
                    page: page_from_row(row)?,
                    source_slug: row.get(9)?,
                    source_title: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(phantoms)
    }

    fn list_recent(&self, limit: usize) -> StoreResult<Vec<Page>> {
        self.pages_where(
            "p.is_phantom = 0 AND p.deleted_at IS NULL
             ORDER BY p.updated_at DESC, p.id DESC LIMIT ?",
            [limit_param(limit)],
        )
    }

    fn list_deleted(&self) -> StoreResult<Vec<Page>> {
        self.pages_where(
            "p.deleted_at IS NOT NULL ORDER BY p.deleted_at DESC, p.id DESC",
            [],
        )
    }

    fn page_stats(&self) -> StoreResult<PageStats> {
        let (pages, phantoms): (i64, i64) = self.conn.query_row(
            "SELECT COALESCE(SUM(is_phantom = 0), 0), COALESCE(SUM(is_phantom = 1), 0)
             FROM pages WHERE deleted_at IS NULL",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(PageStats {
            pages: pages as u64,
            phantoms: phantoms as u64,
        })
    }

    fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<SearchHit>> {
        let Some(expression) = sanitize_query(query) else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn.prepare(
            "SELECT p.slug, p.title, snippet(pages_fts, -1, ?2, ?3, '...', 24)
             FROM pages_fts
             JOIN pages p ON p.id = pages_fts.rowid
             WHERE pages_fts MATCH ?1 AND p.is_phantom = 0 AND p.deleted_at IS NULL
             ORDER BY pages_fts.rank
             LIMIT ?4",
        )?;
        let hits = stmt
            .query_map(
                params![expression, MATCH_START, MATCH_END, limit_param(limit)],
                |row| {
                    Ok(SearchHit {
                        slug: row.get(0)?,
                        title: row.get(1)?,
                        snippet: highlight_snippet(&row.get::<_, String>(2)?),
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(query, %expression, hits = hits.len(), "search");
        Ok(hits)
    }
}
