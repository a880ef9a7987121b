//! CommentRepository trait implementation for SqliteStore.

use super::{COMMENT_COLUMNS, SqliteStore, comment_from_row, now};
use crate::domain::{Comment, CommentId, PageId, UserId};
use crate::store::{CommentRepository, StoreError, StoreResult, validate};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

fn fetch_comment(conn: &Connection, id: CommentId) -> StoreResult<Comment> {
    conn.query_row(
        &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"),
        [id],
        comment_from_row,
    )
    .optional()?
    .ok_or_else(|| StoreError::not_found("comment", id))
}

impl CommentRepository for SqliteStore {
    fn add_comment(
        &mut self,
        page: PageId,
        author: UserId,
        content: &str,
    ) -> StoreResult<Comment> {
        validate::comment(content)?;

        let now = now();
        let tx = self.transaction()?;

        let live = tx
            .conn()
            .query_row(
                "SELECT 1 FROM pages WHERE id = ? AND is_phantom = 0 AND deleted_at IS NULL",
                [page],
                |_| Ok(()),
            )
            .optional()?;
        if live.is_none() {
            return Err(StoreError::not_found("page", page));
        }

        tx.execute(
            "INSERT INTO comments (page_id, author_id, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![page, author, content, now],
        )?;
        let comment = fetch_comment(tx.conn(), CommentId::new(tx.last_insert_rowid()))?;
        tx.commit()?;
        debug!(id = %comment.id(), %page, "comment added");
        Ok(comment)
    }

    fn list_comments(&self, page: PageId) -> StoreResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE page_id = ?
             ORDER BY created_at, id"
        ))?;
        let comments = stmt
            .query_map([page], comment_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    fn update_comment(&mut self, id: CommentId, content: &str) -> StoreResult<Comment> {
        validate::comment(content)?;

        let changed = self.conn.execute(
            "UPDATE comments SET content = ?1, updated_at = ?2 WHERE id = ?3",
            params![content, now(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found("comment", id));
        }
        debug!(%id, "comment updated");
        fetch_comment(&self.conn, id)
    }

    fn delete_comment(&mut self, id: CommentId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?", [id])?;
        if changed == 0 {
            return Err(StoreError::not_found("comment", id));
        }
        debug!(%id, "comment deleted");
        Ok(())
    }

    fn comment_count(&self, page: PageId) -> StoreResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM comments WHERE page_id = ?",
            [page],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
