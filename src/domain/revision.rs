//! Revisions, comments and search hits.

use crate::domain::{CommentId, PageId, RevisionId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One immutable, fully materialized snapshot of a page's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Revision {
    pub(crate) id: RevisionId,
    pub(crate) page_id: PageId,
    pub(crate) content: String,
    pub(crate) author: UserId,
    pub(crate) created_at: DateTime<Utc>,
}

impl Revision {
    pub fn id(&self) -> RevisionId {
        self.id
    }

    /// Returns the page that owns this revision.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Returns the full markup text of this revision.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A discussion comment attached to a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub(crate) id: CommentId,
    pub(crate) page_id: PageId,
    pub(crate) author: UserId,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// A ranked full-text search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub slug: String,
    pub title: String,
    /// Content excerpt, HTML-escaped, with matches wrapped in `<mark>`.
    pub snippet: String,
}
