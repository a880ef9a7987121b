//! Page records and their lifecycle state.

use crate::domain::{PageId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which of the three lifecycle states a page is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageState {
    /// Cited by another page but never written. Has no revisions.
    Phantom,
    /// Written, visible, and present in the search index.
    Real,
    /// A real page hidden by soft-delete. Revisions are kept.
    Deleted,
}

/// An encyclopedia entry, real or phantom.
///
/// The slug never changes after creation. Provenance fields are only
/// populated when the page starts life as a phantom and survive its
/// conversion to a real page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub(crate) id: PageId,
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) is_phantom: bool,
    pub(crate) first_cited_by: Option<UserId>,
    pub(crate) first_cited_in: Option<PageId>,
    pub(crate) deleted_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Page {
    /// Returns the page's row id.
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Returns the canonical slug.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns true if the page has never been written.
    pub fn is_phantom(&self) -> bool {
        self.is_phantom
    }

    /// Returns true if the page is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns the author who first cited this page while it was a phantom.
    pub fn first_cited_by(&self) -> Option<UserId> {
        self.first_cited_by
    }

    /// Returns the page whose content first cited this page.
    pub fn first_cited_in(&self) -> Option<PageId> {
        self.first_cited_in
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> PageState {
        if self.is_phantom {
            PageState::Phantom
        } else if self.deleted_at.is_some() {
            PageState::Deleted
        } else {
            PageState::Real
        }
    }
}

/// A phantom page together with the page that first cited it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhantomWithSource {
    pub page: Page,
    /// Slug of the citing page, if it still exists.
    pub source_slug: Option<String>,
    /// Title of the citing page, if it still exists.
    pub source_title: Option<String>,
}

/// Counts of live real pages and live phantoms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageStats {
    pub pages: u64,
    pub phantoms: u64,
}
