//! PageRepository and CommentRepository traits.

use crate::domain::{
    Comment, CommentId, Page, PageId, PageStats, PhantomWithSource, Revision, RevisionId,
    SearchHit, UserId,
};
use crate::markup::PageStatus;
use crate::store::{StoreError, StoreResult};

/// Whether a read may return soft-deleted pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Real and phantom pages that are not soft-deleted.
    #[default]
    Live,
    /// Every row, including soft-deleted pages.
    IncludeDeleted,
}

impl Visibility {
    pub(crate) fn includes_deleted(self) -> bool {
        matches!(self, Visibility::IncludeDeleted)
    }
}

/// Transactional persistence of pages, revisions and phantom metadata.
///
/// Every mutation runs in one transaction covering the page row, the
/// revision insert and the search entry. The search entry for a page exists
/// exactly while the page is real and not soft-deleted.
pub trait PageRepository {
    // ===========================================
    // Mutations
    // ===========================================

    /// Writes a new page, or converts the phantom holding `slug` into a
    /// real page, keeping its id and provenance.
    ///
    /// Fails with `AlreadyExists` when a real page (deleted or not) holds
    /// the slug.
    fn create_page(
        &mut self,
        slug: &str,
        title: &str,
        content: &str,
        author: UserId,
    ) -> StoreResult<Page>;

    /// Appends a revision to a live real page and refreshes its title.
    fn update_page(
        &mut self,
        id: PageId,
        title: &str,
        content: &str,
        author: UserId,
    ) -> StoreResult<Page>;

    /// Creates a phantom page. If any page already holds `slug`, returns it
    /// unchanged.
    fn create_phantom(
        &mut self,
        slug: &str,
        title: &str,
        cited_by: UserId,
        cited_in: PageId,
    ) -> StoreResult<Page>;

    /// Hides a live real page and drops its search entry.
    fn soft_delete(&mut self, id: PageId) -> StoreResult<()>;

    /// Unhides a soft-deleted page, rebuilding its search entry from the
    /// latest revision.
    fn restore(&mut self, id: PageId) -> StoreResult<()>;

    // ===========================================
    // Page Lookups
    // ===========================================

    fn page_by_slug(&self, slug: &str, visibility: Visibility) -> StoreResult<Option<Page>>;

    fn page_by_id(&self, id: PageId, visibility: Visibility) -> StoreResult<Option<Page>>;

    /// Returns the live page with `slug`, or `NotFound`.
    fn get_page_by_slug(&self, slug: &str) -> StoreResult<Page> {
        self.page_by_slug(slug, Visibility::Live)?
            .ok_or_else(|| StoreError::not_found("page", slug))
    }

    /// Returns the live page with `id`, or `NotFound`.
    fn get_page_by_id(&self, id: PageId) -> StoreResult<Page> {
        self.page_by_id(id, Visibility::Live)?
            .ok_or_else(|| StoreError::not_found("page", id))
    }

    /// Reports what a link to `slug` should point at.
    fn status(&self, slug: &str) -> StoreResult<PageStatus>;

    // ===========================================
    // Revisions
    // ===========================================

    /// Returns the latest revision (by creation time, then id).
    fn current_revision(&self, page: PageId) -> StoreResult<Revision>;

    fn get_revision(&self, id: RevisionId) -> StoreResult<Revision>;

    /// Lists revisions newest first.
    fn list_revisions(&self, page: PageId) -> StoreResult<Vec<Revision>>;

    fn revision_count(&self, page: PageId) -> StoreResult<u64>;

    // ===========================================
    // Listings
    // ===========================================

    /// Live real pages ordered by title.
    fn list_pages(&self) -> StoreResult<Vec<Page>>;

    /// Phantom pages ordered by title, with the page that first cited each.
    fn list_phantoms(&self) -> StoreResult<Vec<PhantomWithSource>>;

    /// Live real pages, most recently updated first.
    fn list_recent(&self, limit: usize) -> StoreResult<Vec<Page>>;

    /// Soft-deleted pages, most recently deleted first.
    fn list_deleted(&self) -> StoreResult<Vec<Page>>;

    fn page_stats(&self) -> StoreResult<PageStats>;

    // ===========================================
    // Search
    // ===========================================

    /// Full-text search over live real pages, best match first.
    ///
    /// A query with nothing searchable returns an empty list.
    fn search(&self, query: &str, limit: usize) -> StoreResult<Vec<SearchHit>>;
}

/// Page discussion threads. Comments are not searchable.
pub trait CommentRepository {
    /// Adds a comment to a live real page.
    fn add_comment(&mut self, page: PageId, author: UserId, content: &str)
    -> StoreResult<Comment>;

    /// Lists a page's comments oldest first.
    fn list_comments(&self, page: PageId) -> StoreResult<Vec<Comment>>;

    fn update_comment(&mut self, id: CommentId, content: &str) -> StoreResult<Comment>;

    fn delete_comment(&mut self, id: CommentId) -> StoreResult<()>;

    fn comment_count(&self, page: PageId) -> StoreResult<u64>;
}
