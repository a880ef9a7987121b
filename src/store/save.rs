//! The page-save flow: write the page, then resolve its links.

use crate::domain::{Page, UserId};
use crate::store::{PageRepository, PhantomReport, StoreResult, resolve_phantoms};
use serde::Serialize;

/// Result of [`save_page`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveOutcome {
    pub page: Page,
    /// True when the save created the page or wrote a phantom for the first
    /// time.
    pub created: bool,
    pub phantoms: PhantomReport,
}

/// Saves `content` under `slug`.
///
/// A live real page gets a new revision; anything else goes through
/// [`PageRepository::create_page`], which converts phantoms and refuses a
/// slug held by a soft-deleted page. Phantom resolution runs after the
/// write commits and cannot fail the save.
pub fn save_page<R>(
    repo: &mut R,
    slug: &str,
    title: &str,
    content: &str,
    author: UserId,
) -> StoreResult<SaveOutcome>
where
    R: PageRepository + ?Sized,
{
    let existing = repo
        .page_by_slug(slug, Default::default())?
        .filter(|page| !page.is_phantom());

    let (page, created) = match existing {
        Some(page) => (repo.update_page(page.id(), title, content, author)?, false),
        None => (repo.create_page(slug, title, content, author)?, true),
    };

    let phantoms = resolve_phantoms(repo, content, author, page.id());
    Ok(SaveOutcome {
        page,
        created,
        phantoms,
    })
}
