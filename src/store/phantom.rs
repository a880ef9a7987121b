//! Placeholder pages for link targets nobody has written yet.

use crate::domain::{PageId, UserId};
use crate::markup::{extract_links, first_display_text, unique_targets};
use crate::store::{PageRepository, Visibility, validate};
use serde::Serialize;
use tracing::{debug, warn};

/// What happened to each distinct link target of a saved page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhantomReport {
    /// Targets that got a new phantom page.
    pub created: Vec<String>,
    /// Targets that already had a page, real or phantom.
    pub existing: Vec<String>,
    /// Targets that could not be resolved. They stay dangling until a later
    /// save cites them again.
    pub failed: Vec<String>,
}

impl PhantomReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Creates phantom pages for the link targets in `markup` that have no page.
///
/// Runs after the saving transaction has committed. Each target is handled
/// on its own: a failure is logged and recorded in the report, never
/// returned, so the saved revision always stands. Existing pages are left
/// untouched, which keeps the first citation's provenance.
pub fn resolve_phantoms<R>(
    repo: &mut R,
    markup: &str,
    author: UserId,
    source: PageId,
) -> PhantomReport
where
    R: PageRepository + ?Sized,
{
    let links = extract_links(markup);
    let mut report = PhantomReport::default();

    for target in unique_targets(&links) {
        match repo.page_by_slug(target, Visibility::IncludeDeleted) {
            Ok(Some(_)) => {
                report.existing.push(target.to_string());
                continue;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(slug = target, error = %err, "could not look up link target");
                report.failed.push(target.to_string());
                continue;
            }
        }

        // A display text that would not pass as a title falls back to the
        // slug instead of being truncated.
        let title = match first_display_text(&links, target) {
            Some(text) if validate::title(text).is_ok() => text,
            _ => target,
        };

        match repo.create_phantom(target, title, author, source) {
            Ok(_) => report.created.push(target.to_string()),
            Err(err) => {
                warn!(slug = target, error = %err, "could not create phantom page");
                report.failed.push(target.to_string());
            }
        }
    }

    debug!(
        %source,
        created = report.created.len(),
        existing = report.existing.len(),
        failed = report.failed.len(),
        "resolved link targets"
    );
    report
}
