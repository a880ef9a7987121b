//! Input limits enforced before anything is written.

use crate::infra::is_canonical_slug;
use crate::store::{StoreError, StoreResult};

/// Maximum title length in bytes.
pub const MAX_TITLE_BYTES: usize = 500;

/// Maximum page content length in bytes.
pub const MAX_CONTENT_BYTES: usize = 500 * 1024;

/// Maximum comment length in bytes.
pub const MAX_COMMENT_BYTES: usize = 10 * 1024;

pub(crate) fn slug(slug: &str) -> StoreResult<()> {
    if is_canonical_slug(slug) {
        Ok(())
    } else {
        Err(StoreError::ValidationFailed(format!(
            "'{slug}' is not a canonical slug"
        )))
    }
}

pub(crate) fn title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::ValidationFailed("title is required".into()));
    }
    if title.len() > MAX_TITLE_BYTES {
        return Err(StoreError::ValidationFailed(format!(
            "title is too long ({} bytes, max {MAX_TITLE_BYTES})",
            title.len()
        )));
    }
    Ok(())
}

pub(crate) fn content(content: &str) -> StoreResult<()> {
    if content.len() > MAX_CONTENT_BYTES {
        return Err(StoreError::ValidationFailed(format!(
            "content is too long ({} bytes, max {MAX_CONTENT_BYTES})",
            content.len()
        )));
    }
    Ok(())
}

pub(crate) fn comment(content: &str) -> StoreResult<()> {
    if content.trim().is_empty() {
        return Err(StoreError::ValidationFailed("comment cannot be empty".into()));
    }
    if content.len() > MAX_COMMENT_BYTES {
        return Err(StoreError::ValidationFailed(format!(
            "comment is too long ({} bytes, max {MAX_COMMENT_BYTES})",
            content.len()
        )));
    }
    Ok(())
}
