//! Page existence lookups for the renderer.

use super::SqliteStore;
use crate::markup::{ExistenceOracle, PageStatus};
use crate::store::PageRepository;
use tracing::warn;

impl ExistenceOracle for SqliteStore {
    /// Reads the current state of `slug` on every call. A storage error
    /// renders the link as missing instead of failing the page.
    fn lookup(&self, slug: &str) -> PageStatus {
        match self.status(slug) {
            Ok(status) => status,
            Err(err) => {
                warn!(slug, error = %err, "page lookup failed during render");
                PageStatus::Absent
            }
        }
    }
}
