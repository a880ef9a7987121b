//! Store error taxonomy.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Store operations never retry; callers decide what to do with a failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A lookup by id, slug or revision found nothing visible.
    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    /// A written page already holds this slug.
    #[error("page already exists: {slug}")]
    AlreadyExists { slug: String },

    /// Input exceeds a limit or is malformed. Nothing is truncated.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// A database error, surfaced as-is.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error while preparing the database location.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn not_found(what: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            what,
            key: key.to_string(),
        }
    }

    /// Returns true for lookup misses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
