//! Command handlers for the CLI.

mod comments;
mod links;
mod listing;
mod pages;
mod search;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::domain::Page;
use crate::infra::slugify;
use crate::store::{PageRepository, SqliteStore};

// Re-export public items
pub use comments::{handle_comment, handle_comments};
pub use links::{handle_links, handle_slug};
pub use listing::{handle_deleted, handle_list, handle_phantoms, handle_recent, handle_stats};
pub use pages::{
    handle_delete, handle_history, handle_restore, handle_revision, handle_save, handle_show,
};
pub use search::handle_search;

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the store, creating the database on first use.
pub(crate) fn open_store(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))
}

/// Looks up a live page by slug, normalizing the argument first.
pub(crate) fn find_page(store: &SqliteStore, slug: &str) -> Result<Page> {
    Ok(store.get_page_by_slug(&slugify(slug))?)
}

/// Reads a file, or all of stdin when no file is given.
pub(crate) fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Returns the first non-empty line of `content`.
pub(crate) fn first_line(content: &str) -> &str {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}
