//! SQLite schema creation for the page store.

use rusqlite::Connection;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates the database schema for the page store.
///
/// This function is idempotent - calling it multiple times is safe.
///
/// # Tables Created
/// - `pages` - Real and phantom pages, keyed by unique slug
/// - `revisions` - Append-only page content, cascade-deleted with the page
/// - `comments` - Page discussion, cascade-deleted with the page
/// - `pages_fts` - Full-text entries keyed 1:1 by page id
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // ===========================================
    // Pages Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            is_phantom INTEGER NOT NULL DEFAULT 0 CHECK (is_phantom IN (0, 1)),
            first_cited_by_user_id INTEGER,
            first_cited_in_page_id INTEGER REFERENCES pages(id) ON DELETE SET NULL,
            deleted_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Revisions Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS revisions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_id INTEGER NOT NULL REFERENCES pages(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            author_id INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Comments Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_id INTEGER NOT NULL REFERENCES pages(id) ON DELETE CASCADE,
            author_id INTEGER NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )?;

    // ===========================================
    // Indexes
    // ===========================================
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_pages_is_phantom ON pages(is_phantom);
         CREATE INDEX IF NOT EXISTS idx_pages_deleted_at ON pages(deleted_at);
         CREATE INDEX IF NOT EXISTS idx_pages_updated_at ON pages(updated_at);
         CREATE INDEX IF NOT EXISTS idx_revisions_page_id ON revisions(page_id, created_at);
         CREATE INDEX IF NOT EXISTS idx_comments_page_id ON comments(page_id);",
    )?;

    // ===========================================
    // FTS5 Virtual Table
    // ===========================================
    // Rows are written explicitly by the store, never by triggers: an entry
    // exists only while its page is real and not deleted.
    conn.execute_batch(
        "CREATE VIRTUAL TABLE IF NOT EXISTS pages_fts USING fts5(
            title,
            content,
            tokenize = 'porter unicode61'
        );",
    )?;

    // ===========================================
    // Schema Version
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        );",
    )?;
    conn.execute(
        "INSERT INTO schema_version (version)
         SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM schema_version)",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the schema version recorded in the database.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<i32> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
