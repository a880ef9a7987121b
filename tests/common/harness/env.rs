//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::LexiconCommand;
use lexicon::store::SqliteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary database location.
///
/// The temp directory doubles as the config home, so a `config.toml`
/// written with [`TestEnv::write_config`] is picked up by commands.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the environment's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the database used by [`TestEnv::cmd`].
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("lexicon.db")
    }

    /// Opens the environment's database directly.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open test database")
    }

    /// Creates a LexiconCommand configured for this test environment.
    pub fn cmd(&self) -> LexiconCommand {
        self.bare_cmd().db(&self.db_path())
    }

    /// Creates a command without `--db`, for testing path resolution.
    pub fn bare_cmd(&self) -> LexiconCommand {
        LexiconCommand::new().config_home(&self.root)
    }

    /// Saves a page through the CLI and asserts success.
    pub fn save(&self, page: &str, content: &str) {
        self.cmd().save(page, content).assert().success();
    }

    /// Writes `lexicon/config.toml` under the config home.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        let dir = self.root.join("lexicon");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, toml).expect("Failed to write config");
        path
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
