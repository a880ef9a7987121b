//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the database file.
pub const DB_ENV_VAR: &str = "LEXICON_DB";

const DEFAULT_SEARCH_LIMIT: usize = 50;
const DEFAULT_RECENT_LIMIT: usize = 10;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database
    pub database: Option<PathBuf>,

    /// Default number of search results
    pub search_limit: Option<usize>,

    /// Default number of pages in `recent`
    pub recent_limit: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/lexicon/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexicon")
            .join("config.toml")
    }

    /// Resolve the database path.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. `LEXICON_DB` environment variable
    /// 3. Config file `database` setting
    /// 4. `<data dir>/lexicon/lexicon.db`
    pub fn database_path(&self, cli_db: Option<&Path>) -> PathBuf {
        let env_db = std::env::var_os(DB_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        self.resolve_database(cli_db, env_db)
    }

    fn resolve_database(&self, cli_db: Option<&Path>, env_db: Option<PathBuf>) -> PathBuf {
        cli_db
            .map(Path::to_path_buf)
            .or(env_db)
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("lexicon")
                    .join("lexicon.db")
            })
    }

    pub fn search_limit(&self) -> usize {
        self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT)
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    }
}
