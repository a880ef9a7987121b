//! Search command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_store;
use crate::cli::SearchArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat, plain_snippet};
use crate::store::PageRepository;

pub fn handle_search(args: &SearchArgs, db_path: &Path, config: &Config) -> Result<()> {
    let store = open_store(db_path)?;
    let limit = args.limit.unwrap_or_else(|| config.search_limit());

    let hits = store
        .search(&args.query, limit)
        .with_context(|| format!("search failed for query: {}", args.query))?;

    match args.format {
        OutputFormat::Human => {
            if hits.is_empty() {
                println!("No matching pages found.");
            } else {
                for hit in &hits {
                    println!("{} ({})", hit.title, hit.slug);
                    println!("  {}", plain_snippet(&hit.snippet));
                }
                println!();
                println!("{} result(s)", hits.len());
            }
        }
        OutputFormat::Json => Output::new(&hits).print()?,
    }
    Ok(())
}
