//! Page listing command handlers.

use anyhow::Result;
use std::path::Path;

use super::open_store;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat, truncate_str};
use crate::cli::{ListArgs, RecentArgs};
use crate::domain::Page;
use crate::store::PageRepository;

fn print_pages(pages: &[Page], format: OutputFormat, empty: &str) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if pages.is_empty() {
                println!("{empty}");
            }
            for page in pages {
                println!("{:<32} {}", truncate_str(page.slug(), 32), page.title());
            }
        }
        OutputFormat::Json => Output::new(pages).print()?,
    }
    Ok(())
}

pub fn handle_list(args: &ListArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    print_pages(&store.list_pages()?, args.format, "No pages found.")
}

pub fn handle_recent(args: &RecentArgs, db_path: &Path, config: &Config) -> Result<()> {
    let store = open_store(db_path)?;
    let limit = args.limit.unwrap_or_else(|| config.recent_limit());
    let pages = store.list_recent(limit)?;

    match args.format {
        OutputFormat::Human => {
            if pages.is_empty() {
                println!("No pages found.");
            }
            for page in &pages {
                println!(
                    "{}  {:<32} {}",
                    page.updated_at().format("%Y-%m-%d %H:%M"),
                    truncate_str(page.slug(), 32),
                    page.title()
                );
            }
        }
        OutputFormat::Json => Output::new(&pages).print()?,
    }
    Ok(())
}

pub fn handle_phantoms(args: &ListArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let phantoms = store.list_phantoms()?;

    match args.format {
        OutputFormat::Human => {
            if phantoms.is_empty() {
                println!("No phantom pages.");
            }
            for phantom in &phantoms {
                let cited_in = phantom.source_slug.as_deref().unwrap_or("(unknown)");
                match phantom.page.first_cited_by() {
                    Some(user) => println!(
                        "{:<32} cited in {cited_in} by user {user}",
                        truncate_str(phantom.page.slug(), 32)
                    ),
                    None => println!(
                        "{:<32} cited in {cited_in}",
                        truncate_str(phantom.page.slug(), 32)
                    ),
                }
            }
        }
        OutputFormat::Json => Output::new(&phantoms).print()?,
    }
    Ok(())
}

pub fn handle_deleted(args: &ListArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    print_pages(&store.list_deleted()?, args.format, "No deleted pages.")
}

pub fn handle_stats(args: &ListArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let stats = store.page_stats()?;

    match args.format {
        OutputFormat::Human => println!("{} pages, {} phantoms", stats.pages, stats.phantoms),
        OutputFormat::Json => Output::new(stats).print()?,
    }
    Ok(())
}
