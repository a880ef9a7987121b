//! Comment command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::{find_page, open_store};
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{CommentArgs, CommentsArgs};
use crate::domain::UserId;
use crate::store::CommentRepository;

pub fn handle_comment(args: &CommentArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;
    let page = find_page(&store, &args.slug)?;
    let comment = store
        .add_comment(page.id(), UserId::new(args.author), &args.text)
        .with_context(|| format!("failed to comment on '{}'", page.slug()))?;
    println!("Added comment {} to '{}'", comment.id(), page.slug());
    Ok(())
}

pub fn handle_comments(args: &CommentsArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let page = find_page(&store, &args.slug)?;
    let comments = store.list_comments(page.id())?;

    match args.format {
        OutputFormat::Human => {
            if comments.is_empty() {
                println!("No comments on '{}'.", page.slug());
            }
            for comment in &comments {
                println!(
                    "#{} user {} at {}",
                    comment.id(),
                    comment.author(),
                    comment.created_at().format("%Y-%m-%d %H:%M")
                );
                for line in comment.content().lines() {
                    println!("  {line}");
                }
            }
        }
        OutputFormat::Json => Output::new(&comments).print()?,
    }
    Ok(())
}
