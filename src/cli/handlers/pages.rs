//! Page write and read command handlers.

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::{find_page, first_line, open_store, read_input};
use crate::cli::output::{Output, OutputFormat, truncate_str};
use crate::cli::{HistoryArgs, PageArgs, RevisionArgs, SaveArgs, ShowArgs};
use crate::domain::{RevisionId, UserId};
use crate::infra::slugify;
use crate::markup::Renderer;
use crate::store::{PageRepository, StoreError, Visibility, save_page};

pub fn handle_save(args: &SaveArgs, db_path: &Path) -> Result<()> {
    let slug = slugify(&args.page);
    if slug.is_empty() {
        bail!("'{}' does not contain any characters usable in a slug", args.page);
    }
    let content = read_input(args.file.as_deref())?;

    let mut store = open_store(db_path)?;

    // Keep the stored title unless a new one is given.
    let title = match &args.title {
        Some(title) => title.clone(),
        None => store
            .page_by_slug(&slug, Visibility::Live)?
            .map(|page| page.title().to_string())
            .unwrap_or_else(|| args.page.clone()),
    };

    let outcome = save_page(&mut store, &slug, &title, &content, UserId::new(args.author))
        .with_context(|| format!("failed to save page '{slug}'"))?;

    match args.format {
        OutputFormat::Human => {
            let verb = if outcome.created { "Created" } else { "Updated" };
            println!("{verb} page '{}' (id {})", outcome.page.slug(), outcome.page.id());
            for target in &outcome.phantoms.created {
                println!("  new phantom: {target}");
            }
            for target in &outcome.phantoms.failed {
                eprintln!("warning: could not create phantom page '{target}'");
            }
        }
        OutputFormat::Json => Output::new(&outcome).print()?,
    }
    Ok(())
}

pub fn handle_show(args: &ShowArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let page = find_page(&store, &args.slug)?;
    if page.is_phantom() {
        bail!("'{}' is cited but has not been written yet", page.slug());
    }

    let revision = store.current_revision(page.id())?;
    if args.raw {
        print!("{}", revision.content());
    } else {
        print!("{}", Renderer::new(&store).render(revision.content()));
    }
    Ok(())
}

pub fn handle_history(args: &HistoryArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let page = find_page(&store, &args.slug)?;
    let revisions = store.list_revisions(page.id())?;

    match args.format {
        OutputFormat::Human => {
            if revisions.is_empty() {
                println!("No revisions for '{}'.", page.slug());
            }
            for revision in &revisions {
                println!(
                    "{:>6}  {}  user {:<4}  {}",
                    revision.id(),
                    revision.created_at().format("%Y-%m-%d %H:%M"),
                    revision.author(),
                    truncate_str(first_line(revision.content()), 50)
                );
            }
        }
        OutputFormat::Json => Output::new(&revisions).print()?,
    }
    Ok(())
}

pub fn handle_revision(args: &RevisionArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let revision = store.get_revision(RevisionId::new(args.id))?;
    print!("{}", revision.content());
    Ok(())
}

pub fn handle_delete(args: &PageArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;
    let page = find_page(&store, &args.slug)?;
    store
        .soft_delete(page.id())
        .with_context(|| format!("failed to delete page '{}'", page.slug()))?;
    println!("Deleted page '{}'", page.slug());
    Ok(())
}

pub fn handle_restore(args: &PageArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;
    let slug = slugify(&args.slug);
    let page = store
        .page_by_slug(&slug, Visibility::IncludeDeleted)?
        .ok_or_else(|| StoreError::NotFound {
            what: "page",
            key: slug.clone(),
        })?;
    store
        .restore(page.id())
        .with_context(|| format!("failed to restore page '{slug}'"))?;
    println!("Restored page '{slug}'");
    Ok(())
}
