//! lexicon - a wiki content graph: pages, revisions, wiki links and phantoms

pub mod cli;
pub mod domain;
pub mod infra;
pub mod markup;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_comment, handle_comments, handle_delete, handle_deleted, handle_history,
        handle_links, handle_list, handle_phantoms, handle_recent, handle_restore,
        handle_revision, handle_save, handle_search, handle_show, handle_slug, handle_stats,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    infra::logging::init(cli.verbose);

    // Commands that never touch the database.
    match &cli.command {
        Command::Links(args) => return handle_links(args),
        Command::Slug(args) => return handle_slug(args),
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "lexicon",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load()?;
    let db_path = config.database_path(cli.db.as_deref());
    tracing::debug!(path = %db_path.display(), "using database");

    match &cli.command {
        Command::Save(args) => handle_save(args, &db_path),
        Command::Show(args) => handle_show(args, &db_path),
        Command::History(args) => handle_history(args, &db_path),
        Command::Revision(args) => handle_revision(args, &db_path),
        Command::List(args) => handle_list(args, &db_path),
        Command::Phantoms(args) => handle_phantoms(args, &db_path),
        Command::Recent(args) => handle_recent(args, &db_path, &config),
        Command::Stats(args) => handle_stats(args, &db_path),
        Command::Search(args) => handle_search(args, &db_path, &config),
        Command::Delete(args) => handle_delete(args, &db_path),
        Command::Restore(args) => handle_restore(args, &db_path),
        Command::Deleted(args) => handle_deleted(args, &db_path),
        Command::Comment(args) => handle_comment(args, &db_path),
        Command::Comments(args) => handle_comments(args, &db_path),
        Command::Links(_) | Command::Slug(_) | Command::Completions(_) => Ok(()),
    }
}
