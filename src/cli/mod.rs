//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// lexicon - a wiki whose pages link with [[wiki links]]
#[derive(Parser, Debug)]
#[command(name = "lexicon", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides LEXICON_DB and the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or update a page from a file or stdin
    Save(SaveArgs),

    /// Render a page to HTML
    Show(ShowArgs),

    /// List a page's revisions, newest first
    History(HistoryArgs),

    /// Print one revision's content
    Revision(RevisionArgs),

    /// List pages alphabetically
    #[command(name = "ls")]
    List(ListArgs),

    /// List phantom pages and where they were first cited
    Phantoms(ListArgs),

    /// List recently updated pages
    Recent(RecentArgs),

    /// Count pages and phantoms
    Stats(ListArgs),

    /// Full-text search across pages
    Search(SearchArgs),

    /// List the wiki links in markup
    Links(LinksArgs),

    /// Print the slug for a title
    Slug(SlugArgs),

    /// Soft-delete a page
    Delete(PageArgs),

    /// Restore a soft-deleted page
    Restore(PageArgs),

    /// List soft-deleted pages
    Deleted(ListArgs),

    /// Add a comment to a page
    Comment(CommentArgs),

    /// List a page's comments
    Comments(CommentsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `save` command
#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Page slug or title; normalized to a slug
    pub page: String,

    /// Display title (defaults to the page argument)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Read content from this file instead of stdin
    #[arg(short = 'F', long)]
    pub file: Option<PathBuf>,

    /// Author id recorded on the revision
    #[arg(short, long, default_value_t = 1)]
    pub author: i64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Page slug
    pub slug: String,

    /// Print the stored markup instead of HTML
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the `history` command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Page slug
    pub slug: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `revision` command
#[derive(Parser, Debug)]
pub struct RevisionArgs {
    /// Revision id
    pub id: i64,
}

/// Arguments shared by listing commands
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `recent` command
#[derive(Parser, Debug)]
pub struct RecentArgs {
    /// Number of pages to show (defaults to config `recent_limit`)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query; a trailing * matches prefixes
    pub query: String,

    /// Maximum results (defaults to config `search_limit`)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `links` command
#[derive(Parser, Debug)]
pub struct LinksArgs {
    /// Markup file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `slug` command
#[derive(Parser, Debug)]
pub struct SlugArgs {
    /// Title to normalize
    pub title: String,
}

/// Arguments naming a single page
#[derive(Parser, Debug)]
pub struct PageArgs {
    /// Page slug
    pub slug: String,
}

/// Arguments for the `comment` command
#[derive(Parser, Debug)]
pub struct CommentArgs {
    /// Page slug
    pub slug: String,

    /// Comment text
    pub text: String,

    /// Author id
    #[arg(short, long, default_value_t = 1)]
    pub author: i64,
}

/// Arguments for the `comments` command
#[derive(Parser, Debug)]
pub struct CommentsArgs {
    /// Page slug
    pub slug: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
