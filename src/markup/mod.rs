//! Markdown with `[[wiki link]]` cross-references: parse, render, extract

mod document;
mod links;
mod render;
mod wikilink;

pub use document::{Document, Node, is_dangerous_url, parser_options};
pub use links::{extract_links, first_display_text, unique_targets};
pub use render::{
    ExistenceOracle, LINK_CLASS, PHANTOM_LINK_CLASS, PageStatus, Renderer, render,
};
pub use wikilink::{Segment, WikiLink, split_wikilinks};
