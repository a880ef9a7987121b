//! Cross-reference extraction for the save path.

use crate::markup::document::Document;
use crate::markup::wikilink::WikiLink;
use std::collections::HashSet;

/// Returns every wiki link in `markup`, in document order.
///
/// Runs the parse stage only; no existence lookups happen here.
///
/// # Examples
///
/// ```
/// use lexicon::markup::extract_links;
///
/// let links = extract_links("[[Dragons]] breathe [[Fire|flame]].");
/// assert_eq!(links[0].target(), "dragons");
/// assert_eq!(links[1].display_text(), "flame");
/// ```
pub fn extract_links(markup: &str) -> Vec<WikiLink> {
    Document::parse(markup).links().cloned().collect()
}

/// Deduplicates link targets, keeping first-seen order.
pub fn unique_targets(links: &[WikiLink]) -> Vec<&str> {
    let mut seen = HashSet::new();
    links
        .iter()
        .map(WikiLink::target)
        .filter(|target| seen.insert(*target))
        .collect()
}

/// Returns the display text of the first link to `target`.
pub fn first_display_text<'a>(links: &'a [WikiLink], target: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|link| link.target() == target)
        .map(WikiLink::display_text)
}
