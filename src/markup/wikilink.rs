//! The `[[Target]]` / `[[Target|Display]]` cross-reference syntax.

use crate::infra::slugify;
use serde::Serialize;

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// A resolved cross-reference found in page markup.
///
/// # Examples
///
/// ```
/// use lexicon::markup::WikiLink;
///
/// let (link, consumed) = WikiLink::parse("[[Page Name|the page]] rest").unwrap();
/// assert_eq!(link.target(), "page-name");
/// assert_eq!(link.display_text(), "the page");
/// assert_eq!(consumed, "[[Page Name|the page]]".len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WikiLink {
    target: String,
    display_text: String,
}

impl WikiLink {
    /// Creates a link from an already-normalized target slug.
    pub fn new(target: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            display_text: display_text.into(),
        }
    }

    /// Returns the slug of the referenced page.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the text shown to readers.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Parses a wiki link at the start of `input`.
    ///
    /// Returns the link and the number of bytes it spans, or `None` when the
    /// input does not begin with a well-formed link on the current line.
    /// Callers emit the text as-is in that case.
    pub fn parse(input: &str) -> Option<(Self, usize)> {
        let rest = input.strip_prefix(OPEN)?;
        let line = rest.split('\n').next().unwrap_or(rest);
        let end = line.find(CLOSE)?;
        let inner = &line[..end];

        let (title, display) = match inner.split_once('|') {
            Some((title, display)) => (title.trim(), display.trim()),
            None => (inner.trim(), inner.trim()),
        };
        if title.is_empty() {
            return None;
        }

        let target = slugify(title);
        if target.is_empty() {
            return None;
        }

        Some((Self::new(target, display), OPEN.len() + end + CLOSE.len()))
    }
}

/// A run of plain text or a link, produced by [`split_wikilinks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link(WikiLink),
}

/// Splits a single text run into literal text and wiki links.
///
/// Malformed `[[` sequences stay in the surrounding text.
pub fn split_wikilinks(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(OPEN) {
        let at = cursor + offset;
        match WikiLink::parse(&text[at..]) {
            Some((link, consumed)) => {
                if literal_start < at {
                    segments.push(Segment::Text(&text[literal_start..at]));
                }
                segments.push(Segment::Link(link));
                cursor = at + consumed;
                literal_start = cursor;
            }
            // Not a link; the bracket stays literal.
            None => cursor = at + 1,
        }
    }

    if literal_start < text.len() {
        segments.push(Segment::Text(&text[literal_start..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Option<WikiLink> {
        WikiLink::parse(input).map(|(link, _)| link)
    }

    // ===========================================
    // WikiLink::parse
    // ===========================================

    #[test]
    fn simple_link() {
        let link = parse("[[Page Name]]").unwrap();
        assert_eq!(link.target(), "page-name");
        assert_eq!(link.display_text(), "Page Name");
    }

    #[test]
    fn link_with_display_text() {
        let link = parse("[[Page Name|Display Text]]").unwrap();
        assert_eq!(link.target(), "page-name");
        assert_eq!(link.display_text(), "Display Text");
    }

    #[test]
    fn surrounding_spaces_are_trimmed() {
        let link = parse("[[ Page Name | Display Text ]]").unwrap();
        assert_eq!(link.target(), "page-name");
        assert_eq!(link.display_text(), "Display Text");
    }

    #[test]
    fn special_characters_are_slugified() {
        let link = parse("[[The Battle of Foo!]]").unwrap();
        assert_eq!(link.target(), "the-battle-of-foo");
        assert_eq!(link.display_text(), "The Battle of Foo!");
    }

    #[test]
    fn numbers_and_hyphens() {
        assert_eq!(parse("[[Chapter 1]]").unwrap().target(), "chapter-1");
        let link = parse("[[Some-Thing]]").unwrap();
        assert_eq!(link.target(), "some-thing");
        assert_eq!(link.display_text(), "Some-Thing");
    }

    #[test]
    fn split_happens_on_first_pipe_only() {
        let link = parse("[[A|b|c]]").unwrap();
        assert_eq!(link.target(), "a");
        assert_eq!(link.display_text(), "b|c");
    }

    #[test]
    fn consumed_length_covers_delimiters() {
        let (_, consumed) = WikiLink::parse("[[A]] tail").unwrap();
        assert_eq!(consumed, 5);
    }

    #[test]
    fn not_links() {
        assert_eq!(parse("[[]]"), None);
        assert_eq!(parse("[[   ]]"), None);
        assert_eq!(parse("[[|Display]]"), None);
        assert_eq!(parse("[Page"), None);
        assert_eq!(parse("[Page Name]"), None);
        assert_eq!(parse("[[Page Name"), None);
        assert_eq!(parse("[[日本語]]"), None);
    }

    #[test]
    fn closing_must_be_on_same_line() {
        assert_eq!(parse("[[Page\nName]]"), None);
    }

    // ===========================================
    // split_wikilinks
    // ===========================================

    #[test]
    fn split_plain_text() {
        assert_eq!(split_wikilinks("no links"), vec![Segment::Text("no links")]);
    }

    #[test]
    fn split_mixed() {
        let segments = split_wikilinks("See [[Dragons]] and [[Fire|flame]].");
        assert_eq!(
            segments,
            vec![
                Segment::Text("See "),
                Segment::Link(WikiLink::new("dragons", "Dragons")),
                Segment::Text(" and "),
                Segment::Link(WikiLink::new("fire", "flame")),
                Segment::Text("."),
            ]
        );
    }

    #[test]
    fn split_keeps_malformed_sequences_literal() {
        assert_eq!(
            split_wikilinks("broken [[]] and [[open"),
            vec![Segment::Text("broken [[]] and [[open")]
        );
    }

    #[test]
    fn split_recovers_after_malformed_sequence() {
        let segments = split_wikilinks("[[ ]] [[A]]");
        assert_eq!(
            segments,
            vec![
                Segment::Text("[[ ]] "),
                Segment::Link(WikiLink::new("a", "A")),
            ]
        );
    }
}
