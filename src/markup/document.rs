//! Parsed page markup: markdown events plus wiki-link nodes.

use crate::markup::wikilink::{Segment, WikiLink, split_wikilinks};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};

/// Markdown extensions enabled for page content.
///
/// Tables stay off: their `|` cell separator collides with the
/// `[[Target|Display]]` syntax.
pub fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// One node of a parsed document.
///
/// The node set is closed: everything the markdown grammar produces is a
/// `Markdown` event, and cross-references are `WikiLink`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Markdown(Event<'a>),
    WikiLink(WikiLink),
}

/// A parsed page, ready to render or walk for links.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> Document<'a> {
    /// Parses markup into a node sequence.
    ///
    /// Wiki links are recognized in ordinary text only; code, link labels
    /// and image alt text are left literal. Raw HTML is demoted to text so
    /// it is escaped on output.
    pub fn parse(markup: &'a str) -> Self {
        let mut nodes = Vec::new();
        let mut pending = String::new();
        let mut literal_depth = 0usize;

        for event in Parser::new_ext(markup, parser_options()) {
            // The grammar splits text at brackets and inline HTML; merge
            // adjacent runs so a link is seen whole. Raw HTML is kept as text.
            let event = match event {
                Event::Text(text) | Event::Html(text) if literal_depth == 0 => {
                    pending.push_str(&text);
                    continue;
                }
                Event::Html(raw) => Event::Text(raw),
                Event::Start(tag) => Event::Start(neutralize_destination(tag)),
                Event::End(tag) => Event::End(neutralize_destination(tag)),
                other => other,
            };
            flush_text(&mut pending, &mut nodes);

            match &event {
                Event::Start(Tag::CodeBlock(_) | Tag::Link(..) | Tag::Image(..)) => {
                    literal_depth += 1;
                }
                Event::End(Tag::CodeBlock(_) | Tag::Link(..) | Tag::Image(..)) => {
                    literal_depth = literal_depth.saturating_sub(1);
                }
                _ => {}
            }

            nodes.push(Node::Markdown(event));
        }
        flush_text(&mut pending, &mut nodes);

        Self { nodes }
    }

    /// Returns the nodes in document order.
    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    /// Iterates over wiki links in document order.
    pub fn links(&self) -> impl Iterator<Item = &WikiLink> {
        self.nodes.iter().filter_map(|node| match node {
            Node::WikiLink(link) => Some(link),
            Node::Markdown(_) => None,
        })
    }

    pub fn into_nodes(self) -> Vec<Node<'a>> {
        self.nodes
    }
}

/// URL schemes that never reach rendered output.
const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "vbscript:", "file:", "data:"];

/// Inline image payloads that stay allowed under `data:`.
const SAFE_DATA_PREFIXES: &[&str] = &[
    "data:image/png",
    "data:image/gif",
    "data:image/jpeg",
    "data:image/webp",
];

/// Returns true if `url` would run script or reach the local filesystem.
pub fn is_dangerous_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    if SAFE_DATA_PREFIXES.iter().any(|prefix| url.starts_with(prefix)) {
        return false;
    }
    DANGEROUS_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// Empties the destination of links and images with a dangerous scheme.
fn neutralize_destination(tag: Tag<'_>) -> Tag<'_> {
    match tag {
        Tag::Link(kind, dest, title) if is_dangerous_url(&dest) => {
            Tag::Link(kind, CowStr::Borrowed(""), title)
        }
        Tag::Image(kind, dest, title) if is_dangerous_url(&dest) => {
            Tag::Image(kind, CowStr::Borrowed(""), title)
        }
        other => other,
    }
}

fn flush_text<'a>(pending: &mut String, nodes: &mut Vec<Node<'a>>) {
    if pending.is_empty() {
        return;
    }
    for segment in split_wikilinks(pending) {
        nodes.push(match segment {
            Segment::Text(text) => Node::Markdown(Event::Text(CowStr::from(text.to_string()))),
            Segment::Link(link) => Node::WikiLink(link),
        });
    }
    pending.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(markup: &str) -> Vec<String> {
        Document::parse(markup)
            .links()
            .map(|link| link.target().to_string())
            .collect()
    }

    #[test]
    fn finds_links_in_paragraphs() {
        assert_eq!(targets("See [[Dragons]] now."), vec!["dragons"]);
    }

    #[test]
    fn finds_links_in_nested_blocks() {
        let markup = "# [[Heading Link]]\n\n> quoted [[Quote Link]]\n\n- item [[List Link]]\n";
        assert_eq!(
            targets(markup),
            vec!["heading-link", "quote-link", "list-link"]
        );
    }

    #[test]
    fn links_do_not_span_lines() {
        assert!(targets("[[Broken\nLink]]").is_empty());
    }

    #[test]
    fn links_in_emphasis() {
        assert_eq!(targets("*see [[Fire]]*"), vec!["fire"]);
    }

    #[test]
    fn code_is_literal() {
        assert!(targets("`[[Inline]]`").is_empty());
        assert!(targets("```\n[[Fenced]]\n```\n").is_empty());
        assert!(targets("    [[Indented]]\n").is_empty());
    }

    #[test]
    fn link_labels_are_literal() {
        assert!(targets("[label [[Inner]]](https://example.com)").is_empty());
    }

    #[test]
    fn raw_html_becomes_text() {
        let doc = Document::parse("<script>alert(1)</script>\n");
        assert!(
            doc.nodes()
                .iter()
                .all(|node| !matches!(node, Node::Markdown(Event::Html(_))))
        );
    }

    #[test]
    fn inline_html_does_not_split_links() {
        let doc = Document::parse("[[Dragons|<b>big</b>]]");
        let links: Vec<_> = doc.links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].display_text(), "<b>big</b>");
    }

    #[test]
    fn malformed_links_stay_as_text() {
        let doc = Document::parse("a [[ ]] b");
        assert_eq!(doc.links().count(), 0);
        let text: String = doc
            .nodes()
            .iter()
            .filter_map(|node| match node {
                Node::Markdown(Event::Text(text)) => Some(text.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "a [[ ]] b");
    }

    #[test]
    fn dangerous_schemes_are_detected() {
        assert!(is_dangerous_url("javascript:alert(1)"));
        assert!(is_dangerous_url("  JavaScript:alert(1)"));
        assert!(is_dangerous_url("VBSCRIPT:msgbox"));
        assert!(is_dangerous_url("file:///etc/passwd"));
        assert!(is_dangerous_url("data:text/html;base64,PHNjcmlwdD4="));
    }

    #[test]
    fn ordinary_destinations_are_kept() {
        assert!(!is_dangerous_url("https://example.com"));
        assert!(!is_dangerous_url("/pages/dragons"));
        assert!(!is_dangerous_url("#section"));
        assert!(!is_dangerous_url("data:image/png;base64,iVBORw0KGgo="));
    }

    #[test]
    fn dangerous_link_destinations_are_emptied() {
        let doc = Document::parse("[click](javascript:alert(1))");
        let destinations: Vec<String> = doc
            .nodes()
            .iter()
            .filter_map(|node| match node {
                Node::Markdown(Event::Start(Tag::Link(_, dest, _)))
                | Node::Markdown(Event::End(Tag::Link(_, dest, _))) => Some(dest.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(destinations, vec![String::new(), String::new()]);
    }
}
