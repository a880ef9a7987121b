//! HTML rendering with link styling driven by page existence.

use crate::markup::document::{Document, Node};
use crate::markup::wikilink::WikiLink;
use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{CowStr, Event, html};
use serde::Serialize;

/// Class for links to written pages.
pub const LINK_CLASS: &str = "wiki-link";

/// Class for links to phantom or missing pages.
pub const PHANTOM_LINK_CLASS: &str = "wiki-link phantom";

/// What the store knows about a link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// No visible page has this slug.
    Absent,
    /// Cited but never written.
    Phantom,
    /// Written and not deleted.
    Real,
}

impl PageStatus {
    pub fn exists(self) -> bool {
        !matches!(self, PageStatus::Absent)
    }

    pub fn is_phantom(self) -> bool {
        matches!(self, PageStatus::Phantom)
    }
}

/// Answers "does this slug name a page, and is it a phantom?" at render time.
pub trait ExistenceOracle {
    fn lookup(&self, slug: &str) -> PageStatus;
}

impl<T: ExistenceOracle + ?Sized> ExistenceOracle for &T {
    fn lookup(&self, slug: &str) -> PageStatus {
        (**self).lookup(slug)
    }
}

/// Renders page markup to HTML.
///
/// The oracle is consulted once per link on every render, so styling tracks
/// the current state of each target rather than its state at save time.
///
/// # Examples
///
/// ```
/// use lexicon::markup::{ExistenceOracle, PageStatus, Renderer};
///
/// struct Nothing;
/// impl ExistenceOracle for Nothing {
///     fn lookup(&self, _slug: &str) -> PageStatus {
///         PageStatus::Absent
///     }
/// }
///
/// let html = Renderer::new(&Nothing).render("See [[Dragons]].");
/// assert!(html.contains(r#"<a href="/dragons" class="wiki-link phantom">Dragons</a>"#));
/// ```
pub struct Renderer<'o> {
    oracle: &'o dyn ExistenceOracle,
}

impl<'o> Renderer<'o> {
    pub fn new(oracle: &'o dyn ExistenceOracle) -> Self {
        Self { oracle }
    }

    /// Parses and renders markup. Never fails: malformed link syntax is
    /// rendered as text.
    pub fn render(&self, markup: &str) -> String {
        self.render_document(Document::parse(markup))
    }

    pub fn render_document(&self, document: Document<'_>) -> String {
        let events = document
            .into_nodes()
            .into_iter()
            .flat_map(|node| match node {
                Node::Markdown(event) => vec![event],
                Node::WikiLink(link) => self.link_events(&link),
            });

        let mut output = String::new();
        html::push_html(&mut output, events);
        output
    }

    fn link_events(&self, link: &WikiLink) -> Vec<Event<'static>> {
        let status = self.oracle.lookup(link.target());
        let class = if status.exists() && !status.is_phantom() {
            LINK_CLASS
        } else {
            PHANTOM_LINK_CLASS
        };

        let mut open = String::from("<a href=\"/");
        // Writing into a String cannot fail.
        let _ = escape_html(&mut open, link.target());
        open.push_str("\" class=\"");
        open.push_str(class);
        open.push_str("\">");

        vec![
            Event::Html(CowStr::from(open)),
            Event::Text(CowStr::from(link.display_text().to_string())),
            Event::Html(CowStr::Borrowed("</a>")),
        ]
    }
}

/// Renders markup against `oracle`.
pub fn render(markup: &str, oracle: &dyn ExistenceOracle) -> String {
    Renderer::new(oracle).render(markup)
}
