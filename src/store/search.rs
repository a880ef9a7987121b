//! Full-text query sanitization and snippet highlighting.

use pulldown_cmark::escape::escape_html;

/// Characters with syntactic meaning to FTS5 that user input may not carry.
const STRIPPED: &[char] = &['"', '^', ':', '(', ')', '{', '}', '[', ']'];

/// Marks the start of a match inside a raw snippet.
pub(crate) const MATCH_START: &str = "\u{2}";

/// Marks the end of a match inside a raw snippet.
pub(crate) const MATCH_END: &str = "\u{3}";

/// Turns free-form user input into an FTS5 MATCH expression.
///
/// - Syntax characters are removed; a trailing `*` requests prefix matching
/// - Each remaining word becomes a quoted phrase, so operators such as
///   `OR` or `NEAR` are matched as plain words
/// - Words combine with implicit AND
///
/// Returns `None` when nothing searchable is left.
///
/// # Examples
///
/// ```
/// use lexicon::store::sanitize_query;
///
/// assert_eq!(sanitize_query("great war").as_deref(), Some(r#""great" "war""#));
/// assert_eq!(sanitize_query("drag*").as_deref(), Some(r#""drag"*"#));
/// assert_eq!(sanitize_query("  (\"\") "), None);
/// ```
pub fn sanitize_query(query: &str) -> Option<String> {
    let cleaned: String = query.chars().filter(|c| !STRIPPED.contains(c)).collect();
    let terms: Vec<String> = cleaned.split_whitespace().filter_map(query_term).collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

fn query_term(word: &str) -> Option<String> {
    let (base, prefix) = match word.strip_suffix('*') {
        Some(base) => (base, true),
        None => (word, false),
    };
    let base: String = base.chars().filter(|c| *c != '*').collect();
    let base = base.trim_matches('-');

    if !base.chars().any(char::is_alphanumeric) {
        return None;
    }

    Some(if prefix {
        format!("\"{base}\"*")
    } else {
        format!("\"{base}\"")
    })
}

/// Escapes a raw FTS5 snippet and turns match markers into `<mark>` tags.
pub(crate) fn highlight_snippet(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    // Writing into a String cannot fail.
    let _ = escape_html(&mut escaped, raw);
    escaped
        .replace(MATCH_START, "<mark>")
        .replace(MATCH_END, "</mark>")
}
