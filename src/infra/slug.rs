//! Slug generation for page identifiers.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Converts a title to a canonical URL-safe slug.
///
/// - Decomposes Unicode (NFKD) so accented letters split into base + mark
/// - Converts to lowercase
/// - Maps spaces and underscores to hyphens
/// - Drops combining marks and every character outside `[a-z0-9-]`
/// - Collapses consecutive hyphens
/// - Trims leading/trailing hyphens
///
/// Scripts without an ASCII decomposition reduce to the empty string.
///
/// # Examples
///
/// ```
/// use lexicon::infra::slugify;
///
/// assert_eq!(slugify("Page Name"), "page-name");
/// assert_eq!(slugify("Café"), "cafe");
/// assert_eq!(slugify("日本語"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    for c in title.nfkd().flat_map(char::to_lowercase) {
        match c {
            'a'..='z' | '0'..='9' | '-' => result.push(c),
            ' ' | '_' => result.push('-'),
            // Combining marks left over from decomposition fall through here.
            _ => {}
        }
    }

    let collapsed = HYPHEN_RUN.replace_all(&result, "-");
    collapsed.trim_matches('-').to_string()
}

/// Returns true if `slug` is non-empty and already in canonical form.
pub fn is_canonical_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
