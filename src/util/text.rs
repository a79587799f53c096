//! Literal search terms as regular expressions

use regex::{NoExpand, Regex, RegexBuilder};

/// Check if a character has meaning inside a pattern and must be escaped
fn is_pattern_meta(ch: char) -> bool {
    matches!(
        ch,
        '.' | '*'
            | '+'
            | '?'
            | '^'
            | '$'
            | '{'
            | '}'
            | '('
            | ')'
            | '|'
            | '['
            | ']'
            | '\\'
    )
}

/// Escape `term` so the resulting pattern matches it literally.
///
/// An empty term yields an empty pattern, which matches everywhere; callers
/// handle empty terms before searching.
pub fn escape_for_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if is_pattern_meta(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Compile `term` as a literal, optionally case-insensitive, regex
pub fn literal_regex(term: &str, case_sensitive: bool) -> anyhow::Result<Regex> {
    let regex = RegexBuilder::new(&escape_for_pattern(term))
        .case_insensitive(!case_sensitive)
        .build()?;
    Ok(regex)
}

/// Replace up to `limit` matches of `regex` in `text` (0 replaces all).
///
/// The replacement is inserted verbatim; `$` has no special meaning.
pub fn substitute(regex: &Regex, text: &str, replacement: &str, limit: usize) -> String {
    regex.replacen(text, limit, NoExpand(replacement)).into_owned()
}
