//! Small text helpers shared by the tribute and archive pages: slugs,
//! excerpts, meta descriptions, and HTML escaping.

use pulldown_cmark::escape;
use regex::Regex;
use std::sync::OnceLock;

const EXCERPT_FALLBACK_CHARS: usize = 140;
const META_DESCRIPTION_MAX_CHARS: usize = 165;
const META_DESCRIPTION_TRUNCATED_CHARS: usize = 162;
const ELLIPSIS: char = '…';

/// Slugifies `text` for use in a URL path. Apostrophes and backticks are
/// dropped first so that e.g., `Max's` becomes `maxs` rather than `max-s`.
pub fn slugify(text: &str) -> String {
    let without_apostrophes: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '’' | '`'))
        .collect();
    slug::slugify(without_apostrophes)
}

/// Returns the first sentence of `text`: the shortest prefix ending in `.`,
/// `!` or `?` that is followed by whitespace or the end of the line. Text
/// without such a sentence is cut to 140 characters with an ellipsis.
pub fn first_sentence(text: &str) -> String {
    static SENTENCE: OnceLock<Regex> = OnceLock::new();
    let sentence = SENTENCE.get_or_init(|| {
        Regex::new(r"(.+?[.!?])(\s|$)").expect("sentence regex is valid")
    });

    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    if let Some(captures) = sentence.captures(text) {
        return captures[1].trim().to_owned();
    }
    truncate(text, EXCERPT_FALLBACK_CHARS)
}

/// Returns the meta description for a tribute page: the excerpt if there is
/// one, otherwise a generic description, cut to fit search result snippets.
pub fn meta_description(excerpt: &str, pet_name: &str) -> String {
    let description = match excerpt.is_empty() {
        false => excerpt.to_owned(),
        true => format!("A memorial tribute honoring {}.", pet_name),
    };
    if description.chars().count() > META_DESCRIPTION_MAX_CHARS {
        truncate(&description, META_DESCRIPTION_TRUNCATED_CHARS)
    } else {
        description
    }
}

// Cuts `text` to `max` characters, trimming trailing whitespace and appending
// an ellipsis if anything was cut.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_owned(),
        Some((end, _)) => {
            let mut truncated = text[..end].trim_end().to_owned();
            truncated.push(ELLIPSIS);
            truncated
        }
    }
}

/// Escapes `&`, `<`, `>` and `"` so `text` can be placed in HTML content or
/// a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    escape::escape_html(&mut escaped, text).unwrap_or(());
    escaped
}

/// Joins the non-empty `parts` with `", "`, e.g., a submitter's first name
/// and state.
pub fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<&str>>()
        .join(", ")
}
