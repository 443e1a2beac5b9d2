//! Query-independent text matching helpers.

use log::warn;
use regex::{Regex, RegexBuilder};

/// Returns whether every character of `query` occurs in `text` in order,
/// ignoring case. Characters need not be contiguous.
pub fn fuzzy_search(text: &str, query: &str) -> bool {
    let mut wanted = query.chars().flat_map(char::to_lowercase);
    let mut pending = wanted.next();
    for candidate in text.chars().flat_map(char::to_lowercase) {
        match pending {
            Some(next) if next == candidate => pending = wanted.next(),
            Some(_) => {}
            None => break,
        }
    }
    pending.is_none()
}

/// Wraps case-insensitive occurrences of the literal `query` in
/// `<mark>..</mark>`. A blank query returns `text` unchanged.
pub fn highlight_search_terms(text: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return text.to_string();
    }
    match literal_matcher(query) {
        Ok(matcher) => matcher.replace_all(text, "<mark>$0</mark>").into_owned(),
        Err(err) => {
            warn!("event=search_highlight module=search status=error error={err}");
            text.to_string()
        }
    }
}

fn literal_matcher(query: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
}
