//! Keyword splitting for method names.
//!
//! A keyword only separates two clauses when the character after it starts a
//! new word: an uppercase letter or anything outside ASCII. `Orders` and
//! `Android` therefore stay whole.

use once_cell::sync::Lazy;
use regex::Regex;

static ALL_IGNORE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new("AllIgnor(?:ing|e)Case").expect("valid all-ignore-case pattern"));

static IGNORE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new("Ignor(?:ing|e)Case").expect("valid ignore-case pattern"));

/// Returns true if `c` can start the clause after a keyword.
#[must_use]
pub fn starts_word(c: char) -> bool {
    c.is_uppercase() || !c.is_ascii()
}

/// Splits `text` around every `keyword` that is followed by a word start.
///
/// A keyword at the very start yields a leading empty piece. A trailing
/// keyword never splits since nothing follows it.
#[must_use]
pub fn split_on_keyword<'a>(text: &'a str, keyword: &str) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (index, _) in text.match_indices(keyword) {
        if index < start {
            continue;
        }
        let end = index + keyword.len();
        if text[end..].chars().next().is_some_and(starts_word) {
            pieces.push(&text[start..index]);
            start = end;
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Splits an order clause after each `Asc` or `Desc` that is followed by an
/// uppercase letter.
#[must_use]
pub fn split_order_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if index == 0 || !c.is_uppercase() {
            continue;
        }
        let before = &text[start..index];
        if before.ends_with("Asc") || before.ends_with("Desc") {
            blocks.push(before);
            start = index;
        }
    }
    blocks.push(&text[start..]);
    blocks
}

/// Removes the first `AllIgnoreCase` or `AllIgnoringCase` marker.
#[must_use]
pub fn strip_all_ignore_case(text: &str) -> (String, bool) {
    strip_first(&ALL_IGNORE_CASE, text)
}

/// Removes the first `IgnoreCase` or `IgnoringCase` marker.
#[must_use]
pub fn strip_ignore_case(text: &str) -> (String, bool) {
    strip_first(&IGNORE_CASE, text)
}

fn strip_first(pattern: &Regex, text: &str) -> (String, bool) {
    match pattern.find(text) {
        Some(found) => {
            let mut stripped = String::with_capacity(text.len() - found.len());
            stripped.push_str(&text[..found.start()]);
            stripped.push_str(&text[found.end()..]);
            (stripped, true)
        }
        None => (text.to_string(), false),
    }
}
