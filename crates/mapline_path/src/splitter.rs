//! Lexical handling of property path sources.
//!
//! Unquoted sources are split on `_` and `.`; quoted sources (`\Q...\E`)
//! are split on `.` only, so underscores inside names survive.

use once_cell::sync::Lazy;
use regex::Regex;

const QUOTE_START: &str = "\\Q";
const QUOTE_END: &str = "\\E";

static SPLITTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[_.]?([_.]*?[^_.]+))").expect("valid splitter pattern"));

static SPLITTER_FOR_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[.]?([.]*?[^.]+))").expect("valid quoted splitter pattern"));

/// Wraps a path so that underscores are taken literally.
#[must_use]
pub fn quote(source: &str) -> String {
    format!("{QUOTE_START}{source}{QUOTE_END}")
}

/// Returns true if the source was produced by [`quote`].
#[must_use]
pub fn is_quoted(source: &str) -> bool {
    source.len() >= QUOTE_START.len() + QUOTE_END.len()
        && source.starts_with(QUOTE_START)
        && source.ends_with(QUOTE_END)
}

/// Removes every quote marker.
#[must_use]
pub fn unquote(source: &str) -> String {
    source.replace(QUOTE_START, "").replace(QUOTE_END, "")
}

/// Splits a source into its delimited parts.
///
/// An unquoted `a__b` yields `a` and `_b`: the first underscore delimits and
/// the second belongs to the name.
#[must_use]
pub fn split(source: &str) -> Vec<String> {
    if is_quoted(source) {
        SPLITTER_FOR_QUOTED
            .captures_iter(&unquote(source))
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect()
    } else {
        SPLITTER
            .captures_iter(&format!("_{source}"))
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

/// Lowercases the first character unless the first two are both uppercase,
/// so `Name` becomes `name` while `URL` stays `URL`.
#[must_use]
pub fn uncapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return name.to_string();
    }
    let mut result: String = first.to_lowercase().collect();
    result.push_str(&name[first.len_utf8()..]);
    result
}

/// Splits off the last camel-case word.
///
/// Returns `(head, tail)` where `tail` is an uppercase character followed by
/// lowercase characters up to the end. Returns `None` when there is no such
/// word or it starts the string.
#[must_use]
pub fn split_last_word(source: &str) -> Option<(&str, &str)> {
    for (i, c) in source.char_indices().rev() {
        if c.is_lowercase() {
            continue;
        }
        if c.is_uppercase() && i > 0 {
            return Some((&source[..i], &source[i..]));
        }
        return None;
    }
    None
}

/// Shortens `source` to at most `max_chars` characters, marking the cut
/// with `...`.
#[must_use]
pub fn elide(source: &str, max_chars: usize) -> String {
    match source.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &source[..cut]),
        None => source.to_string(),
    }
}
