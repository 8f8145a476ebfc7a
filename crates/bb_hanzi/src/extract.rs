//! Hanzi extraction.
//!
//! Only the CJK Unified Ideographs basic block (U+4E00..=U+9FFF) counts as
//! Hanzi here; extension blocks are left alone.

use std::sync::LazyLock;

use regex::Regex;

static HANZI_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{4E00}-\u{9FFF}]+").expect("static Hanzi pattern"));

#[inline]
pub fn is_hanzi(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

pub fn contains_hanzi(text: &str) -> bool {
    text.chars().any(is_hanzi)
}

/// Maximal Hanzi runs in order of appearance.
pub fn hanzi_runs(text: &str) -> Vec<&str> {
    HANZI_RUN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Concatenate every Hanzi run in `text`, dropping everything else.
///
/// Returns `None` if the text contains no Hanzi.
pub fn extract(text: &str) -> Option<String> {
    let hanzi: String = HANZI_RUN.find_iter(text).map(|m| m.as_str()).collect();
    if hanzi.is_empty() { None } else { Some(hanzi) }
}
