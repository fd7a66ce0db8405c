//! Text diffing
//!
//! Computes the char ranges added and removed between two snapshots of a
//! text field and decides whether the edit changed any finished words.

use once_cell::sync::Lazy;
use regex::Regex;
use similar::{capture_diff_slices, Algorithm, DiffTag};
use retain_theme_core::Difference;

use crate::range::SpanRange;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static TRAILING_WORD_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w$").expect("valid regex"));

/// Whitespace-separated tokens, keeping empty leading/trailing tokens
pub fn split_words(text: &str) -> Vec<&str> {
    WHITESPACE.split(text).collect()
}

/// Tokens minus the word still being typed at the end of the text
pub fn split_finished_words(text: &str) -> Vec<&str> {
    let mut words = split_words(text);
    if TRAILING_WORD_CHAR.is_match(text) {
        words.pop();
    }
    words
}

/// `Significant` when finished words differ, `Small` for any other text change
pub fn text_difference(old: &str, new: &str) -> Difference {
    if old == new {
        Difference::None
    } else if split_finished_words(old) != split_finished_words(new) {
        Difference::Significant
    } else {
        Difference::Small
    }
}

/// Char-level changes between two strings.
///
/// `removed` ranges index the old text, `added` ranges index the new text;
/// both are in ascending order and carry the affected substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringDiff {
    pub added: Vec<SpanRange<String>>,
    pub removed: Vec<SpanRange<String>>,
    /// A word was completed, replaced or deleted
    pub words_changed: bool,
}

impl StringDiff {
    pub fn new(old: &str, new: &str) -> Self {
        let old_chars: Vec<char> = old.chars().collect();
        let new_chars: Vec<char> = new.chars().collect();
        let ops = capture_diff_slices(Algorithm::Myers, &old_chars, &new_chars);

        let mut added = Vec::new();
        let mut removed = Vec::new();

        for (tag, old_range, new_range) in ops.iter().map(similar::DiffOp::as_tag_tuple) {
            if matches!(tag, DiffTag::Delete | DiffTag::Replace) {
                let item: String = old_chars[old_range.clone()].iter().collect();
                removed.push(SpanRange::new(item, old_range.start, old_range.end));
            }
            if matches!(tag, DiffTag::Insert | DiffTag::Replace) {
                let item: String = new_chars[new_range.clone()].iter().collect();
                added.push(SpanRange::new(item, new_range.start, new_range.end));
            }
        }

        let whitespace_added = added.iter().any(|range| range.item.chars().any(char::is_whitespace));
        let words_changed = (whitespace_added && split_finished_words(old) != split_finished_words(new))
            || split_words(old).len() > split_words(new).len();

        Self {
            added,
            removed,
            words_changed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
