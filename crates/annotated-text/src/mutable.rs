//! Mutable annotated string
//!
//! Per-character representation edited in place while the user types.
//! Plain text snapshots coming from a text field are folded in with
//! [`RetainMutableAnnotatedString::apply_diff`], which keeps the styles of
//! untouched characters and gives new characters the style pending at their
//! insertion point.

use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::debug;
use retain_theme_core::Difference;

use crate::annotated_char::AnnotatedChar;
use crate::immutable::RetainAnnotatedString;
use crate::range::SpanRange;
use crate::string_diff::StringDiff;
use crate::style::{RetainSpanStyle, StyleOverride};
use crate::AnnotatedText;

/// Ordered run of styled characters.
///
/// Every mutation sets a dirty flag the host can poll to know when to
/// re-render or persist; [`Self::mark_clean`] resets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetainMutableAnnotatedString {
    achars: Vec<AnnotatedChar>,
    /// Style for text typed at position 0 of an empty string
    #[serde(rename = "startStyle", default)]
    start_style: RetainSpanStyle,
    #[serde(skip)]
    dirty: bool,
}

impl RetainMutableAnnotatedString {
    pub fn new(achars: Vec<AnnotatedChar>, start_style: RetainSpanStyle) -> Self {
        Self {
            achars,
            start_style,
            dirty: false,
        }
    }

    /// Get the full text content
    pub fn text(&self) -> String {
        self.achars.iter().map(|a| a.ch).collect()
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.achars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.achars.get(index).map(|a| a.ch)
    }

    pub fn achars(&self) -> &[AnnotatedChar] {
        &self.achars
    }

    pub fn start_style(&self) -> RetainSpanStyle {
        self.start_style
    }

    /// Check if the string has changed since the last `mark_clean`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Bring the text in line with `revised`.
    ///
    /// Returns whether the edit changed any finished words.
    pub fn apply_diff(&mut self, revised: &str) -> bool {
        let diff = StringDiff::new(&self.text(), revised);
        if diff.is_empty() {
            return false;
        }

        // Removed ranges use old-text indices; going back to front keeps
        // the earlier ones valid. What is left afterwards is exactly the
        // unchanged text, so added ranges (new-text indices) can then be
        // inserted front to back.
        for range in diff.removed.iter().rev() {
            self.remove_range(range);
        }
        for range in &diff.added {
            self.insert_range(range);
        }

        debug!(
            "Applied diff: -{} +{} ranges, words changed: {}",
            diff.removed.len(),
            diff.added.len(),
            diff.words_changed
        );
        self.dirty = true;
        diff.words_changed
    }

    /// Style of the char at `position`
    pub fn char_style(&self, position: usize) -> RetainSpanStyle {
        if position == 0 && self.achars.is_empty() {
            return self.start_style;
        }
        self.achars
            .get(position)
            .map(|a| a.style)
            .unwrap_or_default()
    }

    /// Style text inserted at `position` should get
    pub fn future_char_style(&self, position: usize) -> RetainSpanStyle {
        if position == 0 {
            return self.start_style;
        }
        self.achars
            .get(position - 1)
            .map(AnnotatedChar::future_style)
            .unwrap_or_default()
    }

    /// Paint `overlay` over `[start, end)`.
    ///
    /// An empty range sets the pending style at that position instead: the
    /// start style at 0, otherwise the next-char style of the preceding char.
    pub fn set_style(&mut self, start: usize, end: usize, overlay: &StyleOverride) {
        let (start, end) = (start.min(end), start.max(end));

        if start == end {
            if start == 0 {
                self.start_style = self.start_style.merge(overlay);
            } else if let Some(achar) = self.achars.get_mut(start - 1) {
                achar.next_char_style = Some(achar.future_style().merge(overlay));
            }
        } else {
            let end = end.min(self.achars.len());
            for achar in self.achars.iter_mut().take(end).skip(start) {
                achar.style = achar.style.merge(overlay);
            }
        }
        self.dirty = true;
    }

    /// Independent copy of `[start, end)`; the last char's pending style is dropped
    pub fn sub_sequence(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.achars.len());
        let start = start.min(end);
        let mut achars = self.achars[start..end].to_vec();

        if let Some(last) = achars.last_mut() {
            last.next_char_style = None;
        }
        Self::new(achars, RetainSpanStyle::default())
    }

    /// Split into `[0, position)` and `[position, len)`
    pub fn split(&self, position: usize) -> (Self, Self) {
        (
            self.sub_sequence(0, position),
            self.sub_sequence(position, self.achars.len()),
        )
    }

    /// Cell-by-cell comparison.
    ///
    /// Different lengths or different char/style are significant; pending
    /// style changes, including the start style, are small.
    pub fn difference(&self, other: &Self) -> Difference {
        if self.achars.len() != other.achars.len() {
            return Difference::Significant;
        }

        let achars_diff: Difference = self
            .achars
            .iter()
            .zip(&other.achars)
            .map(|(a, b)| a.difference(b))
            .sum();

        achars_diff + Difference::small_if(self.start_style != other.start_style)
    }

    /// Maximal runs of equal style, plus a zero-width range for a pending
    /// style at the end when it differs from the last char's style
    pub fn collapsed_span_styles(&self) -> Vec<SpanRange<RetainSpanStyle>> {
        let mut ranges: Vec<SpanRange<RetainSpanStyle>> = Vec::new();

        for (idx, achar) in self.achars.iter().enumerate() {
            match ranges.last_mut() {
                Some(range) if range.item == achar.style => range.end = idx + 1,
                _ => ranges.push(SpanRange::new(achar.style, idx, idx + 1)),
            }
        }

        let len = self.achars.len();
        match self.achars.last() {
            Some(last) => {
                if let Some(next) = last.next_char_style.filter(|next| *next != last.style) {
                    ranges.push(SpanRange::new(next, len, len));
                }
            }
            None if !self.start_style.is_default() => {
                ranges.push(SpanRange::new(self.start_style, 0, 0));
            }
            None => {}
        }

        ranges
    }

    /// Serialize to the per-character JSON form
    pub fn serialize(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse either JSON form, falling back to treating `source` as plain text
    pub fn deserialize(source: &str) -> Self {
        Self::deserialize_opt(source)
            .or_else(|| RetainAnnotatedString::deserialize_opt(source).map(|s| s.to_mutable()))
            .unwrap_or_else(|| Self::from(source))
    }

    /// Parse the per-character JSON form only
    pub fn deserialize_opt(source: &str) -> Option<Self> {
        match serde_json::from_str(source) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Not a mutable annotated string: {}", e);
                None
            }
        }
    }

    fn insert_range(&mut self, range: &SpanRange<String>) {
        let position = range.start.min(self.achars.len());
        let style = self.future_char_style(position);
        let new_achars: Vec<AnnotatedChar> = range.item.chars().map(|ch| AnnotatedChar::new(ch, style)).collect();

        self.achars.splice(position..position, new_achars);
    }

    fn remove_range(&mut self, range: &SpanRange<String>) {
        let end = range.end.min(self.achars.len());
        let start = range.start.min(end);

        self.achars.drain(start..end);
        if start == 0 {
            self.start_style = RetainSpanStyle::default();
        }
    }
}

impl From<&str> for RetainMutableAnnotatedString {
    fn from(text: &str) -> Self {
        Self::new(text.chars().map(AnnotatedChar::plain).collect(), RetainSpanStyle::default())
    }
}

impl From<String> for RetainMutableAnnotatedString {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl PartialEq for RetainMutableAnnotatedString {
    fn eq(&self, other: &Self) -> bool {
        self.achars == other.achars && self.start_style == other.start_style
    }
}

impl Eq for RetainMutableAnnotatedString {}

impl fmt::Display for RetainMutableAnnotatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for achar in &self.achars {
            write!(f, "{}", achar.ch)?;
        }
        Ok(())
    }
}

impl AnnotatedText for RetainMutableAnnotatedString {
    fn text(&self) -> String {
        RetainMutableAnnotatedString::text(self)
    }

    fn to_immutable(&self) -> RetainAnnotatedString {
        RetainAnnotatedString::with_span_styles(self.text(), self.collapsed_span_styles())
    }

    fn to_mutable(&self) -> RetainMutableAnnotatedString {
        self.clone()
    }
}
