//! Immutable annotated string
//!
//! Text plus collapsed style ranges; this is the storage and interchange
//! form of an annotated string.

use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::annotated_char::AnnotatedChar;
use crate::mutable::RetainMutableAnnotatedString;
use crate::range::SpanRange;
use crate::style::{merge_all, RetainSpanStyle, StyleOverride};
use crate::AnnotatedText;

#[derive(Deserialize)]
struct AnnotatedStringRepr {
    text: String,
    #[serde(rename = "spanStyles", default)]
    span_styles: Vec<SpanRange<RetainSpanStyle>>,
}

impl From<AnnotatedStringRepr> for RetainAnnotatedString {
    fn from(repr: AnnotatedStringRepr) -> Self {
        RetainAnnotatedString::with_span_styles(repr.text, repr.span_styles)
    }
}

/// Text with style ranges over char indices.
///
/// Ranges starting past the end of the text are dropped and the others are
/// clamped to it. A zero-width range at the very end holds the style
/// pending for text typed there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AnnotatedStringRepr")]
pub struct RetainAnnotatedString {
    text: String,
    #[serde(rename = "spanStyles", skip_serializing_if = "Vec::is_empty")]
    span_styles: Vec<SpanRange<RetainSpanStyle>>,
}

impl RetainAnnotatedString {
    /// Unstyled text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span_styles: Vec::new(),
        }
    }

    pub fn with_span_styles(text: impl Into<String>, span_styles: Vec<SpanRange<RetainSpanStyle>>) -> Self {
        let text = text.into();
        let length = text.chars().count();
        let span_styles = span_styles
            .into_iter()
            .filter_map(|range| range.limit(length))
            .collect();

        Self { text, span_styles }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.text.chars().nth(index)
    }

    pub fn span_styles(&self) -> &[SpanRange<RetainSpanStyle>] {
        &self.span_styles
    }

    /// Ranges that cover at least one char, in order
    pub fn non_empty_span_styles(&self) -> Vec<&SpanRange<RetainSpanStyle>> {
        self.span_styles
            .iter()
            .filter(|range| range.start != range.end)
            .collect()
    }

    /// Substring `[start, end)` with ranges cut and shifted to match
    pub fn sub_sequence(&self, start: usize, end: usize) -> Self {
        let length = self.len();
        let end = end.min(length);
        let start = start.min(end);

        if start == 0 && end == length {
            return self.clone();
        }

        let text: String = self.text.chars().skip(start).take(end - start).collect();
        let span_styles = self
            .span_styles
            .iter()
            .filter(|range| start.max(range.start) <= end.min(range.end))
            .map(|range| {
                SpanRange::new(
                    range.item,
                    start.max(range.start) - start,
                    end.min(range.end) - start,
                )
            })
            .collect();

        Self::with_span_styles(text, span_styles)
    }

    /// Serialize to the `{"text", "spanStyles"}` JSON form
    pub fn serialize(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse either JSON form, falling back to treating `source` as plain text
    pub fn deserialize(source: &str) -> Self {
        Self::deserialize_opt(source)
            .or_else(|| RetainMutableAnnotatedString::deserialize_opt(source).map(|s| s.to_immutable()))
            .unwrap_or_else(|| Self::new(source))
    }

    /// Parse the `{"text", "spanStyles"}` JSON form only
    pub fn deserialize_opt(source: &str) -> Option<Self> {
        match serde_json::from_str(source) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Not an immutable annotated string: {}", e);
                None
            }
        }
    }
}

impl From<&str> for RetainAnnotatedString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for RetainAnnotatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AnnotatedText for RetainAnnotatedString {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn to_immutable(&self) -> RetainAnnotatedString {
        self.clone()
    }

    /// Each char gets the merge of every range covering it, in range order.
    /// A zero-width range at the end becomes the pending style.
    fn to_mutable(&self) -> RetainMutableAnnotatedString {
        let length = self.len();
        let mut achars: Vec<AnnotatedChar> = self
            .text
            .chars()
            .enumerate()
            .map(|(idx, ch)| {
                let overrides: Vec<StyleOverride> = self
                    .span_styles
                    .iter()
                    .filter(|range| range.covers(idx))
                    .map(|range| StyleOverride::from(range.item))
                    .collect();
                AnnotatedChar::new(ch, merge_all(&overrides))
            })
            .collect();

        let pending = self
            .span_styles
            .iter()
            .rev()
            .find(|range| range.start == length && range.end == length)
            .map(|range| range.item);

        let mut start_style = RetainSpanStyle::default();
        match (pending, achars.last_mut()) {
            (Some(style), Some(last)) => last.next_char_style = Some(style),
            (Some(style), None) => start_style = style,
            (None, _) => {}
        }

        RetainMutableAnnotatedString::new(achars, start_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Size;

    fn bold() -> RetainSpanStyle {
        RetainSpanStyle::new(Size::Normal, true, false, false)
    }

    fn italic() -> RetainSpanStyle {
        RetainSpanStyle::new(Size::Normal, false, true, false)
    }

    #[test]
    fn test_plain_text_serialization() {
        let s = RetainAnnotatedString::new("hi");
        let json = s.serialize().unwrap();
        assert_eq!(json, r#"{"text":"hi"}"#);

        let back = RetainAnnotatedString::deserialize(&json);
        assert_eq!(back.as_str(), "hi");
        assert!(back.span_styles().is_empty());
    }

    #[test]
    fn test_ranges_are_limited_to_text() {
        let s = RetainAnnotatedString::with_span_styles(
            "abc",
            vec![
                SpanRange::new(bold(), 1, 10),
                SpanRange::new(italic(), 3, 3),
                SpanRange::new(italic(), 4, 6),
            ],
        );
        assert_eq!(
            s.span_styles(),
            &[SpanRange::new(bold(), 1, 3), SpanRange::new(italic(), 3, 3)]
        );

        let parsed = RetainAnnotatedString::deserialize(
            r#"{"text":"ab","spanStyles":[{"item":{"isBold":true},"start":0,"end":9}]}"#,
        );
        assert_eq!(parsed.span_styles(), &[SpanRange::new(bold(), 0, 2)]);
    }

    #[test]
    fn test_non_empty_span_styles() {
        let s = RetainAnnotatedString::with_span_styles(
            "ab",
            vec![SpanRange::new(bold(), 0, 2), SpanRange::new(italic(), 2, 2)],
        );
        assert_eq!(s.non_empty_span_styles(), vec![&SpanRange::new(bold(), 0, 2)]);
    }

    #[test]
    fn test_overlapping_ranges_merge_in_order() {
        let s = RetainAnnotatedString::with_span_styles(
            "abcd",
            vec![SpanRange::new(bold(), 0, 3), SpanRange::new(italic(), 2, 4)],
        );
        let m = s.to_mutable();

        assert_eq!(m.char_style(0), bold());
        // the later range is fully resolved, so it wins every field
        assert_eq!(m.char_style(2), italic());
        assert_eq!(m.char_style(3), italic());
    }

    #[test]
    fn test_pending_style_round_trip() {
        let s = RetainAnnotatedString::with_span_styles(
            "ab",
            vec![SpanRange::new(RetainSpanStyle::default(), 0, 2), SpanRange::new(bold(), 2, 2)],
        );
        let m = s.to_mutable();
        assert_eq!(m.future_char_style(2), bold());
        assert_eq!(m.to_immutable(), s);

        let empty = RetainAnnotatedString::with_span_styles("", vec![SpanRange::new(italic(), 0, 0)]);
        let m = empty.to_mutable();
        assert_eq!(m.start_style(), italic());
        assert_eq!(m.to_immutable(), empty);
    }

    #[test]
    fn test_sub_sequence() {
        let s = RetainAnnotatedString::with_span_styles(
            "hello world",
            vec![SpanRange::new(bold(), 0, 5), SpanRange::new(italic(), 6, 11)],
        );

        let sub = s.sub_sequence(3, 8);
        assert_eq!(sub.as_str(), "lo wo");
        assert_eq!(
            sub.span_styles(),
            &[SpanRange::new(bold(), 0, 2), SpanRange::new(italic(), 3, 5)]
        );

        assert_eq!(s.sub_sequence(0, 11), s);
    }

    #[test]
    fn test_multibyte_text_uses_char_indices() {
        let s = RetainAnnotatedString::with_span_styles("åäö", vec![SpanRange::new(bold(), 1, 3)]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.get(2), Some('ö'));
        assert_eq!(s.sub_sequence(1, 2).as_str(), "ä");
        assert_eq!(s.to_mutable().char_style(2), bold());
    }

    #[test]
    fn test_deserialize_from_mutable_form() {
        let json = r#"{"achars":[{"char":"o","style":{"size":"Large"}},{"char":"k","style":{}}],"startStyle":{}}"#;
        let s = RetainAnnotatedString::deserialize(json);

        assert_eq!(s.as_str(), "ok");
        assert_eq!(
            s.span_styles(),
            &[
                SpanRange::new(RetainSpanStyle::new(Size::Large, false, false, false), 0, 1),
                SpanRange::new(RetainSpanStyle::default(), 1, 2),
            ]
        );
    }

    #[test]
    fn test_deserialize_never_fails() {
        assert_eq!(RetainAnnotatedString::deserialize("{broken").as_str(), "{broken");
        assert_eq!(RetainAnnotatedString::deserialize("").as_str(), "");
        assert!(RetainAnnotatedString::deserialize_opt("[1,2]").is_none());
    }
}
