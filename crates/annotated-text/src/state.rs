//! Text field binding
//!
//! Couples a mutable annotated string with the selection and composition
//! reported by a host text field. The host feeds every field change to
//! [`RetainAnnotatedStringState::on_text_field_value_change`] and renders
//! from [`RetainAnnotatedStringState::native_annotated_string`].

use serde::{Deserialize, Serialize};
use retain_theme_core::Difference;

use crate::mutable::RetainMutableAnnotatedString;
use crate::native::NativeAnnotatedString;
use crate::style::{RetainSpanStyle, StyleOverride};
use crate::AnnotatedText;

/// A selection or composition range in char indices.
///
/// `start` is the anchor and may be greater than `end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a collapsed range (a cursor)
    pub fn cursor(position: usize) -> Self {
        Self::new(position, position)
    }

    /// Check if the range is collapsed
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    pub fn len(&self) -> usize {
        self.max() - self.min()
    }
}

/// Snapshot exchanged with the host text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFieldValue {
    pub text: String,
    pub selection: TextRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<TextRange>,
}

impl TextFieldValue {
    pub fn new(text: impl Into<String>, selection: TextRange) -> Self {
        Self {
            text: text.into(),
            selection,
            composition: None,
        }
    }
}

/// Persistable form of a [`RetainAnnotatedStringState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(rename = "serializedValue")]
    pub serialized_value: String,
    #[serde(rename = "textFieldValue")]
    pub text_field_value: TextFieldValue,
    #[serde(rename = "baseFontSize")]
    pub base_font_size: f32,
}

/// Annotated string bound to a text field
#[derive(Debug, Clone)]
pub struct RetainAnnotatedStringState {
    mutable_string: RetainMutableAnnotatedString,
    base_font_size: f32,
    selection: TextRange,
    composition: Option<TextRange>,
}

impl RetainAnnotatedStringState {
    /// Create a state with the cursor at the end of the text
    pub fn new(mutable_string: RetainMutableAnnotatedString, base_font_size: f32) -> Self {
        let selection = TextRange::cursor(mutable_string.len());
        Self {
            mutable_string,
            base_font_size,
            selection,
            composition: None,
        }
    }

    pub fn with_selection(mut self, selection: TextRange) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_composition(mut self, composition: Option<TextRange>) -> Self {
        self.composition = composition;
        self
    }

    pub fn mutable_string(&self) -> &RetainMutableAnnotatedString {
        &self.mutable_string
    }

    pub fn mutable_string_mut(&mut self) -> &mut RetainMutableAnnotatedString {
        &mut self.mutable_string
    }

    pub fn base_font_size(&self) -> f32 {
        self.base_font_size
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn composition(&self) -> Option<TextRange> {
        self.composition
    }

    pub fn text(&self) -> String {
        self.mutable_string.text()
    }

    pub fn text_field_value(&self) -> TextFieldValue {
        TextFieldValue {
            text: self.text(),
            selection: self.selection,
            composition: self.composition,
        }
    }

    pub fn native_annotated_string(&self) -> NativeAnnotatedString {
        self.mutable_string.to_native(self.base_font_size)
    }

    /// Style shown for the selection: the pending style at a cursor, the
    /// style of the first selected char otherwise
    pub fn selection_start_style(&self) -> RetainSpanStyle {
        if self.selection.is_collapsed() {
            self.mutable_string.future_char_style(self.selection.start)
        } else {
            self.mutable_string.char_style(self.selection.min())
        }
    }

    /// Take in a change from the text field.
    ///
    /// Returns true when the text itself changed, which is when the host
    /// should treat the value as edited.
    pub fn on_text_field_value_change(&mut self, value: &TextFieldValue) -> bool {
        let text_changed = value.text != self.mutable_string.text();

        if text_changed {
            self.mutable_string.apply_diff(&value.text);
        }
        self.selection = value.selection;
        self.composition = value.composition;

        text_changed
    }

    /// Paint the current selection, or set the pending style at the cursor
    pub fn set_style(&mut self, overlay: &StyleOverride) {
        self.mutable_string
            .set_style(self.selection.min(), self.selection.max(), overlay);
    }

    pub fn split_at_selection_start(&self) -> (RetainMutableAnnotatedString, RetainMutableAnnotatedString) {
        self.mutable_string.split(self.selection.min())
    }

    /// String difference, plus `Small` when only the selection moved
    pub fn diff(&self, other: &RetainAnnotatedStringState) -> Difference {
        self.mutable_string.diff(&other.mutable_string)
            + Difference::small_if(self.selection != other.selection)
    }

    pub fn save(&self) -> serde_json::Result<SavedState> {
        Ok(SavedState {
            serialized_value: self.mutable_string.serialize()?,
            text_field_value: self.text_field_value(),
            base_font_size: self.base_font_size,
        })
    }

    /// Rebuild from a saved state; the string itself is recovered leniently
    pub fn restore(saved: &SavedState) -> Self {
        let mutable_string = RetainMutableAnnotatedString::deserialize(&saved.serialized_value);
        Self::new(mutable_string, saved.base_font_size)
            .with_selection(saved.text_field_value.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Size;

    fn state(text: &str) -> RetainAnnotatedStringState {
        RetainAnnotatedStringState::new(RetainMutableAnnotatedString::from(text), 16.0)
    }

    #[test]
    fn test_default_selection_is_end_of_text() {
        let s = state("hello");
        assert_eq!(s.selection(), TextRange::cursor(5));
        assert_eq!(s.text_field_value().text, "hello");
    }

    #[test]
    fn test_typing_with_pending_style() {
        let mut s = state("ab");
        s.set_style(&StyleOverride::bold(true));
        assert!(s.selection_start_style().is_bold);

        let changed = s.on_text_field_value_change(&TextFieldValue::new("abc", TextRange::cursor(3)));
        assert!(changed);
        assert!(s.mutable_string().char_style(2).is_bold);
        assert!(!s.mutable_string().char_style(1).is_bold);
        assert_eq!(s.selection(), TextRange::cursor(3));
    }

    #[test]
    fn test_selection_only_change() {
        let mut s = state("abc");
        let changed = s.on_text_field_value_change(&TextFieldValue::new("abc", TextRange::new(0, 2)));
        assert!(!changed);
        assert_eq!(s.selection(), TextRange::new(0, 2));
    }

    #[test]
    fn test_set_style_on_reversed_selection() {
        let mut s = state("abcd").with_selection(TextRange::new(3, 1));
        s.set_style(&StyleOverride::size(Size::Large));

        assert_eq!(s.mutable_string().char_style(0).size, Size::Normal);
        assert_eq!(s.mutable_string().char_style(1).size, Size::Large);
        assert_eq!(s.mutable_string().char_style(2).size, Size::Large);
        assert_eq!(s.selection_start_style().size, Size::Large);
    }

    #[test]
    fn test_diff_counts_selection() {
        let a = state("abc");
        let b = a.clone().with_selection(TextRange::cursor(1));
        assert_eq!(a.diff(&a.clone()), Difference::None);
        assert_eq!(a.diff(&b), Difference::Small);
    }

    #[test]
    fn test_split_at_selection_start() {
        let s = state("hello world").with_selection(TextRange::new(8, 6));
        let (left, right) = s.split_at_selection_start();
        assert_eq!(left.text(), "hello ");
        assert_eq!(right.text(), "world");
    }

    #[test]
    fn test_save_and_restore() {
        let mut s = state("ab").with_selection(TextRange::new(0, 1));
        s.set_style(&StyleOverride::italic(true));

        let saved = s.save().unwrap();
        let json = serde_json::to_string(&saved).unwrap();
        assert!(json.contains("\"serializedValue\""));

        let saved: SavedState = serde_json::from_str(&json).unwrap();
        let restored = RetainAnnotatedStringState::restore(&saved);
        assert_eq!(restored.text(), "ab");
        assert_eq!(restored.selection(), TextRange::new(0, 1));
        assert!(restored.mutable_string().char_style(0).is_italic);
        assert_eq!(restored.base_font_size(), 16.0);
    }

    #[test]
    fn test_native_annotated_string() {
        let mut s = state("ab").with_selection(TextRange::new(0, 2));
        s.set_style(&StyleOverride::size(Size::Small));

        let native = s.native_annotated_string();
        assert_eq!(native.span_styles[0].item.font_size, 12.0);
    }
}
