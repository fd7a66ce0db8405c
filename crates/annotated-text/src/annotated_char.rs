//! A single styled character

use serde::{Deserialize, Serialize};
use retain_theme_core::Difference;

use crate::style::RetainSpanStyle;

/// One character with its resolved style.
///
/// `next_char_style` only matters for the char right before the cursor: it
/// is the style newly typed text will get instead of `style`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedChar {
    #[serde(rename = "char")]
    pub ch: char,
    #[serde(default)]
    pub style: RetainSpanStyle,
    #[serde(rename = "nextCharStyle", default, skip_serializing_if = "Option::is_none")]
    pub next_char_style: Option<RetainSpanStyle>,
}

impl AnnotatedChar {
    pub fn new(ch: char, style: RetainSpanStyle) -> Self {
        Self {
            ch,
            style,
            next_char_style: None,
        }
    }

    pub fn plain(ch: char) -> Self {
        Self::new(ch, RetainSpanStyle::default())
    }

    /// Style text typed right after this char should get
    pub fn future_style(&self) -> RetainSpanStyle {
        self.next_char_style.unwrap_or(self.style)
    }

    /// Char or style changes are significant, a changed pending style is small
    pub fn difference(&self, other: &AnnotatedChar) -> Difference {
        if self.ch != other.ch || self.style != other.style {
            Difference::Significant
        } else {
            Difference::small_if(self.next_char_style != other.next_char_style)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Size;

    #[test]
    fn test_difference() {
        let a = AnnotatedChar::plain('a');
        let mut b = a.clone();
        assert_eq!(a.difference(&b), Difference::None);

        b.next_char_style = Some(RetainSpanStyle::new(Size::Large, false, false, false));
        assert_eq!(a.difference(&b), Difference::Small);

        b.style.is_bold = true;
        assert_eq!(a.difference(&b), Difference::Significant);
        assert_eq!(a.difference(&AnnotatedChar::plain('b')), Difference::Significant);
    }

    #[test]
    fn test_json_shape() {
        let mut achar = AnnotatedChar::plain('x');
        assert_eq!(serde_json::to_string(&achar).unwrap(), r#"{"char":"x","style":{}}"#);

        achar.next_char_style = Some(RetainSpanStyle::new(Size::Normal, true, false, false));
        let json = serde_json::to_string(&achar).unwrap();
        assert_eq!(json, r#"{"char":"x","style":{},"nextCharStyle":{"isBold":true}}"#);
        assert_eq!(serde_json::from_str::<AnnotatedChar>(&json).unwrap(), achar);
    }

    #[test]
    fn test_future_style_falls_back_to_own_style() {
        let mut achar = AnnotatedChar::new('x', RetainSpanStyle::new(Size::Small, false, false, false));
        assert_eq!(achar.future_style().size, Size::Small);

        achar.next_char_style = Some(RetainSpanStyle::default());
        assert_eq!(achar.future_style(), RetainSpanStyle::default());
    }
}
