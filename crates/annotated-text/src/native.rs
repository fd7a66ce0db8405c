//! Rendering spans
//!
//! Converts relative styles into concrete font attributes a text widget
//! can draw, independent of any particular UI toolkit.

use serde::{Deserialize, Serialize};

use crate::immutable::RetainAnnotatedString;
use crate::range::SpanRange;
use crate::style::RetainSpanStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextDecoration {
    Underline,
}

/// Concrete font attributes; `None` means "inherit from the widget"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeSpanStyle {
    pub font_size: f32,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
}

impl NativeSpanStyle {
    pub fn from_style(style: &RetainSpanStyle, base_font_size: f32) -> Self {
        Self {
            font_size: base_font_size * style.size.scale(),
            font_weight: style.is_bold.then_some(FontWeight::Bold),
            font_style: style.is_italic.then_some(FontStyle::Italic),
            text_decoration: style.is_underlined.then_some(TextDecoration::Underline),
        }
    }
}

/// Text plus rendering spans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeAnnotatedString {
    pub text: String,
    pub span_styles: Vec<SpanRange<NativeSpanStyle>>,
}

impl NativeAnnotatedString {
    pub fn from_annotated(source: &RetainAnnotatedString, base_font_size: f32) -> Self {
        Self {
            text: source.as_str().to_string(),
            span_styles: source
                .span_styles()
                .iter()
                .map(|range| range.clone().map(|style| NativeSpanStyle::from_style(&style, base_font_size)))
                .collect(),
        }
    }
}
