//! Span styles
//!
//! [`RetainSpanStyle`] is a fully resolved style. [`StyleOverride`] is the
//! partial form used for painting: every field may be left unset, and
//! merging only adopts the fields that are set.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Relative text size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    Small,
    #[default]
    Normal,
    Large,
}

impl Size {
    /// Multiplier applied to the base font size
    pub fn scale(&self) -> f32 {
        match self {
            Size::Small => 0.75,
            Size::Normal => 1.0,
            Size::Large => 1.25,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Normal => "Normal",
            Size::Large => "Large",
        }
    }

    fn is_normal(&self) -> bool {
        *self == Size::Normal
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A resolved character style.
///
/// Serialized sparsely: `size` is left out when `Normal` and the flags are
/// left out when false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RetainSpanStyle {
    #[serde(skip_serializing_if = "Size::is_normal")]
    pub size: Size,
    #[serde(rename = "isBold", skip_serializing_if = "is_false")]
    pub is_bold: bool,
    #[serde(rename = "isItalic", skip_serializing_if = "is_false")]
    pub is_italic: bool,
    #[serde(rename = "isUnderlined", skip_serializing_if = "is_false")]
    pub is_underlined: bool,
}

impl RetainSpanStyle {
    pub fn new(size: Size, is_bold: bool, is_italic: bool, is_underlined: bool) -> Self {
        Self {
            size,
            is_bold,
            is_italic,
            is_underlined,
        }
    }

    /// Copy of `self` with every field set in `overlay` replaced
    pub fn merge(&self, overlay: &StyleOverride) -> Self {
        StyleOverride::from(*self).merge(overlay).resolve()
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for RetainSpanStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.size.name())?;
        if self.is_bold {
            write!(f, ", bold")?;
        }
        if self.is_italic {
            write!(f, ", italic")?;
        }
        if self.is_underlined {
            write!(f, ", underlined")?;
        }
        Ok(())
    }
}

/// A partial style; unset fields leave the base style untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleOverride {
    pub size: Option<Size>,
    pub is_bold: Option<bool>,
    pub is_italic: Option<bool>,
    pub is_underlined: Option<bool>,
}

impl StyleOverride {
    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn bold(value: bool) -> Self {
        Self {
            is_bold: Some(value),
            ..Default::default()
        }
    }

    pub fn italic(value: bool) -> Self {
        Self {
            is_italic: Some(value),
            ..Default::default()
        }
    }

    pub fn underlined(value: bool) -> Self {
        Self {
            is_underlined: Some(value),
            ..Default::default()
        }
    }

    /// Fields set in `other` win, the rest are kept
    pub fn merge(&self, other: &StyleOverride) -> Self {
        Self {
            size: other.size.or(self.size),
            is_bold: other.is_bold.or(self.is_bold),
            is_italic: other.is_italic.or(self.is_italic),
            is_underlined: other.is_underlined.or(self.is_underlined),
        }
    }

    /// Fill unset fields with defaults
    pub fn resolve(&self) -> RetainSpanStyle {
        RetainSpanStyle {
            size: self.size.unwrap_or_default(),
            is_bold: self.is_bold.unwrap_or(false),
            is_italic: self.is_italic.unwrap_or(false),
            is_underlined: self.is_underlined.unwrap_or(false),
        }
    }
}

impl From<RetainSpanStyle> for StyleOverride {
    fn from(style: RetainSpanStyle) -> Self {
        Self {
            size: Some(style.size),
            is_bold: Some(style.is_bold),
            is_italic: Some(style.is_italic),
            is_underlined: Some(style.is_underlined),
        }
    }
}

/// Fold overrides left to right (last set value wins per field) and resolve
pub fn merge_all<'a, I>(overrides: I) -> RetainSpanStyle
where
    I: IntoIterator<Item = &'a StyleOverride>,
{
    overrides
        .into_iter()
        .fold(StyleOverride::default(), |acc, style| acc.merge(style))
        .resolve()
}
