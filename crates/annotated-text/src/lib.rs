//! Retain Theme Annotated Text
//!
//! Rich-text model for text fields with:
//! - Per-character styles and a pending "next char" style for typing
//! - Incremental updates from plain text snapshots through a char diff
//! - Collapsed span form for storage and rendering
//! - Change significance between snapshots

pub mod annotated_char;
pub mod immutable;
pub mod mutable;
pub mod native;
pub mod range;
pub mod state;
pub mod string_diff;
pub mod style;

pub use annotated_char::AnnotatedChar;
pub use immutable::RetainAnnotatedString;
pub use mutable::RetainMutableAnnotatedString;
pub use native::{FontStyle, FontWeight, NativeAnnotatedString, NativeSpanStyle, TextDecoration};
pub use range::SpanRange;
pub use state::{RetainAnnotatedStringState, SavedState, TextFieldValue, TextRange};
pub use string_diff::{text_difference, StringDiff};
pub use style::{merge_all, RetainSpanStyle, Size, StyleOverride};

use retain_theme_core::Difference;

/// Behaviour shared by both annotated string forms
pub trait AnnotatedText {
    /// Plain text content
    fn text(&self) -> String;

    /// Collapsed span form
    fn to_immutable(&self) -> RetainAnnotatedString;

    /// Per-character form
    fn to_mutable(&self) -> RetainMutableAnnotatedString;

    /// How much `other` differs from `self`, text and styles combined.
    ///
    /// Style changes that only touch zero-width spans (pending styles) are
    /// `Small`; any change to a non-empty span, bounds included, is
    /// `Significant`.
    fn diff<T: AnnotatedText + ?Sized>(&self, other: &T) -> Difference {
        let this = self.to_immutable();
        let other_immutable = other.to_immutable();

        let style_diff = Difference::significant_if(
            this.non_empty_span_styles() != other_immutable.non_empty_span_styles(),
        ) + Difference::small_if(this.span_styles() != other_immutable.span_styles());

        text_difference(this.as_str(), other_immutable.as_str()) + style_diff
    }

    /// Rendering spans for a host text widget
    fn to_native(&self, base_font_size: f32) -> NativeAnnotatedString {
        NativeAnnotatedString::from_annotated(&self.to_immutable(), base_font_size)
    }
}

/// Difference between two optional snapshots; one missing side is significant
pub fn diff_optional<A, B>(a: Option<&A>, b: Option<&B>) -> Difference
where
    A: AnnotatedText + ?Sized,
    B: AnnotatedText + ?Sized,
{
    match (a, b) {
        (Some(a), Some(b)) => a.diff(b),
        (None, None) => Difference::None,
        _ => Difference::Significant,
    }
}
