//! Retain Theme
//!
//! Rich-text editing model for text fields, with the small helpers an app
//! built around it needs.
//!
//! ## Architecture
//!
//! - `retain-theme-core`: change significance, errors, configuration and
//!   the snackbar queue
//! - `retain-theme-annotated-text`: mutable and immutable annotated
//!   strings, diff application and text field binding
//! - `retain-theme-request`: HTTP request wrapper

#![warn(clippy::all)]

pub mod commands;

pub use retain_theme_annotated_text as text;
pub use retain_theme_core as core;
pub use retain_theme_request as request;

/// Prelude module for convenient imports
pub mod prelude {
    pub use retain_theme_annotated_text::{
        AnnotatedText, RetainAnnotatedString, RetainAnnotatedStringState, RetainMutableAnnotatedString,
        RetainSpanStyle, Size, StyleOverride, TextFieldValue, TextRange,
    };
    pub use retain_theme_core::{AppConfig, Difference, SnackbarEngine, SnackbarKind, SnackbarResult};
    pub use retain_theme_request::{Method, Request, RequestError, Response};
}
