//! Retain Theme Core - shared types
//!
//! This crate provides the pieces every other Retain Theme crate leans on:
//! the change-significance lattice, the error type, application
//! configuration and the snackbar message queue.

pub mod config;
pub mod difference;
pub mod error;
pub mod snackbar;

pub use config::{AppConfig, RequestConfig, TextConfig};
pub use difference::Difference;
pub use error::{RetainError, Result};
pub use snackbar::{SnackbarDuration, SnackbarEngine, SnackbarKind, SnackbarMessage, SnackbarResult};

/// Retain Theme version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const APP_NAME: &str = "Retain Theme";
