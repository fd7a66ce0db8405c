//! Retain Theme Request
//!
//! Thin HTTP client wrapper:
//! - Query parameters and JSON / form bodies
//! - Connect and read timeouts from configuration
//! - Typed bodies: text, bytes, JSON, images
//! - Transfer timing and `Content-Range` metadata

pub mod content_range;
pub mod error;
pub mod request;
pub mod response;

pub use content_range::HttpContentRange;
pub use error::RequestError;
pub use request::{Method, Request, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS};
pub use response::Response;
