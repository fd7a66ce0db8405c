//! Request errors

use thiserror::Error;

use crate::request::Method;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        method: Method,
        #[source]
        source: url::ParseError,
    },

    #[error("{method} {url} failed: {source}")]
    Connection {
        url: String,
        method: Method,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned HTTP {status}: {message}")]
    Http {
        url: String,
        method: Method,
        status: u16,
        message: String,
    },

    #[error("{method} {url}: could not decode body: {message}")]
    Decode {
        url: String,
        method: Method,
        message: String,
    },
}

impl RequestError {
    pub fn url(&self) -> &str {
        match self {
            RequestError::InvalidUrl { url, .. }
            | RequestError::Connection { url, .. }
            | RequestError::Http { url, .. }
            | RequestError::Decode { url, .. } => url,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            RequestError::InvalidUrl { method, .. }
            | RequestError::Connection { method, .. }
            | RequestError::Http { method, .. }
            | RequestError::Decode { method, .. } => *method,
        }
    }

    /// True for transport failures and HTTP error statuses
    pub fn is_connection_error(&self) -> bool {
        matches!(self, RequestError::Connection { .. } | RequestError::Http { .. })
    }

    /// HTTP status code, for `Http` errors only
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_accessors() {
        let err = RequestError::Http {
            url: "https://example.com/a".into(),
            method: Method::Post,
            status: 404,
            message: "Not Found".into(),
        };

        assert_eq!(err.url(), "https://example.com/a");
        assert_eq!(err.method(), Method::Post);
        assert_eq!(err.status(), Some(404));
        assert!(err.is_connection_error());
        assert_eq!(err.to_string(), "POST https://example.com/a returned HTTP 404: Not Found");
    }

    #[test]
    fn test_decode_error_is_not_connection_error() {
        let err = RequestError::Decode {
            url: "https://example.com".into(),
            method: Method::Get,
            message: "expected value".into(),
        };
        assert!(!err.is_connection_error());
        assert_eq!(err.status(), None);
    }
}
