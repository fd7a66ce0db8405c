//! Response with transfer metadata

use std::collections::HashMap;
use std::time::Duration;

use crate::content_range::HttpContentRange;

/// Decoded body plus what the server and the transfer reported
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub status: u16,
    pub status_message: Option<String>,
    pub content_range: Option<HttpContentRange>,
    /// Complete size from `Content-Range`, else `Content-Length`
    pub content_length: Option<u64>,
    pub headers: HashMap<String, Vec<String>>,
    pub data: T,
    pub elapsed: Duration,
    /// Transfer rate in KiB/s, when a body was read
    pub kbps: Option<u64>,
}

impl<T> Response<T> {
    /// Swap the body, keeping the metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status: self.status,
            status_message: self.status_message,
            content_range: self.content_range,
            content_length: self.content_length,
            headers: self.headers,
            data: f(self.data),
            elapsed: self.elapsed,
            kbps: self.kbps,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Response<U>, E> {
        let Response {
            status,
            status_message,
            content_range,
            content_length,
            headers,
            data,
            elapsed,
            kbps,
        } = self;

        Ok(Response {
            status,
            status_message,
            content_range,
            content_length,
            headers,
            data: f(data)?,
            elapsed,
            kbps,
        })
    }

    /// First value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}

/// KiB per second for `bytes` received in `elapsed`
pub(crate) fn kbps(bytes: usize, elapsed: Duration) -> Option<u64> {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return None;
    }
    Some((bytes as f64 / secs / 1024.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> Response<Vec<u8>> {
        Response {
            status: 200,
            status_message: Some("OK".into()),
            content_range: None,
            content_length: Some(2),
            headers: HashMap::from([("content-type".to_string(), vec!["text/plain".to_string()])]),
            data: b"hi".to_vec(),
            elapsed: Duration::from_millis(10),
            kbps: Some(0),
        }
    }

    #[test]
    fn test_map_keeps_metadata() {
        let mapped = response().map(|data| data.len());
        assert_eq!(mapped.data, 2);
        assert_eq!(mapped.status, 200);
        assert_eq!(mapped.content_length, Some(2));
    }

    #[test]
    fn test_try_map_error() {
        let result: Result<Response<String>, &str> = response().try_map(|_| Err("nope"));
        assert_eq!(result.unwrap_err(), "nope");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        assert_eq!(response().header("Content-Type"), Some("text/plain"));
        assert_eq!(response().header("X-Missing"), None);
    }

    #[test]
    fn test_kbps() {
        assert_eq!(kbps(2048, Duration::from_secs(1)), Some(2));
        assert_eq!(kbps(10, Duration::ZERO), None);
    }
}
