//! `Content-Range` header parsing

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CONTENT_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+) (\d+)-(\d+)/(\d+|\*)").expect("valid regex"));

/// Parsed `Content-Range` value, e.g. `bytes 0-99/200`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpContentRange {
    pub unit: String,
    pub range_start: u64,
    pub range_end: u64,
    /// Complete size, `None` when the server sent `*`
    pub size: Option<u64>,
}

impl HttpContentRange {
    pub fn parse(value: &str) -> Option<Self> {
        let caps = CONTENT_RANGE.captures(value)?;

        Some(Self {
            unit: caps[1].to_string(),
            range_start: caps[2].parse().ok()?,
            range_end: caps[3].parse().ok()?,
            size: match &caps[4] {
                "*" => None,
                size => Some(size.parse().ok()?),
            },
        })
    }
}
