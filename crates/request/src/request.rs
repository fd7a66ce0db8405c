//! HTTP Request
//!
//! One-shot requests with per-request timeouts. Every `get_*` call sends the
//! request, fails on transport errors and HTTP statuses >= 400, reads the
//! whole body and logs the timing unless logs are suppressed.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use url::Url;

use retain_theme_core::RequestConfig;

use crate::content_range::HttpContentRange;
use crate::error::RequestError;
use crate::response::{kbps, Response};

/// Default connection timeout in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 4_050;
/// Default read timeout in milliseconds
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether a body is sent with this method
    pub fn has_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// HTTP request description
#[derive(Debug, Clone)]
pub struct Request {
    url: String,
    params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    method: Method,
    body: Option<String>,
    connect_timeout: Duration,
    read_timeout: Duration,
    suppress_logs: bool,
}

impl Request {
    /// GET request with default timeouts
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
            headers: Vec::new(),
            method: Method::Get,
            body: None,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            suppress_logs: false,
        }
    }

    /// POST with `json` serialized as the body
    pub fn post_json<T: Serialize + ?Sized>(url: impl Into<String>, json: &T) -> serde_json::Result<Self> {
        Ok(Self::new(url)
            .method(Method::Post)
            .header(CONTENT_TYPE.as_str(), "application/json")
            .body(serde_json::to_string(json)?))
    }

    /// POST with `form` url-encoded as the body
    pub fn post_form_data<K, V>(url: impl Into<String>, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();

        Self::new(url)
            .method(Method::Post)
            .header(CONTENT_TYPE.as_str(), "application/x-www-form-urlencoded")
            .body(body)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a query parameter, appended after any query already in the url
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn suppress_logs(mut self, suppress: bool) -> Self {
        self.suppress_logs = suppress;
        self
    }

    /// Apply timeouts, log suppression and user agent from configuration
    pub fn with_config(self, config: &RequestConfig) -> Self {
        let request = self
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .read_timeout(Duration::from_millis(config.read_timeout_ms))
            .suppress_logs(config.suppress_logs);

        match &config.user_agent {
            Some(agent) => request.header(USER_AGENT.as_str(), agent.as_str()),
            None => request,
        }
    }

    pub fn get_method(&self) -> Method {
        self.method
    }

    /// Full url including query parameters
    pub fn url(&self) -> Result<Url, RequestError> {
        let mut url = Url::parse(&self.url).map_err(|source| RequestError::InvalidUrl {
            url: self.url.clone(),
            method: self.method,
            source,
        })?;

        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }

    pub async fn get_bytes(&self) -> Result<Response<Vec<u8>>, RequestError> {
        let url = self.url()?;
        let started = Instant::now();
        let response = self.connect(&url).await?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(HttpContentRange::parse);
        let content_length = content_range.as_ref().and_then(|range| range.size).or_else(|| {
            response
                .headers()
                .get(CONTENT_LENGTH)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok())
        });

        let data = response
            .bytes()
            .await
            .map_err(|source| self.connection_error(&url, source))?
            .to_vec();

        let elapsed = started.elapsed();
        let kbps = kbps(data.len(), elapsed);
        if !self.suppress_logs {
            debug!(
                "FINISH {} {}: {:.3}s, {}B ({} KB/s)",
                self.method,
                url,
                elapsed.as_secs_f64(),
                data.len(),
                kbps.unwrap_or(0)
            );
        }

        Ok(Response {
            status: status.as_u16(),
            status_message: status.canonical_reason().map(str::to_string),
            content_range,
            content_length,
            headers,
            data,
            elapsed,
            kbps,
        })
    }

    pub async fn get_string(&self) -> Result<Response<String>, RequestError> {
        let url = self.url()?;
        self.get_bytes()
            .await?
            .try_map(|data| String::from_utf8(data).map_err(|e| self.decode_error(&url, e)))
    }

    pub async fn get_json<T: DeserializeOwned>(&self) -> Result<Response<T>, RequestError> {
        let url = self.url()?;
        self.get_bytes()
            .await?
            .try_map(|data| serde_json::from_slice(&data).map_err(|e| self.decode_error(&url, e)))
    }

    /// Untyped JSON body
    pub async fn get_json_value(&self) -> Result<Response<serde_json::Value>, RequestError> {
        self.get_json().await
    }

    /// Like [`Self::get_json`], logging the failure and returning `None` instead
    pub async fn get_json_opt<T: DeserializeOwned>(&self) -> Option<Response<T>> {
        match self.get_json().await {
            Ok(response) => Some(response),
            Err(e) => {
                if !self.suppress_logs {
                    error!("get_json_opt(): {} {}: {}", self.method, self.url, e);
                }
                None
            }
        }
    }

    /// Body decoded as an image in any format the `image` crate detects
    pub async fn get_image(&self) -> Result<Response<image::DynamicImage>, RequestError> {
        let url = self.url()?;
        self.get_bytes()
            .await?
            .try_map(|data| image::load_from_memory(&data).map_err(|e| self.decode_error(&url, e)))
    }

    async fn connect(&self, url: &Url) -> Result<reqwest::Response, RequestError> {
        if !self.suppress_logs {
            debug!("START {} {}", self.method, url);
            if let Some(body) = &self.body {
                debug!("BODY {}", body);
            }
        }

        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout)
            .build()
            .map_err(|source| self.connection_error(url, source))?;

        let mut builder = client.request(self.method.into(), url.clone());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let (Some(body), true) = (&self.body, self.method.has_body()) {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|source| self.connection_error(url, source))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(RequestError::Http {
                url: url.to_string(),
                method: self.method,
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(response)
    }

    fn connection_error(&self, url: &Url, source: reqwest::Error) -> RequestError {
        RequestError::Connection {
            url: url.to_string(),
            method: self.method,
            source,
        }
    }

    fn decode_error(&self, url: &Url, e: impl fmt::Display) -> RequestError {
        RequestError::Decode {
            url: url.to_string(),
            method: self.method,
            message: e.to_string(),
        }
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut collected: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            collected
                .entry(name.as_str().to_string())
                .or_default()
                .push(value.to_string());
        }
    }
    collected
}
