//! Outbound HTTP to the dashboard backend.
//!
//! Every browser-facing API route ends in exactly one call through
//! [`BackendClient::send`]: no retries, no fan-out, timeout only when
//! configured.

pub mod forward;

pub use forward::{Forward, OnSuccess};

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::BackendConfig;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned a malformed body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend answered {0}")]
    Rejected(StatusCode),

    #[error("invalid backend base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("path segment '{0}' does not name a single resource")]
    InvalidSegment(String),
}

/// Path on the backend, kept as segments so dynamic parts get
/// percent-encoded instead of spliced into the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
}

impl Endpoint {
    /// Static path such as `/api/whatsapp/instances`.
    pub fn path(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Append one segment; `/` inside it is encoded, not treated as a separator.
    /// Dot and empty segments are refused when the URL is built.
    pub fn push(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

fn is_dot_or_empty(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    matches!(decoded.as_str(), "" | "." | "..")
}

/// Shared connection pool used for every outbound call.
pub fn build_http_client(config: &BackendConfig) -> Result<reqwest::Client, UpstreamError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// JSON client bound to one base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, http: reqwest::Client) -> Result<Self, UpstreamError> {
        let base = Url::parse(base_url).map_err(|_| UpstreamError::InvalidBaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base })
    }

    pub fn url(&self, endpoint: &Endpoint) -> Result<Url, UpstreamError> {
        // The url crate drops `.` and `..` segments instead of encoding them
        if let Some(segment) = endpoint.segments.iter().find(|s| is_dot_or_empty(s)) {
            return Err(UpstreamError::InvalidSegment(segment.clone()));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(endpoint.segments.iter());
        Ok(url)
    }

    /// Issue one request. `cookie` becomes the outbound `Cookie` header
    /// verbatim; the incoming header is never copied wholesale.
    pub async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        cookie: Option<&str>,
        body: Option<&Value>,
    ) -> Result<UpstreamReply, UpstreamError> {
        let url = self.url(endpoint)?;
        tracing::debug!(%method, %url, "Calling backend");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::info!(%method, path = %endpoint, status = status.as_u16(), "Backend responded");

        Ok(UpstreamReply { status, headers, body })
    }

    /// GET and decode, treating any non-success status as an error.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        cookie: Option<&str>,
    ) -> Result<T, UpstreamError> {
        let reply = self.send(Method::GET, endpoint, cookie, None).await?;
        if !reply.is_success() {
            return Err(UpstreamError::Rejected(reply.status));
        }
        reply.parse()
    }
}

/// Raw backend answer, body still undecoded.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json(&self) -> Result<Value, UpstreamError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, UpstreamError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Best-effort error text from a rejected call. Non-JSON bodies yield
    /// the fallback.
    pub fn error_message(&self, fallback: &str) -> String {
        self.json()
            .ok()
            .as_ref()
            .and_then(extract_message)
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn set_cookies(&self) -> impl Iterator<Item = &HeaderValue> {
        self.headers.get_all(header::SET_COOKIE).iter()
    }
}

/// `message`, else `error` when it is a string, else `error.message`.
pub fn extract_message(body: &Value) -> Option<&str> {
    fn non_empty(v: &Value) -> Option<&str> {
        v.as_str().filter(|s| !s.is_empty())
    }

    if let Some(message) = body.get("message").and_then(non_empty) {
        return Some(message);
    }
    match body.get("error") {
        Some(error) if error.is_string() => non_empty(error),
        Some(error) => error.get("message").and_then(non_empty),
        None => None,
    }
}
