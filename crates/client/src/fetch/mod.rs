//! The network primitive behind the cache controller.
//!
//! ### Shape
//! - [`ResourceRequest`]: method + canonical URL, the identity a cache
//!   entry is keyed by.
//! - [`Network`]: the async seam the controller fetches through. Transport
//!   failures are errors; HTTP error statuses are ordinary responses so the
//!   interceptor can pass them through uncached.
//! - [`HttpFetcher`]: reqwest-backed implementation with timeout, redirect
//!   and body-size limits.
//!
//! ### Response classification
//! A response is `basic` when its final URL shares the configured scope
//! origin, otherwise `cors`. Only `basic`/`cors` responses with status 200
//! are eligible for write-back.

pub mod url;

use bytes::Bytes;
use reqwest::Url;
use reqwest::{Client, StatusCode, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, canonicalize, same_origin};

use offcache_core::cache::compute_request_key;
use offcache_core::{Error, ResponseKind, ResponseSnapshot};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Origin of the controlled scope; same-origin responses classify as basic.
    pub scope_origin: Url,

    /// User agent string (default: "offcache/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            scope_origin: Url::parse("http://localhost:8080").expect("static origin"),
            user_agent: "offcache/0.1".to_string(),
            max_bytes: 5 * 1024 * 1024,
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

/// An outbound resource request: identity is method + canonical URL.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// HTTP method; caching treats everything as GET.
    pub method: String,
    /// Canonicalized URL.
    pub url: Url,
}

impl ResourceRequest {
    /// A GET request for an absolute URL.
    pub fn get(input: &str) -> Result<Self, UrlError> {
        Ok(Self { method: "GET".to_string(), url: canonicalize(input)? })
    }

    /// A GET request for a manifest entry, resolved against the scope origin.
    ///
    /// Accepts both relative entries ("./", "./manifest.json") and absolute
    /// URLs; absolute entries ignore the scope.
    pub fn get_in_scope(scope: &Url, entry: &str) -> Result<Self, UrlError> {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            return Err(UrlError::Empty);
        }
        let joined = scope
            .join(trimmed)
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
        Ok(Self { method: "GET".to_string(), url: canonicalize(joined.as_str())? })
    }

    /// The cache key for this request.
    pub fn key(&self) -> String {
        compute_request_key(&self.method, self.url.as_str())
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// The original URL requested
    pub url: Url,
    /// The final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Classification relative to the scope origin
    pub kind: ResponseKind,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response headers
    pub headers: header::HeaderMap,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

impl FetchedResponse {
    /// Convert into a storable snapshot.
    ///
    /// The body buffer is read exactly once into owned bytes; the snapshot
    /// and any clones of it are independent values from then on.
    pub fn into_snapshot(self, method: &str) -> ResponseSnapshot {
        let headers_json = headers_to_json(&self.headers);
        ResponseSnapshot {
            request_key: compute_request_key(method, self.url.as_str()),
            method: method.to_string(),
            url: self.url.to_string(),
            final_url: self.final_url.to_string(),
            status: self.status.as_u16(),
            kind: self.kind,
            content_type: self.content_type,
            headers_json,
            body: self.bytes.to_vec(),
            stored_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn headers_to_json(headers: &header::HeaderMap) -> Option<String> {
    if headers.is_empty() {
        return None;
    }
    let map: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), serde_json::Value::String(v.to_string())))
        })
        .collect();
    serde_json::to_string(&map).ok()
}

/// The host network primitive: exactly one attempt per call, no retries.
#[async_trait::async_trait]
pub trait Network: Send + Sync {
    /// Issue the request to the network.
    ///
    /// Errors mean the transport failed (DNS, connect, timeout, read);
    /// error statuses come back as responses.
    async fn fetch(&self, request: &ResourceRequest) -> Result<FetchedResponse, Error>;
}

/// HTTP fetch client backed by reqwest.
pub struct HttpFetcher {
    http: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl Network for HttpFetcher {
    async fn fetch(&self, request: &ResourceRequest) -> Result<FetchedResponse, Error> {
        let start = Instant::now();
        let url = request.url.clone();

        let response = self
            .http
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| Error::Network(format!("network error: {}", e)))?;

        let status = response.status();

        let content_length = response.content_length();
        if let Some(len) = content_length
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let final_url = response.url().clone();
        let headers = response.headers().clone();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("failed to read response: {}", e)))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!(
                "{} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let kind = if same_origin(&final_url, &self.config.scope_origin) {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        };

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "fetched {} -> {} {} ({:?}) in {}ms ({} bytes)",
            url,
            final_url,
            status.as_u16(),
            kind,
            fetch_ms,
            bytes.len()
        );

        Ok(FetchedResponse { url, final_url, status, kind, content_type, headers, bytes, fetch_ms })
    }
}
