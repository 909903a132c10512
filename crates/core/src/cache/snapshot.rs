//! Response snapshot model.
//!
//! A snapshot is an immutable capture of a network response at the moment it
//! was cached. Once stored it is never updated in place; a later write-back
//! for the same request key simply overwrites the row.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Classification of a response relative to the controlled scope's origin.
///
/// Mirrors the browser response-type taxonomy: only `Basic` (same-origin)
/// and `Cors` (cross-origin with readable body) responses are eligible for
/// write-back; `Opaque` and `Error` responses never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Basic,
    Cors,
    Opaque,
    Error,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Basic => "basic",
            ResponseKind::Cors => "cors",
            ResponseKind::Opaque => "opaque",
            ResponseKind::Error => "error",
        }
    }
}

impl FromStr for ResponseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(ResponseKind::Basic),
            "cors" => Ok(ResponseKind::Cors),
            "opaque" => Ok(ResponseKind::Opaque),
            "error" => Ok(ResponseKind::Error),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// A cached response snapshot.
///
/// Carries everything needed to answer the request again without the
/// network: status, classification, headers, and the full body bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    /// Key this snapshot is stored under (hash of method + canonical URL).
    pub request_key: String,
    /// HTTP method of the originating request.
    pub method: String,
    /// Canonical URL of the originating request.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response classification relative to the scope origin.
    pub kind: ResponseKind,
    /// Content-Type header, if present.
    pub content_type: Option<String>,
    /// Remaining response headers, serialized as a JSON object.
    pub headers_json: Option<String>,
    /// Full response body.
    pub body: Vec<u8>,
    /// ISO8601 timestamp of when the snapshot was taken.
    pub stored_at: String,
}

impl ResponseSnapshot {
    /// Whether this snapshot may be written back into the store.
    ///
    /// Only successful same-origin or CORS-readable responses qualify;
    /// error statuses and opaque responses pass through uncached.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && matches!(self.kind, ResponseKind::Basic | ResponseKind::Cors)
    }
}
