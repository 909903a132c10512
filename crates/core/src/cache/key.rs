//! Request identity keys.
//!
//! A cache entry is keyed by the request's identity: HTTP method plus the
//! canonicalized URL. Callers are expected to canonicalize the URL before
//! computing the key so that equivalent requests collapse to one entry.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request.
pub fn compute_request_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_uppercase().as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
