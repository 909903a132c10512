//! Request resolution: the cache-first policy.
//!
//! Every resolve follows the same order: look the request up in the current
//! store; on a hit return the stored snapshot without touching the network;
//! on a miss issue exactly one network fetch. A cacheable response (status
//! 200, basic or cors) is written back best-effort; any other response is
//! returned as-is and never cached. Transport failures propagate to the
//! caller verbatim; no fallback document is synthesized.

use crate::controller::OfflineController;
use offcache_client::ResourceRequest;
use offcache_core::{Error, ResponseSnapshot};

/// Which path answered a resolved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveSource {
    Cache,
    Network,
}

impl ResolveSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveSource::Cache => "cache",
            ResolveSource::Network => "network",
        }
    }
}

/// A resolved request: the snapshot handed to the caller plus its origin.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub snapshot: ResponseSnapshot,
    pub source: ResolveSource,
}

impl OfflineController {
    /// Resolve a resource request, cache-first.
    ///
    /// # Errors
    ///
    /// A miss whose network fetch fails transport-level returns that error
    /// unchanged. Storage lookup failures also surface; write-back
    /// failures never do.
    pub async fn resolve(&self, request: &ResourceRequest) -> Result<Resolved, Error> {
        let key = request.key();

        if let Some(snapshot) = self.db.match_entry(&self.cache_name, &key).await? {
            tracing::debug!("cache hit for {}", request.url);
            return Ok(Resolved { snapshot, source: ResolveSource::Cache });
        }

        let response = self.network.fetch(request).await?;
        let snapshot = response.into_snapshot(&request.method);

        if snapshot.is_cacheable() {
            // Best-effort: a failed write-back only costs the next miss.
            if let Err(e) = self.db.put_entry(&self.cache_name, &snapshot).await {
                tracing::debug!(store = %self.cache_name, url = %request.url, error = %e, "write-back failed");
            }
        } else {
            tracing::debug!(
                url = %request.url,
                status = snapshot.status,
                kind = snapshot.kind.as_str(),
                "response not cacheable, passing through"
            );
        }

        Ok(Resolved { snapshot, source: ResolveSource::Network })
    }
}
