//! Install and activate phases.
//!
//! Install pre-warms the current store from the asset manifest with
//! all-or-nothing semantics: every asset is fetched exactly once, every
//! fetch must succeed with a 2xx status, and the snapshots are committed in
//! a single transaction only after the last fetch. A failed install leaves
//! no partial cache and must keep the host from activating this version.
//!
//! Activate evicts every store whose name differs from the current cache
//! name. Deletions run concurrently; a single failed deletion is logged and
//! reported but blocks neither the other deletions nor activation itself.

use tokio::task::JoinSet;

use crate::controller::OfflineController;
use offcache_core::Error;

/// Outcome of the activate phase.
///
/// Failed evictions are surfaced per-store here (and logged at WARN)
/// rather than failing activation.
#[derive(Debug, Clone, Default)]
pub struct ActivationReport {
    /// Stale stores that were deleted.
    pub evicted: Vec<String>,
    /// Stale stores whose deletion failed; they remain until the next activate.
    pub failed: Vec<String>,
}

impl OfflineController {
    /// Install this controller version: create the store and pre-cache the
    /// manifest.
    ///
    /// # Errors
    ///
    /// Fails if any manifest asset cannot be fetched or comes back with a
    /// non-success status. No retries; the host must not activate a
    /// version whose install failed.
    pub async fn install(&self) -> Result<(), Error> {
        tracing::info!(store = %self.cache_name, assets = self.manifest.len(), "installing");

        self.db.open_store(&self.cache_name).await?;

        let mut snapshots = Vec::with_capacity(self.manifest.len());
        for request in self.manifest.iter() {
            let response = self.network.fetch(request).await?;
            if !response.status.is_success() {
                return Err(Error::PrecacheFailed {
                    url: request.url.to_string(),
                    status: response.status.as_u16(),
                });
            }
            snapshots.push(response.into_snapshot(&request.method));
        }

        // Single transaction: a failure above commits nothing.
        self.db.put_all(&self.cache_name, snapshots).await?;

        tracing::info!(store = %self.cache_name, "install complete");
        Ok(())
    }

    /// Activate this controller version: delete every stale store.
    ///
    /// Stale means any store name other than the current cache name.
    /// Deletions fan out concurrently and the report is returned once all
    /// of them have settled.
    pub async fn activate(&self) -> Result<ActivationReport, Error> {
        let names = self.db.store_names().await?;
        let stale: Vec<String> = names.into_iter().filter(|name| name != &self.cache_name).collect();

        let mut deletions = JoinSet::new();
        for name in stale {
            let db = self.db.clone();
            deletions.spawn(async move {
                let result = db.delete_store(&name).await;
                (name, result)
            });
        }

        let mut report = ActivationReport::default();
        while let Some(joined) = deletions.join_next().await {
            match joined {
                Ok((name, Ok(_))) => {
                    tracing::debug!(store = %name, "evicted stale store");
                    report.evicted.push(name);
                }
                Ok((name, Err(e))) => {
                    tracing::warn!(store = %name, error = %e, "failed to evict stale store");
                    report.failed.push(name);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "eviction task failed to join");
                }
            }
        }

        report.evicted.sort();
        report.failed.sort();

        tracing::info!(
            store = %self.cache_name,
            evicted = report.evicted.len(),
            failed = report.failed.len(),
            "activation complete"
        );
        Ok(report)
    }
}
