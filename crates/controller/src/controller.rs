//! Controller construction and status reporting.
//!
//! The controller is plain dependency injection: the current cache name and
//! resolved manifest are fixed at construction, the storage handle and the
//! network primitive are passed in. The lifecycle operations live in
//! `lifecycle` (install/activate) and `intercept` (request resolution).

use std::sync::Arc;

use crate::manifest::AssetManifest;
use offcache_client::Network;
use offcache_core::{AppConfig, CacheDb, Error};
use url::Url;

/// The offline cache controller.
///
/// One instance corresponds to one controller version: its cache name
/// selects the current store, and the host is expected to run
/// install → activate → resolve in that order.
pub struct OfflineController {
    pub(crate) cache_name: String,
    pub(crate) manifest: AssetManifest,
    pub(crate) db: CacheDb,
    pub(crate) network: Arc<dyn Network>,
}

/// Per-store status line, for diagnostics.
#[derive(Debug, Clone)]
pub struct StoreStatus {
    pub name: String,
    pub entries: u64,
    pub current: bool,
}

impl OfflineController {
    /// Create a controller with an explicit cache name and manifest.
    pub fn new(
        cache_name: impl Into<String>, manifest: AssetManifest, db: CacheDb, network: Arc<dyn Network>,
    ) -> Result<Self, Error> {
        let cache_name = cache_name.into();
        if cache_name.is_empty() {
            return Err(Error::InvalidInput("cache name cannot be empty".into()));
        }
        Ok(Self { cache_name, manifest, db, network })
    }

    /// Create a controller from the application configuration.
    ///
    /// Resolves the precache manifest against the configured scope origin.
    pub fn from_config(config: &AppConfig, db: CacheDb, network: Arc<dyn Network>) -> Result<Self, Error> {
        let scope = Url::parse(&config.scope_origin).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let manifest = AssetManifest::resolve(&scope, &config.precache_urls)?;
        Self::new(config.cache_name.clone(), manifest, db, network)
    }

    /// The current cache name.
    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    /// All stores with their entry counts, current one flagged.
    pub async fn status(&self) -> Result<Vec<StoreStatus>, Error> {
        let mut statuses = Vec::new();
        for name in self.db.store_names().await? {
            let entries = self.db.entry_count(&name).await?;
            let current = name == self.cache_name;
            statuses.push(StoreStatus { name, entries, current });
        }
        Ok(statuses)
    }
}
