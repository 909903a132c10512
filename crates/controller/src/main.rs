//! offcache entry point.
//!
//! Runs the controller lifecycle against the configured database: install
//! the current store from the precache manifest, activate (evicting stale
//! stores), then resolve any URLs passed as arguments, printing one line
//! per result. Logging goes to stderr as JSON.

use std::sync::Arc;

use anyhow::Result;
use offcache_client::{FetchConfig, HttpFetcher, ResourceRequest};
use offcache_controller::OfflineController;
use offcache_core::{AppConfig, CacheDb};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        cache_name = %config.cache_name,
        db_path = %config.db_path.display(),
        assets = config.precache_urls.len(),
        "starting offcache"
    );

    let db = CacheDb::open(&config.db_path).await?;

    let scope_origin = Url::parse(&config.scope_origin)?;
    let fetcher = HttpFetcher::new(FetchConfig {
        scope_origin,
        user_agent: config.user_agent.clone(),
        max_bytes: config.max_bytes,
        timeout: config.timeout(),
        max_redirects: config.max_redirects,
    })?;
    tracing::debug!(
        user_agent = %fetcher.config().user_agent,
        timeout_ms = fetcher.config().timeout.as_millis() as u64,
        max_bytes = fetcher.config().max_bytes,
        "fetch client ready"
    );

    let controller = OfflineController::from_config(&config, db, Arc::new(fetcher))?;

    controller.install().await?;
    let report = controller.activate().await?;
    if !report.failed.is_empty() {
        tracing::warn!(failed = ?report.failed, "some stale stores could not be evicted");
    }

    for arg in std::env::args().skip(1) {
        let request = ResourceRequest::get(&arg)?;
        let resolved = controller.resolve(&request).await?;
        println!(
            "{} {} {} bytes ({})",
            resolved.snapshot.status,
            request.url,
            resolved.snapshot.body.len(),
            resolved.source.as_str()
        );
    }

    for status in controller.status().await? {
        tracing::info!(
            store = %status.name,
            entries = status.entries,
            current = status.current,
            "store status"
        );
    }

    Ok(())
}
