//! The asset manifest: the fixed, ordered set of URLs that must be present
//! in the store after installation.
//!
//! Entries may be relative to the controlled scope's origin ("./",
//! "./manifest.json") or absolute cross-origin URLs (CDN assets). The
//! manifest is resolved once at controller construction and is read-only
//! afterwards.

use offcache_client::ResourceRequest;
use offcache_core::Error;
use url::Url;

/// Resolved asset manifest, order-preserving.
#[derive(Debug, Clone)]
pub struct AssetManifest {
    requests: Vec<ResourceRequest>,
}

impl AssetManifest {
    /// Resolve raw manifest entries against the scope origin.
    ///
    /// Fails on the first entry that is empty or cannot be parsed;
    /// installation with a half-usable manifest is not meaningful.
    pub fn resolve(scope: &Url, entries: &[String]) -> Result<Self, Error> {
        let requests = entries
            .iter()
            .map(|entry| {
                ResourceRequest::get_in_scope(scope, entry)
                    .map_err(|e| Error::InvalidUrl(format!("manifest entry {entry:?}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { requests })
    }

    /// An empty manifest; install then only creates the store.
    pub fn empty() -> Self {
        Self { requests: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Iterate the resolved requests in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceRequest> {
        self.requests.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> Url {
        Url::parse("http://localhost:8080").unwrap()
    }

    #[test]
    fn test_resolve_mixed_entries() {
        let manifest = AssetManifest::resolve(
            &scope(),
            &[
                "./".to_string(),
                "./manifest.json".to_string(),
                "https://cdn.tailwindcss.com".to_string(),
            ],
        )
        .unwrap();

        let urls: Vec<_> = manifest.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:8080/",
                "http://localhost:8080/manifest.json",
                "https://cdn.tailwindcss.com/",
            ]
        );
    }

    #[test]
    fn test_resolve_preserves_order_and_duplicates() {
        let manifest = AssetManifest::resolve(&scope(), &["./a".to_string(), "./b".to_string(), "./a".to_string()])
            .unwrap();
        let urls: Vec<_> = manifest.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:8080/a",
                "http://localhost:8080/b",
                "http://localhost:8080/a",
            ]
        );
    }

    #[test]
    fn test_resolve_rejects_blank_entry() {
        let result = AssetManifest::resolve(&scope(), &["./".to_string(), "   ".to_string()]);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = AssetManifest::empty();
        assert!(manifest.is_empty());
        assert_eq!(manifest.len(), 0);
    }
}
