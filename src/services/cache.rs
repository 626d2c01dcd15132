use std::sync::Arc;
use std::time::Duration;

use super::{JobCatalog, StoreError};
use crate::models::JobPosting;

/// Short-lived snapshot of the active job catalog
///
/// Concurrent misses share one fetch. Failed fetches are not cached, so the
/// next request retries the store.
pub struct CatalogCache {
    catalog: Arc<dyn JobCatalog>,
    snapshot: moka::future::Cache<(), Arc<Vec<JobPosting>>>,
}

impl CatalogCache {
    pub fn new(catalog: Arc<dyn JobCatalog>, ttl_secs: u64) -> Self {
        let snapshot = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { catalog, snapshot }
    }

    /// Active postings, from cache when fresh
    pub async fn active_jobs(&self) -> Result<Arc<Vec<JobPosting>>, Arc<StoreError>> {
        let catalog = self.catalog.clone();
        self.snapshot
            .try_get_with((), async move {
                tracing::trace!("Catalog cache miss");
                catalog.list_active_jobs().await.map(Arc::new)
            })
            .await
    }

    /// Drop the cached snapshot
    pub async fn invalidate(&self) {
        self.snapshot.invalidate(&()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCatalog {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl JobCatalog for CountingCatalog {
        async fn list_active_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Api("catalog down".to_string()));
            }
            Ok(crate::services::demo_catalog())
        }
    }

    #[tokio::test]
    async fn test_snapshot_is_reused_until_invalidated() {
        let catalog = Arc::new(CountingCatalog { calls: AtomicUsize::new(0), fail: false });
        let cache = CatalogCache::new(catalog.clone(), 60);

        assert_eq!(cache.active_jobs().await.unwrap().len(), 6);
        assert_eq!(cache.active_jobs().await.unwrap().len(), 6);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);

        cache.invalidate().await;
        cache.active_jobs().await.unwrap();
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let catalog = Arc::new(CountingCatalog { calls: AtomicUsize::new(0), fail: true });
        let cache = CatalogCache::new(catalog.clone(), 60);

        assert!(cache.active_jobs().await.is_err());
        assert!(cache.active_jobs().await.is_err());
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 2);
    }
}
