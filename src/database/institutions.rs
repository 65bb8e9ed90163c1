// file: src/database/institutions.rs
// description: shared institution cache holding an immutable, wholesale-replaced snapshot
// reference: https://docs.rs/tokio/latest/tokio/sync/struct.RwLock.html

use crate::database::store::InstitutionSource;
use crate::error::{Result, SearchError};
use crate::models::Institution;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Institutions in load order plus an id index. Never mutated after
/// construction.
#[derive(Debug, Default)]
pub struct InstitutionSnapshot {
    items: Vec<Institution>,
    index: HashMap<String, usize>,
}

impl InstitutionSnapshot {
    /// Later duplicates of an id are dropped.
    pub fn new(institutions: Vec<Institution>) -> Self {
        let mut items = Vec::with_capacity(institutions.len());
        let mut index = HashMap::with_capacity(institutions.len());

        for institution in institutions {
            if !index.contains_key(&institution.id) {
                index.insert(institution.id.clone(), items.len());
                items.push(institution);
            }
        }

        Self { items, index }
    }

    pub fn all(&self) -> &[Institution] {
        &self.items
    }

    pub fn by_id(&self, id: &str) -> Option<&Institution> {
        self.index.get(id).map(|&idx| &self.items[idx])
    }

    /// First institution, in load order, whose name contains `needle`
    /// case-insensitively. Not the best or longest match.
    pub fn resolve_name(&self, needle: &str) -> Option<&Institution> {
        let needle = needle.to_lowercase();
        self.items
            .iter()
            .find(|institution| institution.name.to_lowercase().contains(&needle))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub id: String,
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub cache_size: usize,
    pub institutions: Vec<CacheEntry>,
}

/// The only state shared across requests. Readers take a cheap clone of the
/// current snapshot; refresh builds a new snapshot off-lock and swaps it in.
#[derive(Debug, Clone, Default)]
pub struct InstitutionCache {
    current: Arc<RwLock<Arc<InstitutionSnapshot>>>,
}

impl InstitutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_institutions(institutions: Vec<Institution>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(InstitutionSnapshot::new(institutions)))),
        }
    }

    pub async fn snapshot(&self) -> Arc<InstitutionSnapshot> {
        Arc::clone(&*self.current.read().await)
    }

    pub async fn by_id(&self, id: &str) -> Option<Institution> {
        self.snapshot().await.by_id(id).cloned()
    }

    /// Reload from `source` and swap the snapshot. On failure or timeout the
    /// previous snapshot stays in place.
    pub async fn refresh<S: InstitutionSource>(&self, source: &S, timeout: Duration) -> Result<usize> {
        let institutions = tokio::time::timeout(timeout, source.load_institutions())
            .await
            .map_err(|_| SearchError::Timeout {
                operation: "institution cache refresh",
                after: timeout,
            })??;

        let snapshot = Arc::new(InstitutionSnapshot::new(institutions));
        let size = snapshot.len();

        *self.current.write().await = snapshot;

        info!("Loaded {} institutions into cache", size);
        Ok(size)
    }

    pub async fn status(&self) -> CacheStatus {
        let snapshot = self.snapshot().await;
        CacheStatus {
            cache_size: snapshot.len(),
            institutions: snapshot
                .all()
                .iter()
                .map(|institution| CacheEntry {
                    id: institution.id.clone(),
                    name: institution.name.clone(),
                    logo: institution.logo.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;

    struct StaticSource(Vec<Institution>);

    impl InstitutionSource for StaticSource {
        async fn load_institutions(&self) -> Result<Vec<Institution>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl InstitutionSource for FailingSource {
        async fn load_institutions(&self) -> Result<Vec<Institution>> {
            Err(SearchError::upstream("institution load", "connection refused"))
        }
    }

    struct StalledSource;

    impl InstitutionSource for StalledSource {
        fn load_institutions(&self) -> impl Future<Output = Result<Vec<Institution>>> + Send {
            std::future::pending()
        }
    }

    fn institutions() -> Vec<Institution> {
        vec![
            Institution::new("k1", "Sağlık Bakanlığı Yönetmelikleri"),
            Institution::new("k2", "T.C. Sağlık Bakanlığı"),
            Institution::new("k1", "Duplicate"),
        ]
    }

    #[test]
    fn test_resolve_name_is_first_match() {
        let snapshot = InstitutionSnapshot::new(institutions());
        assert_eq!(snapshot.len(), 2);
        // plain Unicode lowercasing, no Turkish dotless-i rules
        assert_eq!(snapshot.resolve_name("SAĞLIK").map(|i| i.id.as_str()), None);
        assert_eq!(
            snapshot.resolve_name("sağlık bakanlığı").map(|i| i.id.as_str()),
            Some("k1")
        );
        assert!(snapshot.resolve_name("Adalet").is_none());
    }

    #[tokio::test]
    async fn test_refresh_swaps_snapshot() {
        let cache = InstitutionCache::new();
        let before = cache.snapshot().await;
        assert!(before.is_empty());

        let loaded = cache
            .refresh(&StaticSource(institutions()), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(loaded, 2);

        // readers holding the old snapshot are unaffected
        assert!(before.is_empty());
        assert_eq!(
            cache.by_id("k2").await.map(|i| i.name),
            Some("T.C. Sağlık Bakanlığı".to_string())
        );
        assert_eq!(cache.status().await.cache_size, 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let cache = InstitutionCache::with_institutions(institutions());

        let err = cache
            .refresh(&FailingSource, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Upstream { .. }));
        assert_eq!(cache.snapshot().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_times_out() {
        let cache = InstitutionCache::with_institutions(institutions());

        let err = cache
            .refresh(&StalledSource, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Timeout { .. }));
        assert_eq!(cache.snapshot().await.len(), 2);
    }
}
