//! Short-lived cache for upstream leaderboard payloads, keyed by the request's
//! query parameters. The caller chooses the TTL on every read.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The upstream service cached leaderboard payloads for an hour.
pub const DEFAULT_CACHE_TTL_MINUTES: i64 = 60;

#[must_use]
pub fn default_cache_ttl() -> TimeDelta {
    TimeDelta::minutes(DEFAULT_CACHE_TTL_MINUTES)
}

#[derive(Clone, Debug)]
pub struct CacheEntry<V> {
    pub value: V,
    pub cached_at: DateTime<Utc>,
}

pub type CacheMap<V> = Arc<RwLock<HashMap<String, CacheEntry<V>>>>;

/// Builds a key from query parameters, independent of their order.
#[must_use]
pub fn cache_key<S: BuildHasher>(params: &HashMap<String, String, S>) -> String {
    let mut pairs: Vec<(&String, &String)> = params.iter().collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

#[derive(Clone)]
pub struct ResponseCache<V> {
    entries: CacheMap<V>,
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<V: Clone> ResponseCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value if it is younger than `ttl`.
    pub async fn get(&self, key: &str, ttl: TimeDelta) -> Option<V> {
        self.get_at(key, ttl, Utc::now()).await
    }

    pub async fn get_at(&self, key: &str, ttl: TimeDelta, now: DateTime<Utc>) -> Option<V> {
        let map = self.entries.read().await;
        let entry = map.get(key)?;
        if now - entry.cached_at < ttl {
            tracing::debug!(key, "response cache hit");
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_at(key, value, Utc::now()).await;
    }

    pub async fn insert_at(&self, key: impl Into<String>, value: V, cached_at: DateTime<Utc>) {
        self.entries
            .write()
            .await
            .insert(key.into(), CacheEntry { value, cached_at });
    }

    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Drops every entry older than `ttl` and returns how many went.
    pub async fn purge_expired(&self, ttl: TimeDelta) -> usize {
        self.purge_expired_at(ttl, Utc::now()).await
    }

    pub async fn purge_expired_at(&self, ttl: TimeDelta, now: DateTime<Utc>) -> usize {
        let mut map = self.entries.write().await;
        let before = map.len();
        map.retain(|_, entry| now - entry.cached_at < ttl);
        let purged = before - map.len();
        if purged > 0 {
            tracing::debug!(purged, "response cache purged");
        }
        purged
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_parameter_order() {
        let a: HashMap<String, String> = [("year", "2025"), ("tournId", "033"), ("orgId", "1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let b: HashMap<String, String> = [("orgId", "1"), ("year", "2025"), ("tournId", "033")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(cache_key(&a), cache_key(&b));
        assert_eq!(cache_key(&a), "orgId=1&tournId=033&year=2025");
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache: ResponseCache<u32> = ResponseCache::new();
        let then = Utc::now() - TimeDelta::minutes(61);
        cache.insert_at("k", 7, then).await;
        assert_eq!(cache.get("k", default_cache_ttl()).await, None);
        assert_eq!(cache.get("k", TimeDelta::minutes(90)).await, Some(7));
        assert!(cache.invalidate("k").await);
        assert_eq!(cache.get("k", TimeDelta::minutes(90)).await, None);
    }

    #[tokio::test]
    async fn purge_drops_only_expired_entries() {
        let cache: ResponseCache<&str> = ResponseCache::new();
        let now = Utc::now();
        cache.insert_at("old", "a", now - TimeDelta::minutes(61)).await;
        cache.insert_at("older", "b", now - TimeDelta::days(2)).await;
        cache.insert_at("fresh", "c", now - TimeDelta::minutes(5)).await;

        assert_eq!(cache.purge_expired_at(default_cache_ttl(), now).await, 2);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get_at("fresh", default_cache_ttl(), now).await, Some("c"));
        assert_eq!(cache.purge_expired_at(default_cache_ttl(), now).await, 0);
    }
}
