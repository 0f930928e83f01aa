// src/services/cache_service.rs - short-TTL page cache for the index feed
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long an index page stays cached. Within this window two requests
/// return byte-identical bodies even if posts were created in between;
/// there is no write-through invalidation by design.
pub const INDEX_CACHE_TTL: Duration = Duration::from_secs(20);

struct CacheEntry {
    body: String,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

/// Single-process page cache keyed by route. Entries expire on their TTL
/// or through an explicit `invalidate`/`clear`, never on writes.
pub struct CacheService {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl CacheService {
    pub fn new() -> Self {
        CacheService {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.body.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: &str, body: String, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                body,
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Serve the cached body when fresh, otherwise run `compute`, store
    /// its output under `key` and return it. Compute failures are never
    /// cached.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<String, E>>,
    {
        if let Some(body) = self.get(key) {
            return Ok(body);
        }
        let body = compute().await?;
        self.put(key, body.clone(), ttl);
        Ok(body)
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl Default for CacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl_returns_stored_body() {
        let cache = CacheService::new();
        cache.put("index:page=1", "first render".into(), Duration::from_secs(60));
        // A second render would produce different bytes; the cache must
        // keep serving the first one inside the window.
        assert_eq!(cache.get("index:page=1").as_deref(), Some("first render"));
        assert_eq!(cache.get("index:page=1").as_deref(), Some("first render"));
    }

    #[test]
    fn entry_expires_after_ttl() {
        let cache = CacheService::new();
        cache.put("index:page=1", "stale".into(), Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(cache.get("index:page=1"), None);
    }

    #[test]
    fn invalidate_drops_only_that_key() {
        let cache = CacheService::new();
        cache.put("index:page=1", "one".into(), Duration::from_secs(60));
        cache.put("index:page=2", "two".into(), Duration::from_secs(60));
        cache.invalidate("index:page=1");
        assert_eq!(cache.get("index:page=1"), None);
        assert_eq!(cache.get("index:page=2").as_deref(), Some("two"));
    }

    #[test]
    fn clear_empties_everything() {
        let cache = CacheService::new();
        cache.put("a", "1".into(), Duration::from_secs(60));
        cache.put("b", "2".into(), Duration::from_secs(60));
        cache.clear();
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn get_or_compute_runs_compute_once_per_window() {
        let cache = CacheService::new();
        let mut calls = 0;
        for _ in 0..3 {
            let body = futures::executor::block_on(cache.get_or_compute(
                "index:page=1",
                Duration::from_secs(60),
                || {
                    calls += 1;
                    async { Ok::<_, ()>("rendered".to_string()) }
                },
            ))
            .unwrap();
            assert_eq!(body, "rendered");
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn get_or_compute_does_not_cache_failures() {
        let cache = CacheService::new();
        let err = futures::executor::block_on(cache.get_or_compute(
            "index:page=1",
            Duration::from_secs(60),
            || async { Err::<String, _>("db down") },
        ));
        assert_eq!(err, Err("db down"));
        assert_eq!(cache.get("index:page=1"), None);
    }

    #[test]
    fn miss_on_unknown_key() {
        let cache = CacheService::new();
        assert_eq!(cache.get("never-stored"), None);
    }
}
