use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::client::{EiaClient, EiaError};

/// Default time-to-live for cached metadata responses.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// In-memory TTL cache for non-tabular (metadata and facet-value) lookups.
///
/// Keys combine the route with a canonical sorted serialization of the
/// query parameters; the credential is never part of the key because it is
/// never part of the encoded parameters. Entries expire by TTL check at
/// read time only - there is no size bound and no background eviction, so
/// stale entries accumulate until [`MetadataCache::clear`] or process exit.
/// Tabular `/data` responses are volatile and must not go through here.
///
/// The map sits behind a `Mutex` so concurrent tool invocations dispatched
/// by the host cannot lose updates; values are immutable once written, so
/// the worst contention outcome is a duplicate upstream fetch.
#[derive(Debug)]
pub struct MetadataCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Canonical cache key: route plus sorted `key=value` parameter pairs.
    pub fn cache_key(route: &str, params: &[(String, String)]) -> String {
        let mut sorted: Vec<&(String, String)> = params.iter().collect();
        sorted.sort();
        let query: Vec<String> = sorted.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{}?{}", route.trim_matches('/'), query.join("&"))
    }

    /// Return a live (age < TTL) entry, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.lock();
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub fn put(&self, key: String, value: Value) {
        let mut entries = self.lock();
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Serve from cache when a live entry exists, otherwise perform the
    /// transport call. Only successes are stored; failures pass through
    /// uncached so the next lookup retries upstream.
    pub async fn get_or_fetch(
        &self,
        client: &EiaClient,
        route: &str,
        params: &[(String, String)],
    ) -> Result<Value, EiaError> {
        let key = Self::cache_key(route, params);
        if let Some(value) = self.get(&key) {
            tracing::debug!(route = %route, "metadata cache hit");
            return Ok(value);
        }

        let body = client.request(route, params).await?;
        self.put(key, body.clone());
        Ok(body)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
