use std::future::Future;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;

use crate::common::ApiError;
use crate::config::FetchPolicy;

struct Entry {
    value: Value,
    fetched_at: Instant,
}

/// Stale-while-revalidate cache shared by every data fetch.
///
/// Fresh values (younger than the dedupe interval) are served without a
/// request. Older values are refetched; if every attempt fails the stale
/// value is served instead of the error. 404 and 401 are never retried,
/// and a 404 drops whatever was cached for the key.
pub struct FetchCache {
    entries: Mutex<LruCache<String, Entry>>,
    policy: FetchPolicy,
}

impl FetchCache {
    pub fn new(policy: FetchPolicy) -> Self {
        let capacity = NonZeroUsize::new(policy.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            policy,
        }
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Cached value regardless of age.
    pub fn peek(&self, key: &str) -> Option<Value> {
        self.entries.lock().peek(key).map(|e| e.value.clone())
    }

    fn fresh(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;
        (entry.fetched_at.elapsed() < self.policy.dedupe_interval).then(|| entry.value.clone())
    }

    pub fn insert(&self, key: &str, value: Value) {
        self.entries.lock().put(
            key.to_string(),
            Entry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.lock().pop(key);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn get_with<F, Fut>(&self, key: &str, fetch: F) -> Result<Value, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        if let Some(value) = self.fresh(key) {
            return Ok(value);
        }

        let mut attempt: u32 = 0;
        loop {
            match fetch().await {
                Ok(value) => {
                    self.insert(key, value.clone());
                    return Ok(value);
                }
                Err(err) if err.is_not_found() => {
                    self.invalidate(key);
                    return Err(err);
                }
                Err(err) if err.is_terminal() || attempt >= self.policy.retry_count => {
                    return match self.peek(key) {
                        Some(stale) => {
                            log::warn!("Serving stale {} after fetch error: {}", key, err);
                            Ok(stale)
                        }
                        None => Err(err),
                    };
                }
                Err(err) => {
                    attempt += 1;
                    log::debug!(
                        "Fetch of {} failed (attempt {}), retrying: {}",
                        key,
                        attempt,
                        err
                    );
                    tokio::time::sleep(self.backoff(attempt)).await;
                }
            }
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.policy.retry_delay.saturating_mul(attempt)
    }
}

impl std::fmt::Debug for FetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCache")
            .field("entries", &self.len())
            .field("policy", &self.policy)
            .finish()
    }
}
