//! In-memory cache implementation
//!
//! A process-local `CacheStore` backed by a mutex-guarded map, used by unit
//! tests and local demos. Expiry is driven by the injected [`Clock`], so
//! tests advance a [`crate::clock::ManualClock`] instead of sleeping.
//! Entries are dropped lazily on access, which matches how the production
//! backend makes expired keys unobservable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::clock::{Clock, SystemClock};

use super::CacheStore;

struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Mutex-guarded in-process cache with injectable clock
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCache {
    /// Create a cache on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a cache on the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn live_value(&self, entries: &mut HashMap<String, Entry>, key: &str) -> Option<String> {
        let now = self.clock.now();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn expiry(&self, ttl_seconds: u64) -> DateTime<Utc> {
        self.clock.now() + Duration::seconds(ttl_seconds as i64)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let mut entries = self.entries.lock().map_err(|_| "cache mutex poisoned".to_string())?;
        Ok(self.live_value(&mut entries, key))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        let mut entries = self.entries.lock().map_err(|_| "cache mutex poisoned".to_string())?;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: self.expiry(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().map_err(|_| "cache mutex poisoned".to_string())?;
        entries.remove(key);
        Ok(())
    }

    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, String> {
        let mut entries = self.entries.lock().map_err(|_| "cache mutex poisoned".to_string())?;
        let value = self.live_value(&mut entries, key);
        entries.remove(key);
        Ok(value)
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, String> {
        let mut entries = self.entries.lock().map_err(|_| "cache mutex poisoned".to_string())?;
        if self.live_value(&mut entries, key).is_some() {
            return Ok(false);
        }
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: self.expiry(ttl_seconds),
            },
        );
        Ok(true)
    }

    async fn increment_or_init(&self, key: &str, ttl_seconds: u64) -> Result<i64, String> {
        let mut entries = self.entries.lock().map_err(|_| "cache mutex poisoned".to_string())?;
        let next = match self.live_value(&mut entries, key) {
            Some(current) => {
                current
                    .parse::<i64>()
                    .map_err(|e| format!("counter at {} is not numeric: {}", key, e))?
                    + 1
            }
            None => 1,
        };
        let expires_at = match entries.get(key) {
            // Keep the TTL set at first increment
            Some(entry) if next > 1 => entry.expires_at,
            _ => self.expiry(ttl_seconds),
        };
        entries.insert(
            key.to_string(),
            Entry {
                value: next.to_string(),
                expires_at,
            },
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache_with_clock() -> (InMemoryCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (InMemoryCache::with_clock(clock.clone()), clock)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip_and_expiry() {
        let (cache, clock) = cache_with_clock();
        cache.set("otp_+989121234567", "482913", 180).await.unwrap();
        assert_eq!(
            cache.get("otp_+989121234567").await.unwrap(),
            Some("482913".to_string())
        );

        clock.advance_seconds(181);
        assert_eq!(cache.get("otp_+989121234567").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_if_absent_respects_live_entry() {
        let (cache, clock) = cache_with_clock();
        assert!(cache.set_if_absent("k", "first", 60).await.unwrap());
        assert!(!cache.set_if_absent("k", "second", 60).await.unwrap());
        assert_eq!(cache.get("k").await.unwrap(), Some("first".to_string()));

        // Expired entries no longer block
        clock.advance_seconds(61);
        assert!(cache.set_if_absent("k", "second", 60).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_and_delete_consumes_once() {
        let (cache, _clock) = cache_with_clock();
        cache.set("token", "+989121234567", 600).await.unwrap();
        assert_eq!(
            cache.get_and_delete("token").await.unwrap(),
            Some("+989121234567".to_string())
        );
        assert_eq!(cache.get_and_delete("token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_increment_keeps_initial_ttl() {
        let (cache, clock) = cache_with_clock();
        assert_eq!(cache.increment_or_init("c", 100).await.unwrap(), 1);
        clock.advance_seconds(60);
        assert_eq!(cache.increment_or_init("c", 100).await.unwrap(), 2);

        // 41 more seconds puts us past the TTL set at the first increment
        clock.advance_seconds(41);
        assert_eq!(cache.increment_or_init("c", 100).await.unwrap(), 1);
    }
}
