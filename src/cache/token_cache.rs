use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::trace;

use crate::cache::token::{CacheEntry, NEVER_EXPIRES};
use crate::helpers::time::{system_clock, Clock};

/// In-memory key -> value cache with lazy expiry.
///
/// Expired entries are never swept; they read as absent until overwritten
/// or reset. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct ExpiringCache<V> {
    inner: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> Default for ExpiringCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> ExpiringCache<V> {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())), clock }
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// Without `max_age` (or with a zero one) the entry never expires. A
    /// deadline past `i64::MAX` ms is clamped to it.
    pub async fn set(&self, key: &str, value: V, max_age: Option<Duration>) {
        let expires_at = match max_age {
            Some(age) if !age.is_zero() => deadline(self.clock.now_millis(), age),
            _ => NEVER_EXPIRES,
        };
        trace!(key, expires_at, "cache set");
        let mut map = self.inner.write().await;
        map.insert(key.to_owned(), CacheEntry::new(value, expires_at));
    }

    /// Value for `key` unless missing or past its deadline
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_millis();
        let map = self.inner.read().await;
        map.get(key)
            .filter(|entry| entry.is_live_at(now))
            .map(|entry| entry.value.clone())
    }

    pub async fn reset(&self, key: &str) {
        let mut map = self.inner.write().await;
        if map.remove(key).is_some() {
            trace!(key, "cache reset");
        }
    }
}

fn deadline(now_millis: i64, max_age: Duration) -> i64 {
    let age = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
    now_millis.saturating_add(age)
}
