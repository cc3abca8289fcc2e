// In-process cache slot for the repository proxy.
// Holds one value with its fetch time; lives as long as the process.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::store::CachedData;

/// Single-slot TTL cache.
#[derive(Debug, Clone)]
pub struct MemoryCache<T> {
    entry: Option<CachedData<T>>,
    ttl: Duration,
}

impl<T: Clone> MemoryCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    /// Cached value, if one was stored less than `ttl` before `now`.
    pub fn get_if_valid_at(&self, now: DateTime<Utc>) -> Option<T> {
        self.entry
            .as_ref()
            .filter(|cached| cached.is_valid_at(now, self.ttl))
            .map(|cached| cached.data.clone())
    }

    /// Replace the slot with `data`, stamped `now`.
    pub fn store_at(&mut self, data: T, now: DateTime<Utc>) {
        self.entry = Some(CachedData::at(data, now));
    }

    /// When the current value was stored.
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|cached| cached.cached_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_misses() {
        let cache: MemoryCache<Vec<u8>> = MemoryCache::new(Duration::from_secs(60));
        assert!(cache.get_if_valid_at(Utc::now()).is_none());
        assert!(cache.cached_at().is_none());
    }

    #[test]
    fn test_hit_then_expire() {
        let mut cache = MemoryCache::new(Duration::from_secs(3600));
        let t0 = Utc::now();
        cache.store_at(vec![1, 2, 3], t0);

        assert_eq!(
            cache.get_if_valid_at(t0 + chrono::Duration::minutes(59)),
            Some(vec![1, 2, 3])
        );
        assert!(
            cache
                .get_if_valid_at(t0 + chrono::Duration::minutes(60))
                .is_none()
        );
    }

    #[test]
    fn test_store_refreshes_timestamp() {
        let mut cache = MemoryCache::new(Duration::from_secs(3600));
        let t0 = Utc::now();
        cache.store_at("old", t0);

        let t1 = t0 + chrono::Duration::hours(2);
        cache.store_at("new", t1);

        assert_eq!(cache.cached_at(), Some(t1));
        assert_eq!(cache.get_if_valid_at(t1), Some("new"));
    }
}
