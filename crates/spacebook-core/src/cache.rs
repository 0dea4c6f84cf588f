// ── Query cache ──
//
// Concurrent cache keyed by `QueryKey`, with per-domain staleness
// windows and prefix-based invalidation. Invalidation marks entries
// stale rather than dropping them, so "next read triggers a refetch"
// is the observable contract. Every mutation bumps a version counter
// published through a `watch` channel.

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::trace;

use crate::query_key::{Domain, QueryKey};

/// Per-domain staleness windows.
///
/// Mirrors the product's cache timers: browsing data goes stale after
/// five minutes, reference data after ten, auth status never (it is
/// only ever invalidated explicitly).
#[derive(Debug, Clone, Copy)]
pub struct StalePolicy;

impl StalePolicy {
    /// Time-to-stale for a domain. `None` means never stale by time.
    pub fn ttl(domain: Domain) -> Option<Duration> {
        match domain {
            Domain::Auth => None,
            Domain::Spaces | Domain::Bookings => Some(Duration::from_secs(5 * 60)),
            Domain::Amenities | Domain::FeatureFlags => Some(Duration::from_secs(10 * 60)),
        }
    }
}

struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
    ttl: Option<Duration>,
    /// Set by explicit invalidation; a flagged entry is never served.
    stale: bool,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        if self.stale {
            return false;
        }
        match self.ttl {
            Some(ttl) => now.duration_since(self.fetched_at) < ttl,
            None => true,
        }
    }
}

/// Concurrent query cache with prefix invalidation.
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    version: watch::Sender<u64>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        Self {
            entries: DashMap::new(),
            version,
        }
    }

    /// Store a fetched value under `key`, with the key's domain
    /// staleness window. Returns the stored value for immediate use.
    pub fn put<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) -> Arc<T> {
        let ttl = StalePolicy::ttl(key.domain());
        self.put_with_ttl(key, value, ttl)
    }

    /// Store a fetched value with an explicit staleness window.
    pub fn put_with_ttl<T: Send + Sync + 'static>(
        &self,
        key: QueryKey,
        value: T,
        ttl: Option<Duration>,
    ) -> Arc<T> {
        let value = Arc::new(value);
        trace!(%key, "cache put");
        self.entries.insert(
            key,
            CacheEntry {
                data: value.clone(),
                fetched_at: Instant::now(),
                ttl,
                stale: false,
            },
        );
        self.bump_version();
        value
    }

    /// Serve a fresh entry, or `None` when absent, stale-flagged, or
    /// past its staleness window (the caller then refetches).
    pub fn get<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entry = self.entries.get(key)?;
        if !entry.is_fresh(Instant::now()) {
            trace!(%key, "cache stale");
            return None;
        }
        Arc::clone(&entry.data).downcast::<T>().ok()
    }

    /// Whether `key` holds a fresh entry right now.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.is_fresh(Instant::now()))
    }

    /// Mark every entry under `prefix` stale. The data stays in place
    /// (a stale read refetches; nothing observes a half-empty cache).
    pub fn invalidate(&self, prefix: &QueryKey) {
        let mut hits = 0usize;
        for mut entry in self.entries.iter_mut() {
            if prefix.is_prefix_of(entry.key()) {
                entry.value_mut().stale = true;
                hits += 1;
            }
        }
        trace!(%prefix, hits, "cache invalidate");
        if hits > 0 {
            self.bump_version();
        }
    }

    /// Remove every entry under `prefix` outright. Used on logout,
    /// where stale session data must not survive at all.
    pub fn purge(&self, prefix: &QueryKey) {
        let doomed: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|e| prefix.is_prefix_of(e.key()))
            .map(|e| e.key().clone())
            .collect();
        trace!(%prefix, count = doomed.len(), "cache purge");
        let purged = !doomed.is_empty();
        for key in doomed {
            self.entries.remove(&key);
        }
        if purged {
            self.bump_version();
        }
    }

    /// Subscribe to mutation notifications (version counter).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips_through_any() {
        let cache = QueryCache::new();
        let key = Domain::Spaces.all().detail("s1");
        cache.put(key.clone(), String::from("Loft Studio"));

        let value: Arc<String> = cache.get(&key).unwrap();
        assert_eq!(*value, "Loft Studio");
    }

    #[test]
    fn wrong_type_read_misses_instead_of_panicking() {
        let cache = QueryCache::new();
        let key = Domain::Spaces.all().detail("s1");
        cache.put(key.clone(), String::from("Loft Studio"));

        assert!(cache.get::<u64>(&key).is_none());
    }

    #[test]
    fn invalidated_entry_is_not_served() {
        let cache = QueryCache::new();
        let key = Domain::Bookings.all().list(&[]);
        cache.put(key.clone(), vec![1u32, 2, 3]);
        assert!(cache.is_fresh(&key));

        cache.invalidate(&Domain::Bookings.all());
        assert!(!cache.is_fresh(&key));
        assert!(cache.get::<Vec<u32>>(&key).is_none());
        // Entry is still resident, just flagged.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidation_is_prefix_scoped() {
        let cache = QueryCache::new();
        let owned = Domain::Spaces.all().sub("owned").list(&[]);
        let public = Domain::Spaces.all().list(&[]);
        cache.put(owned.clone(), 1u8);
        cache.put(public.clone(), 2u8);

        cache.invalidate(&Domain::Spaces.all().sub("owned"));
        assert!(!cache.is_fresh(&owned));
        assert!(cache.is_fresh(&public));
    }

    #[test]
    fn purge_removes_entries_outright() {
        let cache = QueryCache::new();
        cache.put(QueryKey::auth_user(), String::from("avery"));
        cache.put(QueryKey::auth_status(), true);
        cache.put(Domain::Spaces.all().list(&[]), 0u8);

        cache.purge(&Domain::Auth.all());
        assert_eq!(cache.len(), 1);
        assert!(cache.get::<String>(&QueryKey::auth_user()).is_none());
        assert!(cache.is_fresh(&Domain::Spaces.all().list(&[])));
    }

    #[test]
    fn zero_ttl_entry_is_immediately_stale() {
        let cache = QueryCache::new();
        let key = Domain::Spaces.all().list(&[]);
        cache.put_with_ttl(key.clone(), 0u8, Some(Duration::ZERO));
        assert!(cache.get::<u8>(&key).is_none());
    }

    #[test]
    fn auth_entries_never_expire_by_time() {
        assert!(StalePolicy::ttl(Domain::Auth).is_none());
        assert_eq!(
            StalePolicy::ttl(Domain::Spaces),
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn version_bumps_on_every_mutation() {
        let cache = QueryCache::new();
        let rx = cache.subscribe();
        assert_eq!(*rx.borrow(), 0);

        cache.put(Domain::Spaces.all().list(&[]), 0u8);
        assert_eq!(*rx.borrow(), 1);

        cache.invalidate(&Domain::Spaces.all());
        assert_eq!(*rx.borrow(), 2);

        // Invalidating an empty prefix is not a mutation.
        cache.invalidate(&Domain::Amenities.all());
        assert_eq!(*rx.borrow(), 2);
    }
}
