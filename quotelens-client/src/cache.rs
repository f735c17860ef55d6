//! Memoized search results keyed by query
//!
//! Concurrent callers for the same key share one backend request: the
//! first caller fetches while the rest wait on the key's slot, then read
//! the cached value. A failed fetch evicts the key so a later call can
//! retry; successful entries are kept under a FIFO bound.

use quotelens_core::{Location, QuotelensError, SearchQuery};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const SEARCH_CACHE_MAX_ENTRIES: usize = 128;

type Slot = Arc<Mutex<Option<Arc<Vec<Location>>>>>;

struct Inner {
    entries: HashMap<SearchQuery, Slot>,
    order: VecDeque<SearchQuery>,
}

pub struct SearchCache {
    inner: Mutex<Inner>,
    max_entries: usize,
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(SEARCH_CACHE_MAX_ENTRIES)
    }
}

impl SearchCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            max_entries,
        }
    }

    /// Return the cached locations for `key`, or run `fetch` to produce
    /// them. At most one fetch per key is in flight at a time.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &SearchQuery,
        fetch: F,
    ) -> Result<Arc<Vec<Location>>, QuotelensError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Location>, QuotelensError>>,
    {
        let slot = self.slot_for(key).await;

        // Same-key callers serialize here; the winner fetches, the rest
        // find the slot filled.
        let mut guard = slot.lock().await;
        if let Some(cached) = guard.as_ref() {
            return Ok(Arc::clone(cached));
        }

        match fetch().await {
            Ok(locations) => {
                let locations = Arc::new(locations);
                *guard = Some(Arc::clone(&locations));
                Ok(locations)
            }
            Err(err) => {
                self.evict(key, &slot).await;
                Err(err)
            }
        }
    }

    async fn slot_for(&self, key: &SearchQuery) -> Slot {
        let mut inner = self.inner.lock().await;
        if let Some(slot) = inner.entries.get(key) {
            return Arc::clone(slot);
        }

        let slot: Slot = Arc::new(Mutex::new(None));
        inner.entries.insert(key.clone(), Arc::clone(&slot));
        inner.order.push_back(key.clone());

        while inner.entries.len() > self.max_entries {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            } else {
                break;
            }
        }

        slot
    }

    /// Drop the key so a retry can re-fetch. Only removes the slot the
    /// failed fetch owned; a newer slot under the same key stays.
    async fn evict(&self, key: &SearchQuery, slot: &Slot) {
        let mut inner = self.inner.lock().await;
        if let Some(current) = inner.entries.get(key) {
            if Arc::ptr_eq(current, slot) {
                inner.entries.remove(key);
                inner.order.retain(|k| k != key);
            }
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn query(text: &str) -> SearchQuery {
        SearchQuery::new(text, None)
    }

    fn location(line: usize) -> Location {
        Location {
            uri: "git://repo?rev#path".to_string(),
            line,
            start: 0,
            length: 4,
        }
    }

    #[tokio::test]
    async fn second_call_hits_the_cache() {
        let cache = SearchCache::default();
        let hits = AtomicUsize::new(0);
        let key = query("over");

        for _ in 0..2 {
            let found = cache
                .get_or_fetch(&key, || async {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![location(3)])
                })
                .await
                .unwrap();
            assert_eq!(found.len(), 1);
        }

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_repos_are_distinct_keys() {
        let cache = SearchCache::default();
        let hits = AtomicUsize::new(0);

        for repo in [None, Some("github.com/acme/site".to_string())] {
            let key = SearchQuery::new("over", repo);
            cache
                .get_or_fetch(&key, || async {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(Vec::new())
                })
                .await
                .unwrap();
        }

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_evicts_so_retry_refetches() {
        let cache = SearchCache::default();
        let key = query("flaky");

        let err = cache
            .get_or_fetch(&key, || async {
                Err(QuotelensError::BackendError {
                    code: "connection_error".to_string(),
                    message: "refused".to_string(),
                    hint: "".to_string(),
                })
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuotelensError::BackendError { .. }));
        assert_eq!(cache.len().await, 0);

        let found = cache
            .get_or_fetch(&key, || async { Ok(vec![location(1)]) })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_same_key_calls_fetch_once() {
        let cache = Arc::new(SearchCache::default());
        let hits = Arc::new(AtomicUsize::new(0));
        let key = query("shared");

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let hits = Arc::clone(&hits);
            let key = key.clone();
            tasks.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(&key, || async {
                        hits.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                        Ok(vec![location(7)])
                    })
                    .await
                    .unwrap()
            }));
        }

        for task in tasks {
            let found = task.await.unwrap();
            assert_eq!(found.len(), 1);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fifo_eviction_caps_entries() {
        let cache = SearchCache::new(2);
        let hits = AtomicUsize::new(0);

        for text in ["a", "b", "c"] {
            cache
                .get_or_fetch(&query(text), || async {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Ok(Vec::new())
                })
                .await
                .unwrap();
        }
        assert_eq!(cache.len().await, 2);

        // "a" was evicted; fetching it again hits the backend.
        cache
            .get_or_fetch(&query("a"), || async {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            })
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }
}
