//! Per-view query cache.
//!
//! Entries are never evicted by invalidation, only marked stale, so a view can
//! keep showing the old data while the next read refetches. A fetch that
//! overlaps an invalidation stores its result as stale.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use clinicdesk_core::errors::ClinicResult;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stale: bool,
}

#[derive(Debug)]
pub struct QueryCache<K, V> {
    name: &'static str,
    entries: RwLock<HashMap<K, Entry<V>>>,
    generation: AtomicU64,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Fresh value for `key`, if any.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| !entry.stale)
            .map(|entry| entry.value.clone())
    }

    /// Value for `key` even when stale.
    pub async fn peek(&self, key: &K) -> Option<V> {
        self.entries.read().await.get(key).map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        self.entries
            .write()
            .await
            .insert(key, Entry { value, stale: false });
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Edits a cached value in place. Returns whether the key was present.
    pub async fn update<F>(&self, key: &K, edit: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        match self.entries.write().await.get_mut(key) {
            Some(entry) => {
                edit(&mut entry.value);
                true
            }
            None => false,
        }
    }

    pub async fn is_stale(&self, key: &K) -> bool {
        self.entries
            .read()
            .await
            .get(key)
            .is_none_or(|entry| entry.stale)
    }

    pub async fn invalidate(&self, key: &K) {
        self.bump();
        if let Some(entry) = self.entries.write().await.get_mut(key) {
            entry.stale = true;
        }
    }

    pub async fn invalidate_where<F>(&self, predicate: F)
    where
        F: Fn(&K) -> bool,
    {
        self.bump();
        for (key, entry) in self.entries.write().await.iter_mut() {
            if predicate(key) {
                entry.stale = true;
            }
        }
    }

    pub async fn invalidate_all(&self) {
        self.bump();
        let mut entries = self.entries.write().await;
        debug!(cache = self.name, count = entries.len(), "Invalidating cache");
        for entry in entries.values_mut() {
            entry.stale = true;
        }
    }

    /// Returns the fresh cached value or runs `fetch` and caches its result.
    /// The lock is not held while `fetch` runs.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> ClinicResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClinicResult<V>>,
    {
        if let Some(value) = self.get(&key).await {
            debug!(cache = self.name, ?key, "Cache hit");
            return Ok(value);
        }
        debug!(cache = self.name, ?key, "Cache miss");
        let started = self.generation.load(Ordering::SeqCst);
        let value = fetch().await?;

        // Invalidations bump the generation before taking the lock, so one
        // that misses this check still marks the entry afterwards.
        let mut entries = self.entries.write().await;
        let overtaken = self.generation.load(Ordering::SeqCst) != started;
        if overtaken {
            debug!(cache = self.name, ?key, "Invalidated during fetch");
        }
        entries.insert(
            key,
            Entry {
                value: value.clone(),
                stale: overtaken,
            },
        );
        Ok(value)
    }
}
