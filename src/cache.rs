use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Debug, Default)]
pub struct CachePolicy {
    pub ttl: Option<Duration>,
    pub max_entries: Option<usize>,
}

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

/// Write-once store keyed by request parameters exactly as they are sent.
#[derive(Debug)]
pub struct ResponseCache<V> {
    name: &'static str,
    policy: CachePolicy,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(name: &'static str) -> Self {
        Self::with_policy(name, CachePolicy::default())
    }

    pub fn with_policy(name: &'static str, policy: CachePolicy) -> Self {
        Self {
            name,
            policy,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = Utc::now();

        {
            let entries = self.read();
            let entry = entries.get(key)?;

            if !self.is_expired(entry, now) {
                tracing::debug!(cache = self.name, key, "cache hit");
                return Some(entry.value.clone());
            }
        }

        let mut entries = self.write();
        if entries.get(key).map_or(false, |entry| self.is_expired(entry, now)) {
            tracing::debug!(cache = self.name, key, "cache entry expired");
            entries.remove(key);
        }

        None
    }

    /// Stores `value` under `key` unless a live entry already exists.
    pub fn put(&self, key: String, value: V) {
        let now = Utc::now();
        let mut entries = self.write();

        if self.policy.ttl.is_some() {
            entries.retain(|_, entry| !self.is_expired(entry, now));
        }

        if let Some(existing) = entries.get(&key) {
            if !self.is_expired(existing, now) {
                return;
            }
        } else if let Some(max_entries) = self.policy.max_entries {
            if entries.len() >= max_entries {
                evict_oldest(&mut entries);
            }
        }

        tracing::debug!(cache = self.name, key = key.as_str(), "cache insert");
        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: DateTime<Utc>) -> bool {
        match self.policy.ttl {
            Some(ttl) => now - entry.inserted_at >= ttl,
            None => false,
        }
    }

    // the map is never left half-updated, so a poisoned lock is still usable
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn evict_oldest<V>(entries: &mut HashMap<String, CacheEntry<V>>) {
    let oldest = entries
        .iter()
        .min_by_key(|(_, entry)| entry.inserted_at)
        .map(|(key, _)| key.clone());

    if let Some(key) = oldest {
        entries.remove(&key);
    }
}
