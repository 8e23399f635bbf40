//! Query store - explicit cache of fetched collections
//!
//! Entries are keyed by collection name and marked stale after a
//! successful mutation, so the next read goes back to the server.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A cached collection snapshot
#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub data: T,
    pub last_fetched: DateTime<Utc>,
    pub stale: bool,
}

#[derive(Debug)]
pub struct QueryStore<T> {
    entries: HashMap<String, CacheEntry<T>>,
}

impl<T> Default for QueryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryStore<T> {
    pub fn new() -> Self {
        QueryStore {
            entries: HashMap::new(),
        }
    }

    /// Replace the snapshot for `key` wholesale
    pub fn put(&mut self, key: &str, data: T) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                last_fetched: Utc::now(),
                stale: false,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// True when an entry exists and has not been invalidated
    pub fn is_fresh(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| !e.stale)
    }

    /// Mark `key` stale. Data is kept so it can still be shown while the
    /// refetch is in flight.
    pub fn invalidate(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            tracing::debug!(key, "Invalidating query");
            entry.stale = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_invalidate() {
        let mut store: QueryStore<Vec<u32>> = QueryStore::new();
        assert!(!store.is_fresh("tableros"));

        store.put("tableros", vec![1, 2, 3]);
        assert!(store.is_fresh("tableros"));

        store.invalidate("tableros");
        assert!(!store.is_fresh("tableros"));
        assert_eq!(store.get("tableros").unwrap().data, vec![1, 2, 3]);

        store.put("tableros", vec![4]);
        assert!(store.is_fresh("tableros"));
        assert_eq!(store.get("tableros").unwrap().data, vec![4]);
    }

    #[test]
    fn test_invalidate_missing_key_is_noop() {
        let mut store: QueryStore<Vec<u32>> = QueryStore::new();
        store.invalidate("otros");
        assert!(store.get("otros").is_none());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store: QueryStore<u32> = QueryStore::new();
        store.put("a", 1);
        store.put("b", 2);
        store.invalidate("a");
        assert!(!store.is_fresh("a"));
        assert!(store.is_fresh("b"));
    }
}
