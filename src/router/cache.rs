//! Lookup cache
//!
//! Memoizes successful resolutions keyed by the raw request path and then by
//! method. Entries are never evicted: the trie is frozen once a [`Router`]
//! owns it, so a cached result can never go stale.
//!
//! Only successful lookups are stored; unknown paths always re-walk the trie.
//! That does not bound the cache: every distinct value captured by a dynamic
//! segment (`/users/1`, `/users/2`, ...) and every spelling of the same path
//! (`/users/1/`, `//users/1`) is its own key, and nothing is ever removed.
//! Callers exposed to untrusted input can disable the cache through
//! [`RuntimeConfig`] or call [`LookupCache::clear`].
//!
//! [`Router`]: super::Router
//! [`RuntimeConfig`]: crate::runtime_config::RuntimeConfig

use dashmap::DashMap;
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;

use super::core::LookupResult;

/// Two-level `path -> method -> result` map safe for concurrent use
///
/// Concurrent `put`s for the same key are last-writer-wins. Because a
/// resolution is deterministic for a frozen trie, racing writers always store
/// equal values.
pub struct LookupCache<H, M> {
    entries: DashMap<String, HashMap<Method, Arc<LookupResult<H, M>>>>,
}

impl<H, M> Default for LookupCache<H, M> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<H, M> LookupCache<H, M> {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result
    ///
    /// Checks the path first, then the method. A miss at either level is
    /// `None`; the caller falls back to walking the trie.
    #[inline]
    #[must_use]
    pub fn get(&self, path: &str, method: &Method) -> Option<Arc<LookupResult<H, M>>> {
        let methods = self.entries.get(path)?;
        methods.get(method).map(Arc::clone)
    }

    /// Store a result for `(path, method)`, replacing any previous entry
    pub fn put(&self, path: &str, method: Method, result: Arc<LookupResult<H, M>>) {
        self.entries
            .entry(path.to_string())
            .or_default()
            .insert(method, result);
    }

    /// Number of cached `(path, method)` pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(|entry| entry.value().len()).sum()
    }

    /// True when nothing has been cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct paths with at least one cached method
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.entries.len()
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Params;

    fn result(handler: &'static str) -> Arc<LookupResult<&'static str, &'static str>> {
        Arc::new(LookupResult {
            handler,
            middleware: Arc::from(vec!["log"]),
            params: Params::new(),
        })
    }

    #[test]
    fn test_get_unknown_path_is_none() {
        let cache: LookupCache<&str, &str> = LookupCache::new();
        assert!(cache.get("/nothing", &Method::GET).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_known_path_other_method_is_none() {
        let cache = LookupCache::new();
        cache.put("/x", Method::GET, result("get_x"));
        assert!(cache.get("/x", &Method::GET).is_some());
        assert!(cache.get("/x", &Method::POST).is_none());
    }

    #[test]
    fn test_keys_are_raw_paths() {
        let cache = LookupCache::new();
        cache.put("/a//b/", Method::GET, result("ab"));
        assert!(cache.get("/a//b/", &Method::GET).is_some());
        assert!(cache.get("/a/b", &Method::GET).is_none());
    }

    #[test]
    fn test_put_last_writer_wins() {
        let cache = LookupCache::new();
        cache.put("/x", Method::GET, result("first"));
        cache.put("/x", Method::GET, result("second"));
        assert_eq!(cache.get("/x", &Method::GET).unwrap().handler, "second");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_len_counts_methods_per_path() {
        let cache = LookupCache::new();
        cache.put("/x", Method::GET, result("get_x"));
        cache.put("/x", Method::POST, result("post_x"));
        cache.put("/y", Method::GET, result("get_y"));
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.path_count(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_identical_puts() {
        let cache = LookupCache::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for i in 0..200 {
                        let path = format!("/items/{}", i % 20);
                        cache.put(&path, Method::GET, result("get_item"));
                        assert_eq!(cache.get(&path, &Method::GET).unwrap().handler, "get_item");
                    }
                });
            }
        });
        assert_eq!(cache.path_count(), 20);
        assert_eq!(cache.len(), 20);
    }
}
