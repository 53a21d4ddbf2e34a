//! Router core module - hot path for request routing.
//!
//! A lookup first consults the [`LookupCache`]; on a miss it walks the trie
//! one segment at a time. At every depth a literal child wins over the dynamic
//! child, and once a child is chosen the walk never backtracks.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::cache::LookupCache;
use super::node::{split_segments, Node};
use super::stats::RouterStats;
use crate::runtime_config::RuntimeConfig;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/:id/posts/:post_id).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names are `Arc<str>` shared with the trie; values are per-request
/// data copied out of the path.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Path parameters captured by dynamic segments
///
/// Names are unique: if a pattern reuses a name at two depths, the deeper
/// segment's value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(ParamVec);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding of `name`
    pub fn insert(&mut self, name: Arc<str>, value: &str) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value.to_string();
        } else {
            self.0.push((name, value.to_string()));
        }
    }

    /// Value captured for `name`
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, value)` pairs in capture order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Convert to a HashMap for handler-facing request contexts
    /// Note: This allocates - use get() in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Result of successfully resolving a request path
///
/// Shared behind an `Arc`: every hit on the same `(path, method)` returns the
/// same allocation, so handler, middleware chain and params are identical
/// across lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult<H, M> {
    /// Handler registered for the requested method
    pub handler: H,
    /// Middleware chain of the resolved node, outermost first
    pub middleware: Arc<[M]>,
    /// Values captured by dynamic segments
    pub params: Params,
}

/// Router that resolves request paths against a frozen route trie
///
/// Owns the trie root, so the trie cannot be mutated once lookups begin, and
/// owns its own [`LookupCache`], so independent routers never share state.
///
/// # Performance
///
/// - Cache hit: one hash lookup on the raw path plus one on the method
/// - Cache miss: O(segments), one map probe per segment
/// - Params up to [`MAX_INLINE_PARAMS`] stay on the stack
pub struct Router<H, M> {
    root: Node<H, M>,
    cache: LookupCache<H, M>,
    stats: RouterStats,
    config: RuntimeConfig,
}

impl<H: Clone, M> Router<H, M> {
    /// Create a router over `root` with default runtime configuration
    #[must_use]
    pub fn new(root: Node<H, M>) -> Self {
        Self::with_config(root, RuntimeConfig::default())
    }

    /// Create a router over `root` with explicit runtime configuration
    #[must_use]
    pub fn with_config(root: Node<H, M>, config: RuntimeConfig) -> Self {
        info!(
            routes_count = root.route_count(),
            cache_enabled = config.cache_enabled,
            slow_lookup_us = config.slow_lookup_threshold.as_micros(),
            routing_algorithm = "segment_trie",
            "Routing table loaded"
        );
        Self {
            root,
            cache: LookupCache::new(),
            stats: RouterStats::default(),
            config,
        }
    }

    /// Resolve `path` and `method` to a handler, middleware chain and params
    ///
    /// # Returns
    ///
    /// * `Some(result)` - the path resolves and has a handler for `method`
    /// * `None` - unknown path, or no handler for `method` at that path
    ///
    /// Successful results are cached under the raw `path`; failures are not.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// if let Some(found) = router.resolve("/users/123", &Method::GET) {
    ///     println!("User ID: {:?}", found.params.get("id"));
    /// }
    /// ```
    pub fn resolve(&self, path: &str, method: &Method) -> Option<Arc<LookupResult<H, M>>> {
        self.stats.record_lookup();

        if self.config.cache_enabled {
            if let Some(hit) = self.cache.get(path, method) {
                self.stats.record_cache_hit();
                debug!(method = %method, path = %path, "Route cache hit");
                return Some(hit);
            }
        }

        debug!(method = %method, path = %path, algorithm = "segment_trie", "Route match attempt");

        let match_start = Instant::now();
        let walked = self.walk(path);
        let match_duration = match_start.elapsed();

        let Some((node, params)) = walked else {
            self.stats.record_not_found();
            debug!(
                method = %method,
                path = %path,
                duration_us = match_duration.as_micros(),
                "No route matched"
            );
            return None;
        };

        let Some(handler) = node.handler(method) else {
            self.stats.record_not_found();
            debug!(
                method = %method,
                path = %path,
                allowed = ?node.methods(),
                "No handler for method"
            );
            return None;
        };

        let result = Arc::new(LookupResult {
            handler: handler.clone(),
            middleware: Arc::clone(node.middleware()),
            params,
        });

        if match_duration > self.config.slow_lookup_threshold {
            warn!(
                method = %method,
                path = %path,
                path_params = ?result.params,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            info!(
                method = %method,
                path = %path,
                path_params = ?result.params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        if self.config.cache_enabled {
            self.cache.put(path, method.clone(), Arc::clone(&result));
        }
        Some(result)
    }

    /// Methods registered at the node `path` resolves to
    ///
    /// Empty when the path does not resolve. A non-empty result for a path
    /// where `resolve` failed means the method is not allowed rather than the
    /// path being unknown. Never reads or writes the cache.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        self.walk(path)
            .map(|(node, _)| node.methods())
            .unwrap_or_default()
    }
}

impl<H, M> Router<H, M> {
    /// Walk the trie segment by segment, static before dynamic, no backtracking
    fn walk(&self, path: &str) -> Option<(&Node<H, M>, Params)> {
        self.stats.record_walk();
        let mut node = &self.root;
        let mut params = Params::new();
        for segment in split_segments(path) {
            node = if let Some(child) = node.static_child(segment) {
                child
            } else if let Some(dynamic) = node.dynamic_child() {
                params.insert(Arc::clone(&dynamic.name), segment);
                dynamic.node()
            } else {
                return None;
            };
        }
        Some((node, params))
    }

    /// Root of the frozen trie
    #[must_use]
    pub fn root(&self) -> &Node<H, M> {
        &self.root
    }

    /// The lookup cache owned by this router
    #[must_use]
    pub fn cache(&self) -> &LookupCache<H, M> {
        &self.cache
    }

    /// Lookup counters
    #[must_use]
    pub fn stats(&self) -> &RouterStats {
        &self.stats
    }

    /// Runtime configuration this router was built with
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// All registered routes as `(method, pattern, handler)`, sorted by pattern
    /// then method
    ///
    /// Dynamic segments are rendered as `:name`.
    #[must_use]
    pub fn route_patterns(&self) -> Vec<(Method, String, &H)> {
        let mut patterns = Vec::with_capacity(self.root.route_count());
        self.root.collect_patterns("", &mut patterns);
        patterns.sort_by(|(ma, pa, _), (mb, pb, _)| {
            pa.cmp(pb).then_with(|| ma.as_str().cmp(mb.as_str()))
        });
        patterns
    }
}
