//! Route trie nodes
//!
//! A [`Node`] is one position in the segment trie. Static and dynamic children
//! coexist on the same node: a segment is tested against the literal children
//! first and only falls through to the single dynamic child when no literal
//! matches.
//!
//! Nodes are produced by [`TrieBuilder::build`](super::TrieBuilder::build) and
//! are read-only afterwards. The resolver only ever borrows them for the
//! duration of a walk.

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::RouteError;

/// HTTP methods a route can be registered for.
pub const SUPPORTED_METHODS: [Method; 8] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
    Method::TRACE,
];

/// Parse a method name (case-insensitive) into one of [`SUPPORTED_METHODS`]
///
/// # Errors
///
/// Returns [`RouteError::UnsupportedMethod`] for extension methods and `CONNECT`.
pub fn parse_method(name: &str) -> Result<Method, RouteError> {
    let upper = name.trim().to_ascii_uppercase();
    SUPPORTED_METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
        .ok_or_else(|| RouteError::UnsupportedMethod {
            method: name.to_string(),
        })
}

/// Split a path into its non-empty segments
///
/// Leading, trailing and repeated slashes produce no segments, so `/a//b/`
/// and `a/b` both yield `["a", "b"]` and `/` yields nothing.
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// The single parameter-capturing child of a node
#[derive(Debug)]
pub struct DynamicChild<H, M> {
    pub(crate) name: Arc<str>,
    pub(crate) node: Node<H, M>,
}

impl<H, M> DynamicChild<H, M> {
    /// Parameter name this child binds (e.g. `id` for `:id`)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node reached through this dynamic segment
    #[must_use]
    pub fn node(&self) -> &Node<H, M> {
        &self.node
    }
}

/// A node in the route trie
///
/// - `static_children`: literal segment -> child
/// - `dynamic_child`: at most one parameter-capturing child
/// - `handlers`: per-method handler table for the path ending here
/// - `middleware`: full middleware chain for requests resolved to this node,
///   outermost scope first
#[derive(Debug)]
pub struct Node<H, M> {
    pub(crate) static_children: HashMap<String, Node<H, M>>,
    pub(crate) dynamic_child: Option<Box<DynamicChild<H, M>>>,
    pub(crate) handlers: HashMap<Method, H>,
    pub(crate) middleware: Arc<[M]>,
}

impl<H, M> Default for Node<H, M> {
    fn default() -> Self {
        Self {
            static_children: HashMap::new(),
            dynamic_child: None,
            handlers: HashMap::new(),
            middleware: Arc::from(Vec::new()),
        }
    }
}

impl<H, M> Node<H, M> {
    /// An empty node with no children, handlers or middleware
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Child registered under the exact literal `segment`
    #[inline]
    #[must_use]
    pub fn static_child(&self, segment: &str) -> Option<&Node<H, M>> {
        self.static_children.get(segment)
    }

    /// The dynamic child, if one was declared at this position
    #[inline]
    #[must_use]
    pub fn dynamic_child(&self) -> Option<&DynamicChild<H, M>> {
        self.dynamic_child.as_deref()
    }

    /// Handler registered for `method` at exactly this node
    #[inline]
    #[must_use]
    pub fn handler(&self, method: &Method) -> Option<&H> {
        self.handlers.get(method)
    }

    /// Middleware chain applied to requests resolved to this node
    #[must_use]
    pub fn middleware(&self) -> &Arc<[M]> {
        &self.middleware
    }

    /// Methods that have a handler at this node, sorted by name
    #[must_use]
    pub fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.handlers.keys().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// True when the node has no children and no handlers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.static_children.is_empty() && self.dynamic_child.is_none() && self.handlers.is_empty()
    }

    /// Total number of (pattern, method) routes in this subtree
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.handlers.len()
            + self
                .static_children
                .values()
                .map(Node::route_count)
                .sum::<usize>()
            + self
                .dynamic_child
                .as_ref()
                .map_or(0, |d| d.node.route_count())
    }

    /// Collect `(method, pattern, handler)` for every handler in this subtree
    ///
    /// `prefix` is the pattern of this node; dynamic segments are rendered as
    /// `:name`.
    pub(crate) fn collect_patterns<'a>(
        &'a self,
        prefix: &str,
        out: &mut Vec<(Method, String, &'a H)>,
    ) {
        let here = if prefix.is_empty() { "/" } else { prefix };
        for (method, handler) in &self.handlers {
            out.push((method.clone(), here.to_string(), handler));
        }
        for (segment, child) in &self.static_children {
            child.collect_patterns(&format!("{prefix}/{segment}"), out);
        }
        if let Some(dynamic) = &self.dynamic_child {
            dynamic
                .node
                .collect_patterns(&format!("{prefix}/:{}", dynamic.name), out);
        }
    }
}
