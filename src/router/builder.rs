//! Route registration
//!
//! [`TrieBuilder`] turns declared routes into a frozen [`Node`] tree. Patterns
//! use `:name` (or `{name}`) for dynamic segments; every other segment is a
//! literal. Middleware is scoped by prefix: a middleware attached to `/api`
//! runs for every route below `/api`, after any middleware of its ancestors.

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::error::RouteError;
use super::node::{split_segments, DynamicChild, Node, SUPPORTED_METHODS};

/// Parameter name of a dynamic segment, or `None` for a literal
fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix(':').or_else(|| {
        segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
    })
}

struct PendingNode<H, M> {
    static_children: HashMap<String, PendingNode<H, M>>,
    dynamic_child: Option<(Arc<str>, Box<PendingNode<H, M>>)>,
    handlers: HashMap<Method, H>,
    middleware: Vec<M>,
}

impl<H, M> PendingNode<H, M> {
    fn new() -> Self {
        Self {
            static_children: HashMap::new(),
            dynamic_child: None,
            handlers: HashMap::new(),
            middleware: Vec::new(),
        }
    }

    /// Reject `pattern` if it cannot be placed, without touching the tree
    ///
    /// Follows existing nodes as far as they go; past that point only the
    /// parameter names themselves are checked.
    fn check(&self, pattern: &str) -> Result<(), RouteError> {
        let mut node = Some(self);
        for segment in split_segments(pattern) {
            node = match param_name(segment) {
                Some("") => {
                    return Err(RouteError::EmptyParamName {
                        pattern: pattern.to_string(),
                    })
                }
                Some(name) => match node.and_then(|n| n.dynamic_child.as_ref()) {
                    Some((existing, _)) if &**existing != name => {
                        return Err(RouteError::ParamNameConflict {
                            pattern: pattern.to_string(),
                            existing: existing.to_string(),
                            requested: name.to_string(),
                        })
                    }
                    Some((_, child)) => Some(&**child),
                    None => None,
                },
                None => node.and_then(|n| n.static_children.get(segment)),
            };
        }
        Ok(())
    }

    /// Walk (creating as needed) to the node for `pattern`
    ///
    /// Nothing is created unless the whole pattern is valid.
    fn descend(&mut self, pattern: &str) -> Result<&mut Self, RouteError> {
        self.check(pattern)?;
        let mut node = self;
        for segment in split_segments(pattern) {
            node = match param_name(segment) {
                Some(name) => {
                    let (_, child) = node
                        .dynamic_child
                        .get_or_insert_with(|| (Arc::from(name), Box::new(PendingNode::new())));
                    &mut **child
                }
                None => node
                    .static_children
                    .entry(segment.to_string())
                    .or_insert_with(PendingNode::new),
            };
        }
        Ok(node)
    }

    /// Existing node for `pattern`, never creating one
    fn find_mut(&mut self, pattern: &str) -> Result<Option<&mut Self>, RouteError> {
        self.check(pattern)?;
        let mut node = self;
        for segment in split_segments(pattern) {
            let next = match param_name(segment) {
                Some(_) => node.dynamic_child.as_mut().map(|(_, child)| &mut **child),
                None => node.static_children.get_mut(segment),
            };
            match next {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(Some(node))
    }

    /// Freeze into a [`Node`], prepending the middleware inherited from ancestors
    fn freeze(self, inherited: &[M]) -> Node<H, M>
    where
        M: Clone,
    {
        let chain: Vec<M> = inherited.iter().cloned().chain(self.middleware).collect();
        let static_children = self
            .static_children
            .into_iter()
            .map(|(segment, child)| (segment, child.freeze(&chain)))
            .collect();
        let dynamic_child = self.dynamic_child.map(|(name, child)| {
            Box::new(DynamicChild {
                name,
                node: (*child).freeze(&chain),
            })
        });
        Node {
            static_children,
            dynamic_child,
            handlers: self.handlers,
            middleware: Arc::from(chain),
        }
    }
}

/// Builder for a route trie
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use trie_router::router::{Router, TrieBuilder};
///
/// # fn main() -> Result<(), trie_router::router::RouteError> {
/// let mut builder = TrieBuilder::new();
/// builder
///     .route("/users/:id", Method::GET, "get_user")?
///     .route("/users/new", Method::GET, "new_user_form")?
///     .middleware("/users", "auth")?;
///
/// let router = Router::new(builder.build());
/// let found = router.resolve("/users/42", &Method::GET).unwrap();
/// assert_eq!(found.handler, "get_user");
/// assert_eq!(found.params.get("id"), Some("42"));
/// assert_eq!(&found.middleware[..], &["auth"]);
/// # Ok(())
/// # }
/// ```
pub struct TrieBuilder<H, M> {
    root: PendingNode<H, M>,
}

impl<H, M> Default for TrieBuilder<H, M> {
    fn default() -> Self {
        Self {
            root: PendingNode::new(),
        }
    }
}

impl<H, M> TrieBuilder<H, M> {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` at `pattern`
    ///
    /// Registering the same pattern and method twice replaces the handler.
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnsupportedMethod`] for methods outside [`SUPPORTED_METHODS`]
    /// - [`RouteError::EmptyParamName`] for `:` or `{}` segments
    /// - [`RouteError::ParamNameConflict`] when a different parameter name is
    ///   already declared at the same position
    pub fn route(
        &mut self,
        pattern: &str,
        method: Method,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        if !SUPPORTED_METHODS.contains(&method) {
            return Err(RouteError::UnsupportedMethod {
                method: method.to_string(),
            });
        }
        let node = self.root.descend(pattern)?;
        debug!(pattern = %pattern, method = %method, "Route registered");
        node.handlers.insert(method, handler);
        Ok(self)
    }

    /// Attach `middleware` to `pattern` and everything below it
    ///
    /// `pattern` must already be a registered route or a prefix of one, so
    /// register routes first.
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnknownPrefix`] when no route lives at or below `pattern`
    /// - the pattern errors of [`TrieBuilder::route`]
    pub fn middleware(&mut self, pattern: &str, middleware: M) -> Result<&mut Self, RouteError> {
        let Some(node) = self.root.find_mut(pattern)? else {
            return Err(RouteError::UnknownPrefix {
                pattern: pattern.to_string(),
            });
        };
        node.middleware.push(middleware);
        Ok(self)
    }

    /// Freeze the declared routes into a read-only trie
    #[must_use]
    pub fn build(self) -> Node<H, M>
    where
        M: Clone,
    {
        self.root.freeze(&[])
    }
}
