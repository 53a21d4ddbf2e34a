//! # Router Module
//!
//! Path matching and route resolution over a segment trie.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Building a route trie from declared patterns ([`TrieBuilder`])
//! - Resolving an incoming `(path, method)` to a handler, middleware chain and
//!   path parameters ([`Router::resolve`])
//! - Memoizing successful resolutions per `(path, method)` ([`LookupCache`])
//!
//! ## Architecture
//!
//! 1. **Registration**: patterns such as `/users/:id` are inserted into a trie
//!    where each node holds literal children, at most one dynamic child, a
//!    per-method handler table and a middleware chain. `build()` freezes it.
//!
//! 2. **Matching**: the request path is split into non-empty segments. At each
//!    segment a literal child is taken if present, otherwise the dynamic child
//!    captures the segment into the params. There is no backtracking: once a
//!    branch is chosen a dead end is final.
//!
//! 3. **Caching**: a successful resolution is stored under the raw path and
//!    method. Repeated requests skip the walk entirely.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use trie_router::router::{Router, TrieBuilder};
//!
//! # fn main() -> Result<(), trie_router::router::RouteError> {
//! let mut builder = TrieBuilder::<&str, &str>::new();
//! builder
//!     .route("/users/:id/posts/:post_id", Method::GET, "get_post")?
//!     .route("/users/new", Method::GET, "new_user")?;
//! let router = Router::new(builder.build());
//!
//! let found = router.resolve("/users/7/posts/99", &Method::GET).unwrap();
//! assert_eq!(found.handler, "get_post");
//! assert_eq!(found.params.get("id"), Some("7"));
//! assert_eq!(found.params.get("post_id"), Some("99"));
//!
//! assert!(router.resolve("/users/7", &Method::GET).is_none());
//! # Ok(())
//! # }
//! ```

mod builder;
mod cache;
mod core;
mod error;
mod node;
mod stats;

pub use builder::TrieBuilder;
pub use cache::LookupCache;
pub use self::core::{LookupResult, ParamVec, Params, Router, MAX_INLINE_PARAMS};
pub use error::RouteError;
pub use node::{parse_method, split_segments, DynamicChild, Node, SUPPORTED_METHODS};
pub use stats::{RouterStats, StatsSnapshot};
