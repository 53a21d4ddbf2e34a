//! # trie-router
//!
//! **trie-router** is the dispatch layer between "a request arrived" and "business logic
//! runs": given a request path and an HTTP method it resolves the handler, the middleware
//! chain and the named path parameters captured by dynamic segments.
//!
//! ## Overview
//!
//! Routes are declared as patterns (`/users/:id/posts`) and frozen into a segment trie.
//! Resolution walks the trie one segment at a time, preferring literal segments over
//! dynamic ones at every depth, and memoizes successful results per `(path, method)` so
//! repeated requests skip the walk.
//!
//! ## Architecture
//!
//! - **[`router`]** - Trie nodes, registration, the resolver and its lookup cache
//! - **[`table`]** - Declarative route tables (YAML, JSON, TOML)
//! - **[`runtime_config`]** - Environment-driven runtime settings
//! - **[`logging`]** - Structured logging setup on `tracing`
//! - **[`cli`]** - The `trie-router` command-line tool
//!
//! ### Request Resolution Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Server as Transport
//!     participant Router as Router
//!     participant Cache as LookupCache
//!     participant Trie as Route Trie
//!
//!     Server->>Router: resolve("/users/42", GET)
//!     Router->>Cache: get("/users/42", GET)
//!     alt Cache Hit
//!         Cache-->>Router: Arc<LookupResult>
//!         Router-->>Server: handler, middleware, params
//!     end
//!     Router->>Trie: walk segments ["users", "42"]
//!     Trie->>Trie: "users" static child
//!     Trie->>Trie: "42" dynamic child :id
//!     alt Dead End or No Handler for Method
//!         Trie-->>Router: None
//!         Router-->>Server: None (404/405)
//!     end
//!     Trie-->>Router: node + {id: "42"}
//!     Router->>Cache: put("/users/42", GET, result)
//!     Router-->>Server: handler, middleware, params
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use trie_router::router::{Router, TrieBuilder};
//!
//! # fn main() -> Result<(), trie_router::router::RouteError> {
//! let mut builder = TrieBuilder::new();
//! builder
//!     .route("/", Method::GET, "index")?
//!     .route("/users/:id", Method::GET, "get_user")?
//!     .route("/users/:id", Method::DELETE, "delete_user")?
//!     .middleware("/users", "auth")?;
//! let router = Router::new(builder.build());
//!
//! let found = router.resolve("/users/42", &Method::DELETE).unwrap();
//! assert_eq!(found.handler, "delete_user");
//! assert_eq!(found.params.get("id"), Some("42"));
//!
//! // 404 vs 405
//! assert!(router.resolve("/users/42", &Method::POST).is_none());
//! assert_eq!(router.allowed_methods("/users/42"), vec![Method::DELETE, Method::GET]);
//! assert!(router.allowed_methods("/nowhere").is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! | Variable | Default | Effect |
//! |---|---|---|
//! | `TRIE_ROUTER_CACHE` | on | `off`/`false`/`0`/`no` disables the lookup cache |
//! | `TRIE_ROUTER_SLOW_LOOKUP_US` | `1000` | walks slower than this log at WARN |
//! | `TRIE_ROUTER_LOG_LEVEL` | `info` | log level |
//! | `TRIE_ROUTER_LOG_FORMAT` | `json` | `json` or `pretty` |
//! | `TRIE_ROUTER_LOG_FILTER` | - | extra `EnvFilter` directives |

pub mod cli;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod table;

pub use router::{LookupResult, Node, Params, RouteError, Router, TrieBuilder};
pub use runtime_config::RuntimeConfig;
pub use table::{load_table, load_trie, RouteTable};
