//! # Route Table Module
//!
//! Loads declarative route tables from YAML, JSON or TOML and builds a frozen
//! route trie from them. Handlers and middleware are referenced by name; the
//! application maps names to code.
//!
//! ## Format
//!
//! ```yaml
//! middleware: [request_log]        # applies to every route
//! routes:
//!   - path: /users
//!     handlers:
//!       get: list_users
//!       post: create_user
//!     middleware: [auth]           # applies to /users and everything below
//!   - path: /users/:id
//!     handlers:
//!       get: get_user
//!   - path: /users/new
//!     handlers:
//!       get: new_user_form
//! ```
//!
//! The file format is chosen by extension: `.yaml`/`.yml`, `.toml`, anything
//! else is parsed as JSON.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::router::{parse_method, Node, RouteError, TrieBuilder};

/// Handler name as stored in the trie
pub type HandlerName = Arc<str>;
/// Middleware name as stored in the trie
pub type MiddlewareName = Arc<str>;

/// One declared path with its per-method handlers and scoped middleware
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Path pattern, e.g. `/users/:id`
    pub path: String,
    /// Method name (case-insensitive) -> handler name
    #[serde(default)]
    pub handlers: BTreeMap<String, String>,
    /// Middleware applied to this path and everything below it
    #[serde(default)]
    pub middleware: Vec<String>,
}

/// A complete route table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Middleware applied to every route
    #[serde(default)]
    pub middleware: Vec<String>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Parse a YAML route table
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML route table")
    }

    /// Parse a JSON route table
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON route table")
    }

    /// Parse a TOML route table
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse TOML route table")
    }

    /// Number of (path, method) routes declared
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.iter().map(|r| r.handlers.len()).sum()
    }

    /// Build the frozen trie for this table
    ///
    /// # Errors
    ///
    /// Any [`RouteError`] raised while registering a path, handler or middleware.
    /// Routes are registered before middleware, so an entry may carry only
    /// middleware as long as other entries declare routes below its path.
    pub fn build(&self) -> Result<Node<HandlerName, MiddlewareName>, RouteError> {
        let mut builder: TrieBuilder<HandlerName, MiddlewareName> = TrieBuilder::new();
        for entry in &self.routes {
            for (method, handler) in &entry.handlers {
                builder.route(&entry.path, parse_method(method)?, Arc::from(handler.as_str()))?;
            }
        }
        // Middleware needs the route nodes in place
        for name in &self.middleware {
            builder.middleware("/", Arc::from(name.as_str()))?;
        }
        for entry in &self.routes {
            for name in &entry.middleware {
                builder.middleware(&entry.path, Arc::from(name.as_str()))?;
            }
        }
        Ok(builder.build())
    }
}

/// Load a route table from disk, choosing the parser by file extension
pub fn load_table(file_path: impl AsRef<Path>) -> anyhow::Result<RouteTable> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read route table {}", file_path.display()))?;

    let ext = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let table = match ext.as_deref() {
        Some("yaml") | Some("yml") => RouteTable::from_yaml(&content)?,
        Some("toml") => RouteTable::from_toml(&content)?,
        _ => RouteTable::from_json(&content)?,
    };

    info!(
        path = %file_path.display(),
        routes_count = table.route_count(),
        "Route table loaded"
    );
    Ok(table)
}

/// Load a route table and build its trie in one step
pub fn load_trie(
    file_path: impl AsRef<Path>,
) -> anyhow::Result<Node<HandlerName, MiddlewareName>> {
    let file_path = file_path.as_ref();
    let table = load_table(file_path)?;
    table
        .build()
        .with_context(|| format!("Invalid route table {}", file_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    const TABLE: &str = r#"
middleware: [request_log]
routes:
  - path: /users
    handlers:
      get: list_users
      POST: create_user
    middleware: [auth]
  - path: /users/:id
    handlers:
      get: get_user
"#;

    #[test]
    fn test_yaml_table_builds_trie() {
        let table = RouteTable::from_yaml(TABLE).unwrap();
        assert_eq!(table.route_count(), 3);
        let root = table.build().unwrap();

        let users = root.static_child("users").unwrap();
        assert_eq!(users.methods(), vec![Method::GET, Method::POST]);
        assert_eq!(users.handler(&Method::POST).map(|h| &**h), Some("create_user"));
        let user = users.dynamic_child().unwrap().node();
        let chain: Vec<&str> = user.middleware().iter().map(|m| &**m).collect();
        assert_eq!(chain, vec!["request_log", "auth"]);
    }

    #[test]
    fn test_json_and_toml_tables() {
        let json = r#"{"routes": [{"path": "/ping", "handlers": {"get": "ping"}}]}"#;
        assert_eq!(RouteTable::from_json(json).unwrap().route_count(), 1);

        let toml = r#"
[[routes]]
path = "/ping"
handlers = { get = "ping", head = "ping_head" }
"#;
        let table = RouteTable::from_toml(toml).unwrap();
        assert_eq!(table.route_count(), 2);
        assert!(table.middleware.is_empty());
    }

    #[test]
    fn test_unsupported_method_is_error() {
        let table = RouteTable::from_yaml(
            "routes:\n  - path: /tunnel\n    handlers:\n      connect: open_tunnel\n",
        )
        .unwrap();
        assert_eq!(
            table.build().err(),
            Some(RouteError::UnsupportedMethod {
                method: "connect".to_string()
            })
        );
    }

    #[test]
    fn test_middleware_only_entry_before_its_routes() {
        let table = RouteTable::from_yaml(
            "routes:\n  - path: /admin\n    middleware: [admin_only]\n  - path: /admin/stats\n    handlers: { get: stats }\n",
        )
        .unwrap();
        let root = table.build().unwrap();
        let stats = root.static_child("admin").unwrap().static_child("stats").unwrap();
        assert_eq!(&*stats.middleware()[0], "admin_only");
    }

    #[test]
    fn test_middleware_without_routes_is_error() {
        let table =
            RouteTable::from_yaml("routes:\n  - path: /ghost\n    middleware: [audit]\n").unwrap();
        assert_eq!(
            table.build().err(),
            Some(RouteError::UnknownPrefix {
                pattern: "/ghost".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(RouteTable::from_yaml("routes: [path: ").is_err());
    }
}
