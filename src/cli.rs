//! Command-line interface for inspecting and querying route tables
//!
//! ```bash
//! trie-router routes --table routes.yaml
//! trie-router resolve --table routes.yaml --method POST /users /users/42
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use http::Method;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::router::{parse_method, Router};
use crate::runtime_config::RuntimeConfig;
use crate::table::{load_trie, HandlerName, MiddlewareName};

#[derive(Parser)]
#[command(name = "trie-router")]
#[command(about = "Inspect and query segment-trie route tables", long_about = None)]
pub struct Cli {
    /// Log level (logs go to stderr)
    #[arg(long, env = "TRIE_ROUTER_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Pretty debug logs with source locations; overrides --log-level
    #[arg(long, global = true)]
    pub dev_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every registered route as METHOD PATTERN -> HANDLER
    Routes {
        /// Route table file (.yaml, .yml, .json or .toml)
        #[arg(short, long)]
        table: PathBuf,
    },
    /// Resolve paths against a route table
    Resolve {
        /// Route table file (.yaml, .yml, .json or .toml)
        #[arg(short, long)]
        table: PathBuf,

        /// HTTP method to resolve with
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request paths to resolve
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

impl Cli {
    /// Logging setup for this invocation
    ///
    /// `--dev-logs` selects [`LogConfig::default_dev`]; otherwise the
    /// `TRIE_ROUTER_LOG_*` variables apply with `--log-level` as the level.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        if self.dev_logs {
            return LogConfig::default_dev();
        }
        LogConfig {
            log_level: self.log_level.clone(),
            ..LogConfig::from_env()
        }
    }
}

type TableRouter = Router<HandlerName, MiddlewareName>;

fn load_router(table: &Path) -> anyhow::Result<TableRouter> {
    let trie = load_trie(table)?;
    Ok(Router::with_config(trie, RuntimeConfig::from_env()))
}

/// One line describing how `path` resolves for `method`
///
/// - `GET /users/42 -> get_user | middleware: [auth] | params: {id=42}`
/// - `POST /users/42 -> 405 (allow: DELETE, GET)`
/// - `GET /nope -> 404`
#[must_use]
pub fn describe_resolution(router: &TableRouter, method: &Method, path: &str) -> String {
    if let Some(found) = router.resolve(path, method) {
        let middleware: Vec<&str> = found.middleware.iter().map(|m| &**m).collect();
        let params: Vec<String> = found
            .params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        return format!(
            "{method} {path} -> {} | middleware: [{}] | params: {{{}}}",
            found.handler,
            middleware.join(", "),
            params.join(", ")
        );
    }

    let allowed = router.allowed_methods(path);
    if allowed.is_empty() {
        format!("{method} {path} -> 404")
    } else {
        let allowed: Vec<&str> = allowed.iter().map(Method::as_str).collect();
        format!("{method} {path} -> 405 (allow: {})", allowed.join(", "))
    }
}

/// Execute a parsed command, writing results to `out`
pub fn run_cli(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Routes { table } => {
            let router = load_router(table)?;
            for (method, pattern, handler) in router.route_patterns() {
                writeln!(out, "{method} {pattern} -> {handler}")?;
            }
        }
        Commands::Resolve {
            table,
            method,
            paths,
        } => {
            let router = load_router(table)?;
            let method = parse_method(method).context("Invalid --method")?;
            for path in paths {
                writeln!(out, "{}", describe_resolution(&router, &method, path))?;
            }
        }
    }
    Ok(())
}
