//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `TRIE_ROUTER_CACHE`
//!
//! Enables or disables the per-(path, method) lookup cache. Accepts `off`,
//! `false`, `0` or `no` to disable; anything else leaves the cache on.
//!
//! Default: on
//!
//! ### `TRIE_ROUTER_SLOW_LOOKUP_US`
//!
//! Trie walks taking longer than this many microseconds are logged at WARN.
//! Accepts decimal or `0x`-prefixed hexadecimal.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use trie_router::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Lookup cache enabled: {}", config.cache_enabled);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_LOOKUP_US: u64 = 1_000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Memoize successful lookups (default: true)
    pub cache_enabled: bool,
    /// Walks slower than this are logged as warnings (default: 1 ms)
    pub slow_lookup_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            slow_lookup_threshold: Duration::from_micros(DEFAULT_SLOW_LOOKUP_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_enabled = match lookup("TRIE_ROUTER_CACHE") {
            Some(val) => !matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "off" | "false" | "0" | "no"
            ),
            None => true,
        };
        let slow_us = lookup("TRIE_ROUTER_SLOW_LOOKUP_US")
            .and_then(|val| {
                let val = val.trim();
                if let Some(hex) = val.strip_prefix("0x") {
                    u64::from_str_radix(hex, 16).ok()
                } else {
                    val.parse().ok()
                }
            })
            .unwrap_or(DEFAULT_SLOW_LOOKUP_US);
        RuntimeConfig {
            cache_enabled,
            slow_lookup_threshold: Duration::from_micros(slow_us),
        }
    }
}
