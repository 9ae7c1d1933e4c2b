//! Configuration Module
//!
//! Loads client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI root.
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a cached response stays valid, in seconds
    pub cache_ttl: u64,
    /// PokeAPI base URL without trailing slash
    pub api_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_TTL` - Cache TTL in seconds, must be positive (default: 30)
    /// - `POKEDEX_API_URL` - PokeAPI base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_REQUEST_TIMEOUT` - HTTP timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: env::var("POKEDEX_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &u64| *ttl > 0)
                .unwrap_or(defaults.cache_ttl),
            api_url: env::var("POKEDEX_API_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_url),
            request_timeout: env::var("POKEDEX_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 30,
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: 10,
        }
    }
}
