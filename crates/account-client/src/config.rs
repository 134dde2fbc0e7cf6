//! Configuration types and loading
//!
//! Configuration is rejected loudly at construction time: zero tokens, a
//! cache TTL below the floor, or a malformed token entry never reach the
//! pool. The same validation runs whether the config comes from a TOML
//! file or is built programmatically.

use std::path::Path;

use common::{Error, Result};
use serde::Deserialize;

/// Minimum cache TTL. Shorter values are a configuration error, not
/// silently clamped.
pub const MIN_CACHE_DURATION_MS: u64 = 1000;

/// Default cache TTL when the config omits one (10 minutes).
pub const DEFAULT_CACHE_DURATION_MS: u64 = 10 * 60 * 1000;

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// Named tokens; file order is pool order.
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

/// Upstream API settings
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Cache settings
#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    /// Process-wide TTL shared by every cache namespace, in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_CACHE_DURATION_MS,
        }
    }
}

fn default_duration_ms() -> u64 {
    DEFAULT_CACHE_DURATION_MS
}

/// One named token. The name is the human-readable handle the outer layer
/// selects tokens by; the value is the bearer secret.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub name: String,
    pub value: String,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    ///
    /// A non-integer or negative `duration_ms` fails TOML deserialization
    /// (the field is `u64`); the floor check below catches the rest.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration. Called by `load` and by `Client`
    /// construction for programmatically built configs.
    pub fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http://")
            && !self.api.base_url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.tokens.is_empty() {
            return Err(Error::Config("no tokens are configured".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.tokens {
            if entry.name.trim().is_empty() || entry.value.trim().is_empty() {
                return Err(Error::Config(format!(
                    "token entry \"{}\" must have a non-empty name and value",
                    entry.name
                )));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate token name \"{}\"",
                    entry.name
                )));
            }
        }

        if self.cache.duration_ms < MIN_CACHE_DURATION_MS {
            return Err(Error::Config(format!(
                "cache duration_ms must be at least {MIN_CACHE_DURATION_MS}, got: {}",
                self.cache.duration_ms
            )));
        }

        Ok(())
    }
}
