//! Configuration management for the Cocktail MCP Server
//!
//! Handles environment variables, CLI overrides and CocktailDB constants.

use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable overriding the CocktailDB base URL
pub const API_URL_ENV: &str = "COCKTAILDB_API_URL";

/// Environment variable overriding the upstream request timeout (seconds)
pub const TIMEOUT_ENV: &str = "COCKTAILDB_TIMEOUT_SECS";

/// Default upstream request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Cocktail MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the CocktailDB JSON API (no trailing slash)
    pub api_base_url: String,

    /// Timeout applied to every upstream request
    pub request_timeout: Duration,
}

impl Config {
    /// Create a new configuration from defaults and the process environment
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a configuration reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV) {
            config = config.with_api_base_url(url)?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvVar {
                var: TIMEOUT_ENV.to_string(),
                value: raw.clone(),
            })?;
            config = config.with_timeout_secs(secs)?;
        }

        Ok(config)
    }

    /// Override the CocktailDB base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "CocktailDB API URL must not be empty".to_string(),
            }
            .into());
        }
        self.api_base_url = trimmed.to_string();
        Ok(self)
    }

    /// Override the upstream request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "request timeout must be at least one second".to_string(),
            }
            .into());
        }
        self.request_timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// Full URL of the search-by-name endpoint
    pub fn search_url(&self) -> String {
        format!("{}/{}", self.api_base_url, cocktaildb::SEARCH_PATH)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: cocktaildb::API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// CocktailDB API constants
pub mod cocktaildb {
    /// Base URL for the public CocktailDB API
    pub const API_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

    /// Search-by-name endpoint, relative to the base URL
    pub const SEARCH_PATH: &str = "search.php";

    /// Query parameter carrying the cocktail name
    pub const SEARCH_PARAM: &str = "s";

    /// Number of ingredient/measure slots on a drink record
    pub const INGREDIENT_SLOTS: usize = 15;
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::CocktailMcpError;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base_url, cocktaildb::API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(
            config.search_url(),
            "https://www.thecocktaildb.com/api/json/v1/1/search.php"
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (API_URL_ENV, "http://127.0.0.1:9000/api/"),
            (TIMEOUT_ENV, "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, CocktailMcpError::Config(ConfigError::InvalidEnvVar { .. })));

        let err = Config::default().with_timeout_secs(0).unwrap_err();
        assert!(err.to_string().contains("at least one second"));
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(Config::default().with_api_base_url(" / ").is_err());
    }
}
