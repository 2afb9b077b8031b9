//! CocktailDB API client
//!
//! Thin client over the public CocktailDB JSON API.

use std::time::Duration;

use crate::config::cocktaildb::SEARCH_PARAM;
use crate::config::Config;
use crate::error::{CocktailDbError, Result};
use crate::cocktaildb::types::{Drink, SearchResponse};

/// CocktailDB API client
pub struct CocktailDbClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Search endpoint URL
    search_url: String,

    /// Per-request timeout, kept for error reporting
    timeout: Duration,
}

impl CocktailDbClient {
    /// Create a new CocktailDB client
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            search_url: config.search_url(),
            timeout: config.request_timeout,
        })
    }

    /// URL of a search-by-name request
    pub fn search_request_url(&self, name: &str) -> String {
        format!(
            "{}?{}={}",
            self.search_url,
            SEARCH_PARAM,
            urlencoding::encode(name)
        )
    }

    /// Search drinks by name
    ///
    /// Returns `Ok(None)` when the API reports no matches.
    pub async fn search_by_name(&self, name: &str) -> Result<Option<Vec<Drink>>> {
        let url = self.search_request_url(name);
        tracing::debug!(%url, "Searching CocktailDB");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CocktailDbError::RequestFailed { status }.into());
        }

        let body = response.text().await.map_err(|e| self.request_error(e))?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| CocktailDbError::Decode {
                message: e.to_string(),
            })?;

        let drinks = parsed.into_drinks();
        tracing::debug!(
            matches = drinks.as_ref().map_or(0, Vec::len),
            "CocktailDB search completed"
        );

        Ok(drinks)
    }

    fn request_error(&self, err: reqwest::Error) -> CocktailDbError {
        if err.is_timeout() {
            CocktailDbError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            CocktailDbError::from(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_url_encodes_name() {
        let client = CocktailDbClient::new(&Config::default()).unwrap();
        assert_eq!(
            client.search_request_url("Long Island Tea & Co"),
            "https://www.thecocktaildb.com/api/json/v1/1/search.php?s=Long%20Island%20Tea%20%26%20Co"
        );
    }

    #[test]
    fn test_search_request_url_uses_configured_base() {
        let config = Config::default()
            .with_api_base_url("http://localhost:8080/")
            .unwrap();
        let client = CocktailDbClient::new(&config).unwrap();
        assert_eq!(
            client.search_request_url("margarita"),
            "http://localhost:8080/search.php?s=margarita"
        );
    }
}
