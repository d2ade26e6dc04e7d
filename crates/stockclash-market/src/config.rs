//! Configuration for market-data retrieval

use serde::{Deserialize, Serialize};
use std::time::Duration;
use stockclash_utils::AppConfig;
use stockclash_utils::config::DEFAULT_YAHOO_BASE;

/// Endpoint that hands out the session cookie needed for a crumb
pub const YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Configuration for the market-data client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Base URL of the Yahoo Finance API
    pub base_url: String,

    /// URL visited first to obtain a session cookie; `None` skips the step
    pub cookie_url: Option<String>,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// User agent header
    pub user_agent: String,

    /// Maximum number of characters kept from a business summary
    pub summary_limit: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for MarketConfig {
    fn from(app: &AppConfig) -> Self {
        // The cookie handshake only makes sense against the real Yahoo host.
        let cookie_url =
            (app.yahoo_base == DEFAULT_YAHOO_BASE).then(|| YAHOO_COOKIE_URL.to_string());
        Self {
            base_url: app.yahoo_base.clone(),
            cookie_url,
            request_timeout: app.market_timeout,
            user_agent: app.user_agent.clone(),
            summary_limit: app.summary_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockclash_utils::config::DEFAULT_SUMMARY_LIMIT;

    #[test]
    fn test_default_config() {
        let config = MarketConfig::default();
        assert_eq!(config.base_url, DEFAULT_YAHOO_BASE);
        assert_eq!(config.cookie_url.as_deref(), Some(YAHOO_COOKIE_URL));
        assert_eq!(config.summary_limit, DEFAULT_SUMMARY_LIMIT);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_custom_base_skips_cookie() {
        let app = AppConfig {
            yahoo_base: "http://127.0.0.1:4010".to_string(),
            market_timeout: Duration::from_secs(5),
            ..AppConfig::default()
        };
        let config = MarketConfig::from(&app);
        assert_eq!(config.base_url, "http://127.0.0.1:4010");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.cookie_url.is_none());
    }
}
