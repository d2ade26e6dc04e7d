//! Yahoo Finance API client
//!
//! Company fundamentals come from the `quoteSummary` endpoint, which wants a
//! session cookie and a matching crumb. The cookie is picked up from
//! `fc.yahoo.com`, the crumb from `/v1/test/getcrumb`.

use crate::config::MarketConfig;
use crate::error::{FetchError, Result};
use crate::source::MarketDataSource;
use crate::summary::RawQuote;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

/// quoteSummary modules holding the fields we read
const MODULES: &str = "price,summaryDetail,financialData,defaultKeyStatistics,assetProfile";

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    client: Client,
    config: MarketConfig,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(config: &MarketConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Obtain a crumb for the current cookie session, if the handshake is enabled
    async fn crumb(&self) -> Result<Option<String>> {
        let Some(cookie_url) = &self.config.cookie_url else {
            return Ok(None);
        };

        // fc.yahoo.com answers 404 but still sets the session cookie.
        let response = self.client.get(cookie_url).send().await?;
        debug!("Cookie endpoint answered {}", response.status());

        let response = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Provider(format!(
                "crumb request failed: HTTP {status}"
            )));
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(FetchError::Provider("crumb response was empty".to_string()));
        }
        Ok(Some(crumb))
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn quote(&self, symbol: &str) -> Result<RawQuote> {
        let crumb = self.crumb().await?;

        let mut request = self
            .client
            .get(format!("{}/v10/finance/quoteSummary/{symbol}", self.base()))
            .query(&[("modules", MODULES)]);
        if let Some(crumb) = &crumb {
            request = request.query(&[("crumb", crumb.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("quoteSummary answered {status} ({} bytes)", body.len());

        let value = decode_response(symbol, status, &body)?;
        parse_quote_summary(symbol, &value)
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}

/// Classify a `quoteSummary` reply by status and body.
///
/// A 404 means the ticker does not exist. Error statuses that still carry JSON
/// are passed on, since Yahoo explains the failure in the `error` object.
fn decode_response(symbol: &str, status: StatusCode, body: &str) -> Result<Value> {
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::UnknownTicker(symbol.to_string()));
    }

    serde_json::from_str(body).map_err(|e| {
        if status.is_success() {
            FetchError::Malformed {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            }
        } else {
            FetchError::Provider(format!("HTTP {status}"))
        }
    })
}

/// Pull the fields of interest out of a `quoteSummary` document
pub(crate) fn parse_quote_summary(symbol: &str, value: &Value) -> Result<RawQuote> {
    let summary = value
        .get("quoteSummary")
        .ok_or_else(|| FetchError::Malformed {
            symbol: symbol.to_string(),
            reason: "missing quoteSummary".to_string(),
        })?;

    if let Some(error) = summary.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(Value::as_str).unwrap_or_default();
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");

        return Err(if code == "Not Found" || description.contains("not found") {
            FetchError::UnknownTicker(symbol.to_string())
        } else {
            FetchError::Provider(description.to_string())
        });
    }

    let result = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
        .ok_or_else(|| FetchError::UnknownTicker(symbol.to_string()))?;

    Ok(RawQuote {
        long_name: text(result, &[("price", "longName")]),
        current_price: number(result, &[("financialData", "currentPrice")]),
        forward_pe: number(
            result,
            &[
                ("summaryDetail", "forwardPE"),
                ("defaultKeyStatistics", "forwardPE"),
            ],
        ),
        market_cap: number(result, &[("summaryDetail", "marketCap"), ("price", "marketCap")]),
        revenue_growth: number(result, &[("financialData", "revenueGrowth")]),
        fifty_two_week_high: number(result, &[("summaryDetail", "fiftyTwoWeekHigh")]),
        long_business_summary: text(result, &[("assetProfile", "longBusinessSummary")]),
    })
}

/// First string found at any of `paths`
fn text(result: &Value, paths: &[(&str, &str)]) -> Option<String> {
    paths.iter().find_map(|(module, key)| {
        result
            .get(module)?
            .get(key)?
            .as_str()
            .map(str::to_string)
    })
}

/// First number found at any of `paths`
///
/// Yahoo wraps most numbers as `{ "raw": 1.0, "fmt": "1.00" }`, and sends `{}`
/// for values it does not have.
fn number(result: &Value, paths: &[(&str, &str)]) -> Option<f64> {
    paths.iter().find_map(|(module, key)| {
        let field = result.get(module)?.get(key)?;
        field
            .as_f64()
            .or_else(|| field.get("raw").and_then(Value::as_f64))
    })
}
