//! Normalized stock summary

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Appended to every business summary, truncated or not
pub const TRUNCATION_MARKER: &str = "...";

/// Used when the provider has no business summary
pub const NO_SUMMARY: &str = "No summary available.";

/// Fields as they come back from a provider, any of which may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    pub long_name: Option<String>,
    pub current_price: Option<f64>,
    pub forward_pe: Option<f64>,
    pub market_cap: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub long_business_summary: Option<String>,
}

/// Price-to-earnings ratio, which some companies simply do not have
///
/// Serializes as a number, or as the string `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeRatio {
    Value(f64),
    NotAvailable,
}

impl From<Option<f64>> for PeRatio {
    fn from(value: Option<f64>) -> Self {
        value.map_or(PeRatio::NotAvailable, PeRatio::Value)
    }
}

impl fmt::Display for PeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeRatio::Value(v) => write!(f, "{v}"),
            PeRatio::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for PeRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PeRatio::Value(v) => serializer.serialize_f64(*v),
            PeRatio::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for PeRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(f64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(v) => Ok(PeRatio::Value(v)),
            Wire::Text(s) if s == "N/A" => Ok(PeRatio::NotAvailable),
            Wire::Text(s) => Err(D::Error::custom(format!(
                "expected a number or \"N/A\", got {s:?}"
            ))),
        }
    }
}

/// Key metrics for one company, with every field populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    /// Ticker the summary was fetched for
    pub symbol: String,
    /// Company name, or the ticker when the provider has none
    pub name: String,
    pub price: f64,
    pub pe_ratio: PeRatio,
    pub market_cap: f64,
    /// Year-over-year revenue growth as a fraction
    pub revenue_growth: f64,
    pub fifty_two_week_high: f64,
    /// Business summary, cut to the configured limit and followed by [`TRUNCATION_MARKER`]
    pub summary_text: String,
}

impl StockSummary {
    /// Build a summary from a provider record, filling every gap with its default.
    ///
    /// Non-finite numbers are treated as missing. Negative prices, market caps
    /// and 52-week highs are treated as missing too.
    pub fn normalize(symbol: &str, raw: RawQuote, summary_limit: usize) -> Self {
        let name = raw
            .long_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| symbol.to_string());

        let description = raw
            .long_business_summary
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        Self {
            symbol: symbol.to_string(),
            name,
            price: non_negative(raw.current_price),
            pe_ratio: PeRatio::from(finite(raw.forward_pe)),
            market_cap: non_negative(raw.market_cap),
            revenue_growth: finite(raw.revenue_growth).unwrap_or(0.0),
            fifty_two_week_high: non_negative(raw.fifty_two_week_high),
            summary_text: truncate_summary(&description, summary_limit),
        }
    }
}

/// Keep at most `limit` characters of `text` and append [`TRUNCATION_MARKER`].
///
/// The marker is appended even when nothing was cut.
pub fn truncate_summary(text: &str, limit: usize) -> String {
    let mut out: String = text.chars().take(limit).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn non_negative(value: Option<f64>) -> f64 {
    finite(value).filter(|v| *v >= 0.0).unwrap_or(0.0)
}
