//! Market-data source trait

use crate::{RawQuote, Result};
use async_trait::async_trait;

/// A provider that can look up the raw fields for one ticker
///
/// Implementations report failures through [`FetchError`](crate::FetchError)
/// and leave defaulting to [`StockSummary::normalize`](crate::StockSummary::normalize).
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the raw record for an upper-case ticker symbol
    async fn quote(&self, symbol: &str) -> Result<RawQuote>;

    /// Get the source name (e.g., "yahoo")
    fn name(&self) -> &str;
}
