//! Error types for market-data retrieval

use thiserror::Error;

/// Why a ticker could not be turned into a summary
///
/// [`MarketDataFetcher::fetch`](crate::MarketDataFetcher::fetch) collapses all
/// of these into `None`; the variants stay available to callers that want to
/// tell them apart.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The ticker was empty or contained characters no exchange uses
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    /// The provider does not know the ticker
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with something we could not read
    #[error("Malformed response for {symbol}: {reason}")]
    Malformed { symbol: String, reason: String },

    /// The provider reported an error of its own
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Result type alias for market-data operations
pub type Result<T> = std::result::Result<T, FetchError>;
