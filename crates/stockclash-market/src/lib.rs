//! Market data for stockclash
//!
//! This crate turns a ticker symbol into a fully populated [`StockSummary`]:
//!
//! - [`MarketDataSource`]: the seam to an upstream provider, returning a
//!   [`RawQuote`] in which every field may be missing
//! - [`YahooFinanceClient`]: the Yahoo Finance `quoteSummary` implementation
//! - [`StockSummary::normalize`]: the single place where defaults are applied
//! - [`MarketDataFetcher`]: ties the two together, exposing both a tagged
//!   [`try_fetch`](MarketDataFetcher::try_fetch) and a collapsing
//!   [`fetch`](MarketDataFetcher::fetch)
//!
//! # Example
//!
//! ```rust,ignore
//! use stockclash_market::{MarketConfig, MarketDataFetcher, YahooFinanceClient};
//! use std::sync::Arc;
//!
//! let config = MarketConfig::default();
//! let client = Arc::new(YahooFinanceClient::new(&config)?);
//! let fetcher = MarketDataFetcher::new(client, config.summary_limit);
//!
//! if let Some(summary) = fetcher.fetch("AAPL").await {
//!     println!("{} trades at ${}", summary.name, summary.price);
//! }
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod source;
pub mod summary;
pub mod yahoo;

pub use config::MarketConfig;
pub use error::{FetchError, Result};
pub use fetcher::MarketDataFetcher;
pub use source::MarketDataSource;
pub use summary::{NO_SUMMARY, PeRatio, RawQuote, StockSummary, TRUNCATION_MARKER, truncate_summary};
pub use yahoo::YahooFinanceClient;
