//! Ticker to summary

use crate::error::{FetchError, Result};
use crate::source::MarketDataSource;
use crate::summary::StockSummary;
use std::sync::Arc;
use tracing::{debug, info};

/// Fetches and normalizes one ticker at a time
#[derive(Clone)]
pub struct MarketDataFetcher {
    source: Arc<dyn MarketDataSource>,
    summary_limit: usize,
}

impl MarketDataFetcher {
    /// Create a fetcher over any market-data source
    pub fn new(source: Arc<dyn MarketDataSource>, summary_limit: usize) -> Self {
        Self {
            source,
            summary_limit,
        }
    }

    /// Fetch a summary, keeping the reason for any failure
    pub async fn try_fetch(&self, ticker: &str) -> Result<StockSummary> {
        if !is_plausible_symbol(ticker) {
            return Err(FetchError::InvalidSymbol(ticker.to_string()));
        }

        debug!(ticker, source = self.source.name(), "Fetching market data");
        let raw = self.source.quote(ticker).await?;
        Ok(StockSummary::normalize(ticker, raw, self.summary_limit))
    }

    /// Fetch a summary, reducing every failure to `None`.
    ///
    /// The cause is only logged at debug level.
    pub async fn fetch(&self, ticker: &str) -> Option<StockSummary> {
        match self.try_fetch(ticker).await {
            Ok(summary) => {
                info!(ticker, name = %summary.name, "Fetched market data");
                Some(summary)
            }
            Err(e) => {
                debug!(ticker, "Could not fetch market data: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for MarketDataFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataFetcher")
            .field("source", &self.source.name())
            .field("summary_limit", &self.summary_limit)
            .finish()
    }
}

/// Tickers are short runs of letters, digits and the few separators exchanges use
/// (`BRK.B`, `RDS-A`, `^GSPC`, `EURUSD=X`).
fn is_plausible_symbol(ticker: &str) -> bool {
    !ticker.is_empty()
        && ticker.len() <= 16
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{PeRatio, RawQuote};
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;
    use std::sync::Mutex;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    mock! {
        Source {}

        #[async_trait]
        impl MarketDataSource for Source {
            async fn quote(&self, symbol: &str) -> Result<RawQuote>;
            fn name(&self) -> &str;
        }
    }

    /// Records the level of every event
    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    fn fetcher(source: MockSource) -> MarketDataFetcher {
        MarketDataFetcher::new(Arc::new(source), 500)
    }

    #[tokio::test]
    async fn test_fetch_normalizes() {
        let mut source = MockSource::new();
        source.expect_name().return_const("mock".to_string());
        source
            .expect_quote()
            .with(eq("MSFT"))
            .times(1)
            .returning(|_| {
                Ok(RawQuote {
                    long_name: Some("Microsoft Corporation".to_string()),
                    forward_pe: Some(31.2),
                    ..RawQuote::default()
                })
            });

        let summary = fetcher(source).fetch("MSFT").await.unwrap();
        assert_eq!(summary.name, "Microsoft Corporation");
        assert_eq!(summary.pe_ratio, PeRatio::Value(31.2));
        assert_eq!(summary.price, 0.0);
        assert_eq!(summary.summary_text, "No summary available....");
    }

    #[tokio::test]
    async fn test_fetch_collapses_errors() {
        let mut source = MockSource::new();
        source.expect_name().return_const("mock".to_string());
        source
            .expect_quote()
            .returning(|s| Err(FetchError::UnknownTicker(s.to_string())));

        let fetcher = fetcher(source);
        assert!(fetcher.fetch("ZZZZINVALID").await.is_none());
        assert!(matches!(
            fetcher.try_fetch("ZZZZINVALID").await,
            Err(FetchError::UnknownTicker(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_failure_logged_below_warn() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(LevelRecorder(Arc::clone(&levels))),
        );

        let mut source = MockSource::new();
        source.expect_name().return_const("mock".to_string());
        source
            .expect_quote()
            .returning(|s| Err(FetchError::UnknownTicker(s.to_string())));

        assert!(fetcher(source).fetch("ZZZZINVALID").await.is_none());

        let levels = levels.lock().unwrap();
        assert!(levels.contains(&Level::DEBUG));
        assert!(levels.iter().all(|level| *level > Level::WARN), "{levels:?}");
    }

    #[tokio::test]
    async fn test_invalid_symbol_never_reaches_source() {
        let mut source = MockSource::new();
        source.expect_name().return_const("mock".to_string());
        source.expect_quote().never();

        let fetcher = fetcher(source);
        assert!(matches!(
            fetcher.try_fetch("").await,
            Err(FetchError::InvalidSymbol(_))
        ));
        assert!(fetcher.fetch("AAPL/../x").await.is_none());
    }

    #[test]
    fn test_plausible_symbols() {
        for ok in ["AAPL", "BRK.B", "RDS-A", "^GSPC", "EURUSD=X", "7203.T"] {
            assert!(is_plausible_symbol(ok), "{ok}");
        }
        for bad in ["", "AA PL", "A/B", "A?B", "TOOLONGTICKERSYMBOL"] {
            assert!(!is_plausible_symbol(bad), "{bad}");
        }
    }
}
