//! The duel: credential check, two fetches, one verdict

use crate::error::DuelError;
use crate::narrator::Narrator;
use stockclash_market::{MarketDataFetcher, StockSummary};
use tracing::{debug, info, instrument};

/// Both companies' summaries, in the order the user gave them
#[derive(Debug, Clone, PartialEq)]
pub struct TaleOfTheTape {
    pub first: StockSummary,
    pub second: StockSummary,
}

/// Runs the fetch-then-compare flow.
///
/// Callers drive the steps in order: [`check_credential`](Self::check_credential),
/// [`tale_of_the_tape`](Self::tale_of_the_tape), then [`verdict`](Self::verdict),
/// so the metrics can be shown before the model answers.
#[derive(Debug)]
pub struct Duel {
    fetcher: MarketDataFetcher,
    narrator: Narrator,
}

impl Duel {
    pub fn new(fetcher: MarketDataFetcher, narrator: Narrator) -> Self {
        Self { fetcher, narrator }
    }

    /// Narrator used for verdicts
    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    /// Reject a missing credential before anything touches the network
    pub fn check_credential(credential: Option<&str>) -> Result<&str, DuelError> {
        match credential.map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(DuelError::MissingCredential),
        }
    }

    /// Fetch both tickers, one after the other.
    ///
    /// Both fetches always run; if either fails the whole step fails with a
    /// single [`DuelError::FetchFailed`].
    #[instrument(skip(self))]
    pub async fn tale_of_the_tape(
        &self,
        first: &str,
        second: &str,
    ) -> Result<TaleOfTheTape, DuelError> {
        let first_summary = self.fetcher.fetch(first).await;
        let second_summary = self.fetcher.fetch(second).await;

        match (first_summary, second_summary) {
            (Some(first), Some(second)) => Ok(TaleOfTheTape { first, second }),
            (first_summary, second_summary) => {
                debug!(
                    first_ok = first_summary.is_some(),
                    second_ok = second_summary.is_some(),
                    "Market data incomplete"
                );
                Err(DuelError::FetchFailed)
            }
        }
    }

    /// Ask the narrator for the verdict on an already fetched tape
    pub async fn verdict(
        &self,
        tape: &TaleOfTheTape,
        credential: &str,
    ) -> Result<String, DuelError> {
        info!(first = %tape.first.name, second = %tape.second.name, "Comparing");
        self.narrator
            .compare(&tape.first, &tape.second, credential)
            .await
            .map_err(DuelError::from)
    }
}
