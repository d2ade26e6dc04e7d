//! End-to-end duel flow against stubbed market data and a scripted model

use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;
use stockclash_duel::{
    AIError, Duel, DuelError, Narrator, ProviderFactory, TaleOfTheTape, WINNER_LINE,
};
use stockclash_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason, TokenUsage,
};
use stockclash_market::{
    FetchError, MarketDataFetcher, MarketDataSource, PeRatio, RawQuote, StockSummary,
};

mock! {
    Source {}

    #[async_trait]
    impl MarketDataSource for Source {
        async fn quote(&self, symbol: &str) -> stockclash_market::Result<RawQuote>;
        fn name(&self) -> &str;
    }
}

mock! {
    Factory {}

    impl ProviderFactory for Factory {
        fn connect(&self, credential: &str) -> stockclash_llm::Result<Arc<dyn LLMProvider>>;
    }
}

/// Model stub that always answers with the same text
struct ScriptedModel {
    reply: Result<String, String>,
}

#[async_trait]
impl LLMProvider for ScriptedModel {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> stockclash_llm::Result<CompletionResponse> {
        assert!(request.messages[0].content.contains(WINNER_LINE));
        match &self.reply {
            Ok(text) => Ok(CompletionResponse {
                message: Message::assistant(text.clone()),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            }),
            Err(message) => Err(LLMError::RequestFailed(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

const VERDICT: &str = "- **Valuation:** Apple Inc. trades at 28.4x forward earnings versus 31.2x for Microsoft.\n\
- **Growth:** Microsoft is growing revenue faster.\n\n\
Winner for Long-Term Hold: Microsoft Corporation. Faster growth justifies the premium.";

fn quote_for(symbol: &str) -> stockclash_market::Result<RawQuote> {
    match symbol {
        "AAPL" => Ok(RawQuote {
            long_name: Some("Apple Inc.".to_string()),
            current_price: Some(189.5),
            forward_pe: Some(28.4),
            market_cap: Some(2_950_000_000_000.0),
            revenue_growth: Some(0.061),
            fifty_two_week_high: Some(199.62),
            long_business_summary: Some("x".repeat(800)),
        }),
        "MSFT" => Ok(RawQuote {
            long_name: Some("Microsoft Corporation".to_string()),
            current_price: Some(415.1),
            forward_pe: Some(31.2),
            market_cap: Some(3_080_000_000_000.0),
            revenue_growth: Some(0.152),
            fifty_two_week_high: Some(430.82),
            long_business_summary: None,
        }),
        other => Err(FetchError::UnknownTicker(other.to_string())),
    }
}

fn market() -> MarketDataFetcher {
    let mut source = MockSource::new();
    source.expect_name().return_const("stub".to_string());
    source.expect_quote().returning(quote_for);
    MarketDataFetcher::new(Arc::new(source), 500)
}

fn duel_with(factory: MockFactory) -> Duel {
    let narrator = Narrator::new(Arc::new(factory), "gemini-2.5-flash").unwrap();
    Duel::new(market(), narrator)
}

fn scripted_factory(reply: Result<&'static str, &'static str>) -> MockFactory {
    let mut factory = MockFactory::new();
    factory
        .expect_connect()
        .withf(|credential| credential == "valid-key")
        .times(1)
        .returning(move |_| {
            Ok(Arc::new(ScriptedModel {
                reply: reply.map(str::to_string).map_err(str::to_string),
            }))
        });
    factory
}

/// Same order of steps as the `stockclash` binary
async fn clash(
    duel: &Duel,
    first: &str,
    second: &str,
    credential: Option<&str>,
) -> Result<(TaleOfTheTape, Result<String, DuelError>), DuelError> {
    let credential = Duel::check_credential(credential)?;
    let tape = duel.tale_of_the_tape(first, second).await?;
    let verdict = duel.verdict(&tape, credential).await;
    Ok((tape, verdict))
}

fn assert_fully_populated(summary: &StockSummary) {
    assert!(!summary.name.is_empty());
    assert!(summary.price >= 0.0);
    assert!(summary.market_cap >= 0.0);
    assert!(summary.fifty_two_week_high >= 0.0);
    assert!(summary.summary_text.ends_with("..."));
}

#[tokio::test]
async fn aapl_vs_msft_produces_two_summaries_and_a_verdict() {
    let duel = duel_with(scripted_factory(Ok(VERDICT)));

    let (tape, verdict) = clash(&duel, "AAPL", "MSFT", Some(" valid-key "))
        .await
        .unwrap();

    assert_fully_populated(&tape.first);
    assert_fully_populated(&tape.second);
    assert_eq!(tape.first.symbol, "AAPL");
    assert_eq!(tape.first.name, "Apple Inc.");
    assert_eq!(tape.first.summary_text.chars().count(), 503);
    assert_eq!(tape.second.pe_ratio, PeRatio::Value(31.2));
    assert_eq!(tape.second.summary_text, "No summary available....");

    let verdict = verdict.unwrap();
    assert_eq!(verdict, VERDICT);
    let (_, winner) = verdict.split_once(WINNER_LINE).unwrap();
    assert!(!winner.trim().is_empty());
}

#[tokio::test]
async fn unknown_ticker_stops_before_the_narrator() {
    let mut factory = MockFactory::new();
    factory.expect_connect().never();
    let duel = duel_with(factory);

    let err = clash(&duel, "ZZZZINVALID", "MSFT", Some("valid-key"))
        .await
        .unwrap_err();

    assert!(matches!(err, DuelError::FetchFailed));
    assert_eq!(err.to_string(), "Could not fetch data. Check ticker symbols.");
}

#[tokio::test]
async fn missing_credential_stops_before_any_fetch() {
    let mut source = MockSource::new();
    source.expect_name().return_const("stub".to_string());
    source.expect_quote().never();
    let mut factory = MockFactory::new();
    factory.expect_connect().never();

    let narrator = Narrator::new(Arc::new(factory), "gemini-2.5-flash").unwrap();
    let duel = Duel::new(MarketDataFetcher::new(Arc::new(source), 500), narrator);

    for credential in [None, Some(""), Some("   ")] {
        let err = clash(&duel, "AAPL", "MSFT", credential).await.unwrap_err();
        assert!(matches!(err, DuelError::MissingCredential));
        assert_eq!(err.to_string(), "Please enter your Gemini API Key!");
    }
}

#[tokio::test]
async fn ai_failure_keeps_the_tape() {
    let duel = duel_with(scripted_factory(Err("503 model overloaded")));

    let (tape, verdict) = clash(&duel, "AAPL", "MSFT", Some("valid-key"))
        .await
        .unwrap();

    assert_eq!(tape.second.name, "Microsoft Corporation");
    let err = verdict.unwrap_err();
    assert!(matches!(
        err,
        DuelError::Ai(AIError::Provider(LLMError::RequestFailed(_)))
    ));
    assert_eq!(
        err.to_string(),
        "AI Error: API request failed: 503 model overloaded"
    );
}

#[tokio::test]
async fn shown_prompt_matches_the_fetched_tape() {
    let duel = duel_with(MockFactory::new());

    let tape = duel.tale_of_the_tape("AAPL", "MSFT").await.unwrap();
    let prompt = duel.narrator().prompt(&tape.first, &tape.second).unwrap();

    assert!(prompt.contains("Company A: Apple Inc."));
    assert!(prompt.contains("Company B: Microsoft Corporation\n- P/E Ratio: 31.2"));
    assert_eq!(duel.narrator().model(), "gemini-2.5-flash");
}
