//! StockClash command-line interface
//!
//! Fetches two tickers, prints their key metrics side by side and asks Gemini
//! which one to hold for the long term.
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//! cargo run --bin stockclash -- --first NVDA --second AMD --details
//! ```

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use stockclash_duel::{Duel, DuelError, GeminiFactory, Narrator, report};
use stockclash_market::{MarketConfig, MarketDataFetcher, YahooFinanceClient};
use stockclash_utils::{AppConfig, DEFAULT_FILTER};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stockclash")]
#[command(about = "Compare two stocks and let Gemini AI declare the winner", long_about = None)]
struct Args {
    /// First ticker symbol
    #[arg(short = 'a', long, default_value = "AAPL", value_parser = parse_ticker)]
    first: String,

    /// Second ticker symbol
    #[arg(short = 'b', long, default_value = "MSFT", value_parser = parse_ticker)]
    second: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model to use instead of the configured one
    #[arg(short, long)]
    model: Option<String>,

    /// Also show market cap, revenue growth, 52-week high and business summary
    #[arg(short, long)]
    details: bool,

    /// Print the prompt sent to the model
    #[arg(long)]
    show_prompt: bool,
}

/// Tickers are looked up in upper case
fn parse_ticker(value: &str) -> Result<String, String> {
    let ticker = value.trim().to_uppercase();
    if ticker.is_empty() {
        return Err("ticker symbol must not be empty".to_string());
    }
    Ok(ticker)
}

fn fail(error: &DuelError) -> ExitCode {
    eprintln!("{error}");
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    stockclash_utils::init_tracing(DEFAULT_FILTER);

    // Loads .env first so clap can see GEMINI_API_KEY from it.
    let config = AppConfig::from_env()?;
    let args = Args::parse();

    let config = match args.model {
        Some(model) => config.with_model(model),
        None => config,
    };
    config.validate()?;

    println!("{}", report::header());

    let credential = match Duel::check_credential(args.api_key.as_deref()) {
        Ok(key) => key,
        Err(e) => return Ok(fail(&e)),
    };

    let market = MarketConfig::from(&config);
    let fetcher = MarketDataFetcher::new(
        Arc::new(YahooFinanceClient::new(&market)?),
        market.summary_limit,
    );
    let narrator = Narrator::new(Arc::new(GeminiFactory::from(&config)), config.model.clone())?;
    let duel = Duel::new(fetcher, narrator);
    info!(model = duel.narrator().model(), "Starting stockclash");

    eprintln!("Fetching Market Data...");
    let tape = match duel.tale_of_the_tape(&args.first, &args.second).await {
        Ok(tape) => tape,
        Err(e) => return Ok(fail(&e)),
    };

    println!("{}", report::tale_of_the_tape(&tape, args.details));

    if args.show_prompt {
        println!("{}\n", duel.narrator().prompt(&tape.first, &tape.second)?);
    }

    eprintln!("Gemini is analyzing the balance sheets...");
    match duel.verdict(&tape, credential).await {
        Ok(text) => {
            println!("{}", report::verdict(&text));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(fail(&e)),
    }
}
