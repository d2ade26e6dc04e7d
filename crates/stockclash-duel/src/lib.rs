//! Stock duel: two tickers in, one verdict out
//!
//! - [`RivalryPrompt`] renders the fixed comparison prompt
//! - [`Narrator`] sends it to an LLM built per call from the caller's key
//! - [`Duel`] runs the whole flow: credential check, two sequential fetches,
//!   then the verdict
//! - [`report`] renders the tale of the tape and the verdict for a terminal
//!
//! # Example
//!
//! ```rust,ignore
//! use stockclash_duel::{Duel, GeminiFactory, Narrator};
//!
//! let narrator = Narrator::new(Arc::new(GeminiFactory::from(&app_config)), &app_config.model)?;
//! let duel = Duel::new(fetcher, narrator);
//!
//! let tape = duel.tale_of_the_tape("AAPL", "MSFT").await?;
//! let verdict = duel.verdict(&tape, &api_key).await?;
//! println!("{verdict}");
//! ```

pub mod duel;
pub mod error;
pub mod narrator;
pub mod prompt;
pub mod report;

pub use duel::{Duel, TaleOfTheTape};
pub use error::{AIError, DuelError};
pub use narrator::{GeminiFactory, Narrator, ProviderFactory};
pub use prompt::{RivalryPrompt, WINNER_LINE};
