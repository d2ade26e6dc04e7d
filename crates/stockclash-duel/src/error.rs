//! Error types for the duel flow

use stockclash_llm::LLMError;
use thiserror::Error;

/// Failures while asking the model for a verdict
#[derive(Debug, Error)]
pub enum AIError {
    /// No credential was supplied; nothing was sent
    #[error("API key is missing")]
    MissingCredential,

    /// The prompt template could not be rendered
    #[error("Failed to render prompt: {0}")]
    Prompt(String),

    /// The provider could not be built or the request failed
    #[error(transparent)]
    Provider(#[from] LLMError),
}

/// User-facing failures of a duel, one per message the user can see
#[derive(Debug, Error)]
pub enum DuelError {
    /// Checked before any network traffic
    #[error("Please enter your Gemini API Key!")]
    MissingCredential,

    /// Either ticker could not be fetched; the message names neither
    #[error("Could not fetch data. Check ticker symbols.")]
    FetchFailed,

    /// The verdict could not be produced
    #[error("AI Error: {0}")]
    Ai(AIError),
}

impl From<AIError> for DuelError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::MissingCredential => DuelError::MissingCredential,
            other => DuelError::Ai(other),
        }
    }
}
