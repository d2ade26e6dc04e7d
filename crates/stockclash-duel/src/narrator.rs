//! Comparison narrator
//!
//! The narrator never keeps a client around: every call to
//! [`Narrator::compare`] asks its [`ProviderFactory`] for a provider bound to
//! the credential of that call.

use crate::AIError;
use crate::prompt::RivalryPrompt;
use std::sync::Arc;
use std::time::Duration;
use stockclash_llm::providers::{GeminiConfig, GeminiProvider};
use stockclash_llm::{CompletionRequest, LLMProvider, Message};
use stockclash_market::StockSummary;
use stockclash_utils::AppConfig;
use tracing::{debug, info, instrument};

/// Room for the model's reasoning plus a bullet-point answer
const DEFAULT_MAX_TOKENS: usize = 8192;

/// Builds an LLM provider for one credential
pub trait ProviderFactory: Send + Sync {
    /// Create a provider that authenticates with `credential`
    fn connect(&self, credential: &str) -> stockclash_llm::Result<Arc<dyn LLMProvider>>;
}

/// Factory for [`GeminiProvider`]s sharing one endpoint and timeout
#[derive(Debug, Clone)]
pub struct GeminiFactory {
    api_base: String,
    timeout: Duration,
}

impl GeminiFactory {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into(),
            timeout,
        }
    }
}

impl From<&AppConfig> for GeminiFactory {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.gemini_api_base.clone(), config.llm_timeout)
    }
}

impl ProviderFactory for GeminiFactory {
    fn connect(&self, credential: &str) -> stockclash_llm::Result<Arc<dyn LLMProvider>> {
        let config = GeminiConfig::new(credential)
            .with_api_base(self.api_base.clone())
            .with_timeout(self.timeout);
        Ok(Arc::new(GeminiProvider::with_config(config)?))
    }
}

/// Turns two summaries into the model's written comparison
pub struct Narrator {
    factory: Arc<dyn ProviderFactory>,
    prompt: RivalryPrompt,
    model: String,
    max_tokens: usize,
}

impl Narrator {
    /// Create a narrator for `model`
    pub fn new(
        factory: Arc<dyn ProviderFactory>,
        model: impl Into<String>,
    ) -> Result<Self, AIError> {
        Ok(Self {
            factory,
            prompt: RivalryPrompt::new()?,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Model used for completions
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Render the prompt that [`compare`](Self::compare) would send
    pub fn prompt(&self, a: &StockSummary, b: &StockSummary) -> Result<String, AIError> {
        self.prompt.render(a, b)
    }

    /// Ask the model to compare `a` and `b`.
    ///
    /// An empty credential fails before any provider is built. The model's
    /// text is returned unmodified.
    #[instrument(skip(self, a, b, credential), fields(a = %a.symbol, b = %b.symbol, model = %self.model))]
    pub async fn compare(
        &self,
        a: &StockSummary,
        b: &StockSummary,
        credential: &str,
    ) -> Result<String, AIError> {
        if credential.trim().is_empty() {
            return Err(AIError::MissingCredential);
        }

        let prompt = self.prompt(a, b)?;
        let provider = self.factory.connect(credential)?;
        debug!(provider = provider.name(), "Requesting verdict");

        let request = CompletionRequest::builder(self.model.clone())
            .add_message(Message::user(prompt))
            .max_tokens(self.max_tokens)
            .build();

        let response = provider.complete(request).await?;
        info!(
            tokens = response.usage.total(),
            stop_reason = ?response.stop_reason,
            "Verdict received"
        );
        Ok(response.message.content)
    }
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}
