//! LLM provider abstraction layer for stockclash
//!
//! This crate provides provider-agnostic abstractions for talking to a
//! text-completion model:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - Concrete provider implementations (behind feature flags)
//!
//! Providers own their credential. A new provider is built for every caller
//! that brings its own key, so nothing here holds process-wide state.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
