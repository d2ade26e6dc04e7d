//! Shared utilities for stockclash
//!
//! This crate provides common functionality used across the stockclash workspace:
//! tracing setup and the application configuration loaded from the environment.

pub mod config;
pub mod logging;

pub use config::{AppConfig, ConfigError};
pub use logging::{DEFAULT_FILTER, init_tracing};
