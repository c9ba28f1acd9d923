//! Environment-sourced configuration with fail-fast validation.
//!
//! Mandatory credentials are checked at startup; the process must not start
//! without them. Secrets stay wrapped in [`secrecy::Secret`] so they never
//! leak through `Debug` output or logs.

mod schema;

pub use schema::{
    BotConfig, CompletionConfig, DEFAULT_BASE_URL, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, Error, Result,
};
