//! Completion provider interface and the Groq-backed implementation.

mod error;
mod extract;
mod groq;
mod model;
mod prompt;

pub use {
    error::{Error, Result},
    extract::{FALLBACK_DUMP_MAX_CHARS, extract_or_dump, extract_reply_text},
    groq::GroqProvider,
    model::ChatMessage,
    prompt::{SYSTEM_PROMPT, build_messages},
};

/// Seam between the reply pipeline and the upstream completion endpoint.
///
/// The Discord dispatcher only sees this trait; tests substitute a recording
/// implementation.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Issue one completion request and return the reply text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
