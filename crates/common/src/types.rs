use serde::{Deserialize, Serialize};

/// Channel-agnostic view of one inbound chat message.
///
/// The gateway handler maps platform events into this shape so the reply
/// pipeline never touches gateway types directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgContext {
    /// Stable identity of the message author.
    pub author_id: String,
    /// Whether the platform marks the author as a bot account.
    pub author_is_bot: bool,
    /// Raw message text.
    pub body: String,
    /// Originating channel identity.
    pub chat_id: String,
    /// Whether the message mentions this bot.
    pub mentions_bot: bool,
}

/// Outbound reply produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPayload {
    pub text: String,
}

impl ReplyPayload {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
