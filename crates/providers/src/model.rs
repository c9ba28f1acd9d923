/// Typed chat message for the completion provider interface.
///
/// Only LLM-relevant fields exist here, so channel metadata can never leak
/// into provider API requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    System { content: String },
    User { content: String },
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Convert to OpenAI-compatible JSON format.
    #[must_use]
    pub fn to_openai_value(&self) -> serde_json::Value {
        match self {
            ChatMessage::System { content } => {
                serde_json::json!({ "role": "system", "content": content })
            },
            ChatMessage::User { content } => {
                serde_json::json!({ "role": "user", "content": content })
            },
        }
    }
}
