use crate::model::ChatMessage;

/// Fixed personality instruction sent as the leading system message.
pub const SYSTEM_PROMPT: &str = "You are Manzar — a witty, slightly savage Discord poet inspired by Jaun Elia.\n\
Style: mix Hindi/Urdu casually with English, short shayari lines, playful roasts. \
Be creative and never produce hateful or illegal content. Keep replies short (1–6 sentences) unless user asks for more.\n";

/// Build the message list for one completion request: the personality system
/// entry, an optional `MODE_HINT:` system entry, then the user text.
#[must_use]
pub fn build_messages(user_text: &str, mode_hint: Option<&str>) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
    if let Some(hint) = mode_hint {
        messages.push(ChatMessage::system(format!("MODE_HINT: {hint}")));
    }
    messages.push(ChatMessage::user(user_text));
    messages
}
