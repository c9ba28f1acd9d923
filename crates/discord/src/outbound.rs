/// Platform cap on a single message.
pub const DISCORD_MAX_MESSAGE_LEN: usize = 2000;

/// Characters of original reply content kept when truncating.
pub const REPLY_BODY_MAX_CHARS: usize = 1900;

/// Appended whenever a reply is cut.
pub const TRUNCATION_MARKER: &str = "\n\n...(truncated)";

/// Cap a reply to [`REPLY_BODY_MAX_CHARS`] characters of content plus the
/// truncation marker, keeping the total under the platform limit.
#[must_use]
pub fn truncate_reply(text: &str) -> String {
    if text.chars().count() <= REPLY_BODY_MAX_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(REPLY_BODY_MAX_CHARS).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}
