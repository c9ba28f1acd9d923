//! The reply pipeline: classify → throttle → complete.

use std::sync::Arc;

use tracing::{debug, info, warn};

use {
    manzar_common::{MsgContext, ReplyPayload},
    manzar_providers::{CompletionProvider, Error as ProviderError, build_messages},
};

use crate::{
    throttle::{RequestThrottle, ThrottleDecision, UserRateLimit},
    trigger::{self, BotIdentity, Trigger, TriggerConfig},
};

/// Static help text; sending it bypasses the throttle and the completion call.
pub const HELP_TEXT: &str = "Commands: `!manzar <text>` or mention me. Extras: `!shayari`, `!roast`, `!mode <default|jaunelia|friendly|roast>` (owner only).";

/// Advisory shown on throttle denial. Not an error path.
pub const RATE_LIMITED_TEXT: &str =
    "Slow down bhai — too many requests. Try again in a few seconds.";

/// Generic apology for any upstream failure (non-2xx, timeout, bad JSON).
pub const UPSTREAM_FAILURE_TEXT: &str = "Mera brain abhi busy hai — try again in a bit.";

/// Distinct notice when the endpoint answered without usable text.
pub const EMPTY_REPLY_TEXT: &str = "Kuch garbar ho gayi, try again.";

#[derive(Debug, Clone, Default)]
pub struct ResponderConfig {
    pub trigger: TriggerConfig,
    pub limit: UserRateLimit,
}

/// Processes inbound messages into replies.
///
/// Every per-message failure becomes a user-facing phrase plus a diagnostic
/// log line; `get_reply` never returns an error and never panics.
pub struct Responder {
    trigger: TriggerConfig,
    throttle: RequestThrottle,
    provider: Arc<dyn CompletionProvider>,
}

impl Responder {
    #[must_use]
    pub fn new(config: ResponderConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            trigger: config.trigger,
            throttle: RequestThrottle::with_limit(config.limit),
            provider,
        }
    }

    /// Whether this message would reach the completion endpoint. The gateway
    /// handler uses this to fire a typing indicator before the slow call.
    #[must_use]
    pub fn wants_completion(&self, msg: &MsgContext, bot: &BotIdentity) -> bool {
        matches!(
            trigger::classify(msg, bot, &self.trigger),
            Some(Trigger::Prompt { .. })
        )
    }

    /// Process one inbound message. `None` means the message warrants no
    /// reply at all.
    pub async fn get_reply(&self, msg: &MsgContext, bot: &BotIdentity) -> Option<ReplyPayload> {
        let trigger = trigger::classify(msg, bot, &self.trigger)?;

        info!(
            from = %msg.author_id,
            chat_id = %msg.chat_id,
            "incoming message triggered: {}",
            msg.body,
        );

        let reply = match trigger {
            Trigger::Help => ReplyPayload::text(HELP_TEXT),
            Trigger::ModeAck { mode } => ReplyPayload::text(format!(
                "Mode changed on-the-fly to: {mode} (applies to next messages)."
            )),
            Trigger::Prompt {
                user_text,
                mode_hint,
            } => match self.throttle.check(&msg.author_id) {
                ThrottleDecision::Denied { retry_after } => {
                    debug!(
                        from = %msg.author_id,
                        retry_after_ms = retry_after.as_millis() as u64,
                        "rate limited"
                    );
                    ReplyPayload::text(RATE_LIMITED_TEXT)
                },
                ThrottleDecision::Allowed => {
                    let messages = build_messages(&user_text, mode_hint.as_deref());
                    match self.provider.complete(&messages).await {
                        Ok(text) => ReplyPayload::text(text),
                        Err(ProviderError::EmptyReply) => {
                            warn!(provider = %self.provider.name(), "empty completion reply");
                            ReplyPayload::text(EMPTY_REPLY_TEXT)
                        },
                        Err(err) => {
                            warn!(
                                provider = %self.provider.name(),
                                error = %err,
                                "completion call failed"
                            );
                            ReplyPayload::text(UPSTREAM_FAILURE_TEXT)
                        },
                    }
                },
            },
        };

        Some(reply)
    }
}
