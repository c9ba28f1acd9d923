//! Discord event handler for serenity.
//!
//! Maps gateway events into channel-agnostic [`MsgContext`] values, runs the
//! reply pipeline, and sends the result back as a threaded reply.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use {
    serenity::{
        all::{ActivityData, Context, EventHandler, GatewayIntents, Message, Ready},
        async_trait,
    },
    tracing::{debug, info, warn},
};

use {
    manzar_auto_reply::{BotIdentity, Responder},
    manzar_common::MsgContext,
};

use crate::outbound::truncate_reply;

const PRESENCE_TEXT: &str = "Manzar is alive 😎🔥";

/// Handler for Discord gateway events.
pub struct DiscordHandler {
    responder: Arc<Responder>,
    // 0 until the ready event delivers our user id.
    bot_user_id: AtomicU64,
}

impl DiscordHandler {
    #[must_use]
    pub fn new(responder: Arc<Responder>) -> Self {
        Self {
            responder,
            bot_user_id: AtomicU64::new(0),
        }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    fn identity(&self) -> BotIdentity {
        BotIdentity::new(self.bot_user_id.load(Ordering::SeqCst).to_string())
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "discord bot ready"
        );
        self.bot_user_id.store(ready.user.id.get(), Ordering::SeqCst);
        ctx.set_activity(Some(ActivityData::playing(PRESENCE_TEXT)));
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Skip bot messages to prevent loops.
        if msg.author.bot {
            return;
        }

        let bot = self.identity();
        let bot_id = self.bot_user_id.load(Ordering::SeqCst);
        let inbound = MsgContext {
            author_id: msg.author.id.to_string(),
            author_is_bot: msg.author.bot,
            body: msg.content.clone(),
            chat_id: msg.channel_id.to_string(),
            mentions_bot: msg.mentions.iter().any(|u| u.id.get() == bot_id),
        };

        // Show typing while the completion call is in flight.
        if self.responder.wants_completion(&inbound, &bot)
            && let Err(e) = msg.channel_id.broadcast_typing(&ctx.http).await
        {
            debug!(error = %e, "failed to send typing indicator");
        }

        let Some(reply) = self.responder.get_reply(&inbound, &bot).await else {
            return;
        };

        if let Err(e) = msg.reply(&ctx.http, truncate_reply(&reply.text)).await {
            warn!(error = %e, channel_id = %msg.channel_id, "failed to send reply");
        }
    }
}
