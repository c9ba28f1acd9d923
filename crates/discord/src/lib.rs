//! Discord gateway integration: event handler and outbound shaping.

mod handler;
mod outbound;

use std::sync::Arc;

use manzar_auto_reply::Responder;

pub use {
    handler::DiscordHandler,
    outbound::{DISCORD_MAX_MESSAGE_LEN, REPLY_BODY_MAX_CHARS, TRUNCATION_MARKER, truncate_reply},
};

/// Connect to the gateway and run until the connection is closed.
pub async fn run(token: &str, responder: Arc<Responder>) -> serenity::Result<()> {
    let handler = DiscordHandler::new(responder);
    let mut client = serenity::Client::builder(token, DiscordHandler::intents())
        .event_handler(handler)
        .await?;
    client.start().await
}
