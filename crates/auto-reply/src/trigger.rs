//! Trigger classification: decides whether an inbound message warrants a
//! reply, and what prompt text to forward.
//!
//! The rules are an ordered cascade; the first match wins. Shortcut keywords
//! are checked before the generic mention path so `!roast ...` is never
//! treated as free text that happens to contain the word "roast".

use manzar_common::MsgContext;

/// The bot's own identity as seen on the gateway.
#[derive(Debug, Clone, Default)]
pub struct BotIdentity {
    pub user_id: String,
}

impl BotIdentity {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// Mention tokens for this identity, in both gateway spellings.
    fn mention_tokens(&self) -> [String; 2] {
        [
            format!("<@{}>", self.user_id),
            format!("<@!{}>", self.user_id),
        ]
    }
}

/// A shortcut keyword expanding to a canned instruction plus a mode hint.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub keyword: String,
    pub instruction: String,
    pub mode_hint: String,
}

/// Classifier configuration: command tokens, shortcuts, and owner identity.
#[derive(Debug, Clone)]
pub struct TriggerConfig {
    /// Command token that triggers a reply, e.g. `!manzar`.
    pub command_token: String,
    /// Help command prefix.
    pub help_token: String,
    /// Owner-only mode command prefix.
    pub mode_token: String,
    /// Shortcut keywords, checked before the generic mention path.
    pub shortcuts: Vec<Shortcut>,
    /// Owner identity; mode commands are ignored when unset.
    pub owner_id: Option<String>,
    /// Substituted when a trigger carries no remaining text.
    pub filler_prompt: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            command_token: "!manzar".into(),
            help_token: "!help".into(),
            mode_token: "!mode".into(),
            shortcuts: vec![
                Shortcut {
                    keyword: "!shayari".into(),
                    instruction:
                        "Write a short 2-line Urdu/Hindi shayari inspired by Jaun Elia but original."
                            .into(),
                    mode_hint: "jaunelia".into(),
                },
                Shortcut {
                    keyword: "!roast".into(),
                    instruction:
                        "Write a short playful roast (1-2 lines). Keep it witty, not hateful."
                            .into(),
                    mode_hint: "roast".into(),
                },
            ],
            owner_id: None,
            filler_prompt: "hello".into(),
        }
    }
}

/// Classification outcome for a message that warrants a reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Help command: static text, bypasses the throttle and completion call.
    Help,
    /// Owner acknowledged a transient mode change. The hint is not persisted
    /// and never applied to later messages; known limitation carried from the
    /// original behavior.
    ModeAck { mode: String },
    /// Forward to the completion endpoint.
    Prompt {
        user_text: String,
        mode_hint: Option<String>,
    },
}

/// Ordered cascade; deterministic and idempotent for a fixed input.
#[must_use]
pub fn classify(msg: &MsgContext, bot: &BotIdentity, config: &TriggerConfig) -> Option<Trigger> {
    // 1. Never reply to ourselves or any other bot account.
    if msg.author_is_bot || msg.author_id == bot.user_id {
        return None;
    }

    let content = msg.body.trim();
    let lower = content.to_lowercase();

    // 2. Help.
    if lower.starts_with(&config.help_token.to_lowercase()) {
        return Some(Trigger::Help);
    }

    // 3. Owner-only mode command.
    if let Some(owner) = &config.owner_id
        && msg.author_id == *owner
        && let Some(rest) = strip_token(content, &config.mode_token)
    {
        let mode = rest.trim();
        if !mode.is_empty() {
            return Some(Trigger::ModeAck {
                mode: mode.to_lowercase(),
            });
        }
    }

    // 4. Shortcut keywords.
    for shortcut in &config.shortcuts {
        if lower.starts_with(&shortcut.keyword.to_lowercase()) {
            return Some(Trigger::Prompt {
                user_text: shortcut.instruction.clone(),
                mode_hint: Some(shortcut.mode_hint.clone()),
            });
        }
    }

    // 5. Mention or command token.
    let starts_with_command = lower.starts_with(&config.command_token.to_lowercase());
    if msg.mentions_bot || starts_with_command {
        let mut text = content.to_string();
        for token in bot.mention_tokens() {
            text = text.replace(&token, "");
        }
        let text = text.trim();
        let text = strip_token(text, &config.command_token).unwrap_or(text);
        let text = text.trim();
        return Some(Trigger::Prompt {
            user_text: if text.is_empty() {
                config.filler_prompt.clone()
            } else {
                text.to_string()
            },
            mode_hint: None,
        });
    }

    // 6. Ordinary chatter.
    None
}

/// Strip a leading token (case-insensitive) followed by a word boundary.
fn strip_token<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    let (head, rest) = text.split_at_checked(token.len())?;
    if !head.eq_ignore_ascii_case(token) {
        return None;
    }
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn msg(body: &str) -> MsgContext {
        MsgContext {
            author_id: "100".into(),
            author_is_bot: false,
            body: body.into(),
            chat_id: "chan".into(),
            mentions_bot: false,
        }
    }

    fn bot() -> BotIdentity {
        BotIdentity::new("555")
    }

    fn config() -> TriggerConfig {
        TriggerConfig {
            owner_id: Some("900".into()),
            ..TriggerConfig::default()
        }
    }

    #[test]
    fn own_message_never_triggers() {
        let mut own = msg("!manzar hi");
        own.author_id = "555".into();
        assert_eq!(classify(&own, &bot(), &config()), None);
    }

    #[test]
    fn bot_authors_never_trigger() {
        let mut other_bot = msg("!manzar hi");
        other_bot.author_is_bot = true;
        assert_eq!(classify(&other_bot, &bot(), &config()), None);
    }

    #[test]
    fn help_command() {
        assert_eq!(classify(&msg("!help"), &bot(), &config()), Some(Trigger::Help));
    }

    #[test]
    fn mode_command_from_owner() {
        let mut owner_msg = msg("!mode Roast");
        owner_msg.author_id = "900".into();
        assert_eq!(
            classify(&owner_msg, &bot(), &config()),
            Some(Trigger::ModeAck {
                mode: "roast".into()
            })
        );
    }

    #[test]
    fn mode_command_from_non_owner_ignored() {
        assert_eq!(classify(&msg("!mode roast"), &bot(), &config()), None);
    }

    #[test]
    fn mode_command_without_configured_owner_ignored() {
        let mut no_owner = config();
        no_owner.owner_id = None;
        let mut owner_msg = msg("!mode roast");
        owner_msg.author_id = "900".into();
        assert_eq!(classify(&owner_msg, &bot(), &no_owner), None);
    }

    #[test]
    fn shortcut_beats_generic_path() {
        let decision = classify(&msg("!roast something"), &bot(), &config()).unwrap();
        match decision {
            Trigger::Prompt {
                user_text,
                mode_hint,
            } => {
                assert_eq!(mode_hint.as_deref(), Some("roast"));
                assert!(user_text.contains("playful roast"));
                assert!(!user_text.contains("something"));
            },
            other => panic!("expected prompt, got {other:?}"),
        }
    }

    #[test]
    fn shayari_shortcut_sets_hint() {
        let decision = classify(&msg("!shayari"), &bot(), &config()).unwrap();
        assert!(matches!(
            decision,
            Trigger::Prompt { mode_hint: Some(hint), .. } if hint == "jaunelia"
        ));
    }

    #[test]
    fn command_token_strips_and_forwards_text() {
        let decision = classify(&msg("!manzar likho ek sher"), &bot(), &config()).unwrap();
        assert_eq!(decision, Trigger::Prompt {
            user_text: "likho ek sher".into(),
            mode_hint: None,
        });
    }

    #[test]
    fn mention_with_only_whitespace_uses_filler() {
        let mut mention = msg("<@555>   ");
        mention.mentions_bot = true;
        let decision = classify(&mention, &bot(), &config()).unwrap();
        assert_eq!(decision, Trigger::Prompt {
            user_text: "hello".into(),
            mode_hint: None,
        });
    }

    #[test]
    fn nickname_mention_spelling_is_stripped() {
        let mut mention = msg("<@!555> sunao");
        mention.mentions_bot = true;
        let decision = classify(&mention, &bot(), &config()).unwrap();
        assert_eq!(decision, Trigger::Prompt {
            user_text: "sunao".into(),
            mode_hint: None,
        });
    }

    #[test]
    fn case_insensitive_command_token() {
        let decision = classify(&msg("!Manzar hi"), &bot(), &config()).unwrap();
        assert_eq!(decision, Trigger::Prompt {
            user_text: "hi".into(),
            mode_hint: None,
        });
    }

    #[test]
    fn plain_chatter_is_ignored() {
        assert_eq!(classify(&msg("roast beef recipe"), &bot(), &config()), None);
    }

    #[test]
    fn classification_is_idempotent() {
        let message = msg("!manzar kya haal hai");
        let first = classify(&message, &bot(), &config());
        let second = classify(&message, &bot(), &config());
        assert_eq!(first, second);
    }
}
