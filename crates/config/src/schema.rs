use {
    secrecy::Secret,
    thiserror::Error,
};

pub const DEFAULT_MODEL: &str = "gemma2-3b";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 180;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing mandatory environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Settings for the upstream completion endpoint.
#[derive(Clone)]
pub struct CompletionConfig {
    pub api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// Top-level bot configuration, sourced from the environment.
#[derive(Clone)]
pub struct BotConfig {
    pub discord_token: Secret<String>,
    pub completion: CompletionConfig,
    /// Optional owner identity for owner-only commands.
    pub owner_id: Option<String>,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("discord_token", &"[REDACTED]")
            .field("completion", &self.completion)
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

impl BotConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let discord_token = get("DISCORD_TOKEN")
            .map(Secret::new)
            .ok_or(Error::MissingVar("DISCORD_TOKEN"))?;
        let api_key = get("GROQ_API_KEY")
            .map(Secret::new)
            .ok_or(Error::MissingVar("GROQ_API_KEY"))?;

        let model = get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = get("GROQ_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let max_output_tokens =
            parse_or_default(get("MAX_OUTPUT_TOKENS"), "MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS)?;
        let temperature = parse_or_default(get("TEMPERATURE"), "TEMPERATURE", DEFAULT_TEMPERATURE)?;

        Ok(Self {
            discord_token,
            completion: CompletionConfig {
                api_key,
                model,
                base_url,
                max_output_tokens,
                temperature,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            owner_id: get("OWNER_ID"),
        })
    }
}

fn parse_or_default<T: std::str::FromStr>(
    raw: Option<String>,
    var: &'static str,
    default: T,
) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidVar { var, value }),
    }
}
