use std::sync::Arc;

use {
    clap::Parser,
    secrecy::ExposeSecret,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    manzar_auto_reply::{Responder, ResponderConfig, TriggerConfig, UserRateLimit},
    manzar_config::BotConfig,
    manzar_providers::GroqProvider,
};

#[derive(Parser)]
#[command(name = "manzar", about = "Manzar — savage shayari bot for Discord")]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    // Load .env before reading mandatory variables; missing credentials
    // abort startup here.
    dotenvy::dotenv().ok();
    let config = BotConfig::from_env()?;

    let provider = Arc::new(GroqProvider::new(&config.completion)?);
    let responder = Arc::new(Responder::new(
        ResponderConfig {
            trigger: TriggerConfig {
                owner_id: config.owner_id.clone(),
                ..TriggerConfig::default()
            },
            limit: UserRateLimit::default(),
        },
        provider,
    ));

    info!(model = %config.completion.model, "starting manzar");
    manzar_discord::run(config.discord_token.expose_secret(), responder).await?;
    Ok(())
}
