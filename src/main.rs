use std::path::Path;
use std::sync::Arc;

use futures::StreamExt;

use fit_assist::channels::{Channel, CliChannel, OutgoingResponse, TelegramChannel};
use fit_assist::config::AppConfig;
use fit_assist::engine::Engine;
use fit_assist::gateway::{FoodGateway, OpenFoodFactsGateway, OpenWeatherGateway, WeatherGateway};
use fit_assist::store::UserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let AppConfig {
        weather_api_key,
        telegram,
        gateway_timeout,
        log_dir,
    } = AppConfig::from_env()?;
    let _log_guard = init_tracing(log_dir.as_deref());

    eprintln!("🏃 fit-assist v{}", env!("CARGO_PKG_VERSION"));

    // ── Gateways, store, engine ─────────────────────────────────────
    let weather: Arc<dyn WeatherGateway> =
        Arc::new(OpenWeatherGateway::new(weather_api_key, gateway_timeout));
    let food: Arc<dyn FoodGateway> = Arc::new(OpenFoodFactsGateway::new(gateway_timeout));
    let store = Arc::new(UserStore::new(Arc::clone(&weather)));
    let engine = Arc::new(Engine::new(store, weather, food));

    // ── Channel ─────────────────────────────────────────────────────
    let channel: Arc<dyn Channel> = match telegram {
        Some(telegram) => {
            eprintln!(
                "   Telegram: enabled (allowed: {})",
                if telegram.allowed_users.iter().any(|u| u == "*") {
                    "everyone".to_string()
                } else {
                    telegram.allowed_users.join(", ")
                }
            );
            Arc::new(TelegramChannel::new(
                telegram.bot_token,
                telegram.allowed_users,
            ))
        }
        None => {
            eprintln!("   Telegram: disabled (no TELEGRAM_BOT_TOKEN), using CLI");
            eprintln!("   Type a command and press Enter, e.g. /start\n");
            Arc::new(CliChannel::new())
        }
    };

    channel.health_check().await?;
    let mut stream = channel.start().await?;
    tracing::info!(channel = channel.name(), "fit-assist started");

    // One task per inbound message; same-user ordering is enforced by
    // the store's per-user lock, not by the dispatch loop.
    while let Some(msg) = stream.next().await {
        let engine = Arc::clone(&engine);
        let channel = Arc::clone(&channel);
        tokio::spawn(async move {
            tracing::info!(user = %msg.user_id, text = %msg.text, "message received");
            for reply in engine.handle_message(&msg.user_id, &msg.text).await {
                if let Err(err) = channel.respond(&msg, OutgoingResponse::new(reply)).await {
                    tracing::error!(%err, user = %msg.user_id, "failed to send reply");
                }
            }
        });
    }

    tracing::info!("message stream ended, shutting down");
    Ok(())
}

/// Install the tracing subscriber: console output always, plus a
/// daily-rotated file when a log directory is configured. The returned
/// guard must stay alive for the file writer to flush.
fn init_tracing(log_dir: Option<&Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "fit-assist.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
            None
        }
    }
}
