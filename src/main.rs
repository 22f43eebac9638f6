use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use chartalert::adapter::http::WebhookServer;
use chartalert::config::Config;
use chartalert::error::Result;
use chartalert::port::AlertNotifier;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::load("config.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("chartalert starting");

    tokio::select! {
        result = run(config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("chartalert stopped");
}

async fn run(config: Config) -> Result<()> {
    let notifier = build_notifier(&config)?;
    WebhookServer::new(&config, notifier).run().await
}

#[cfg(feature = "telegram")]
fn build_notifier(config: &Config) -> Result<Arc<dyn AlertNotifier>> {
    use chartalert::adapter::telegram::{command, TelegramConfig, TelegramNotifier};
    use chartalert::error::ConfigError;
    use chartalert::port::LogNotifier;

    if !config.telegram.enabled {
        info!("Telegram delivery disabled; alerts will be logged only");
        return Ok(Arc::new(LogNotifier));
    }

    let telegram = TelegramConfig::from_env().ok_or(ConfigError::MissingField {
        field: "TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID environment variables",
    })?;

    tokio::spawn(command::run_command_listener(telegram.clone()));

    Ok(Arc::new(TelegramNotifier::new(&telegram)))
}

#[cfg(not(feature = "telegram"))]
fn build_notifier(_config: &Config) -> Result<Arc<dyn AlertNotifier>> {
    use chartalert::port::LogNotifier;

    info!("Built without Telegram support; alerts will be logged only");
    Ok(Arc::new(LogNotifier))
}
