//! Telegram alert delivery.
//!
//! Sends formatted alert messages to a single configured chat with HTML
//! rendering enabled. Delivery is a single best-effort attempt whose
//! outcome is reported as a boolean.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{error, info};

use crate::port::AlertNotifier;

/// Configuration for Telegram delivery.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for alerts.
    pub chat_id: i64,
}

impl TelegramConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`. Returns `None`
    /// if either is missing or invalid.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .ok()
            .and_then(|s| s.parse().ok())?;

        Some(Self { bot_token, chat_id })
    }
}

/// Notifier that delivers alerts to a Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Create a notifier for the configured chat.
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot: Bot::new(&config.bot_token),
            chat_id: ChatId(config.chat_id),
        }
    }
}

#[async_trait]
impl AlertNotifier for TelegramNotifier {
    async fn deliver(&self, message: &str) -> bool {
        match self
            .bot
            .send_message(self.chat_id, message)
            .parse_mode(ParseMode::Html)
            .await
        {
            Ok(_) => {
                info!(chat_id = self.chat_id.0, "Telegram message sent");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to send Telegram message");
                false
            }
        }
    }
}
