//! Telegram bot command handling.
//!
//! The relay answers three fixed commands with static text. Messages from
//! chats other than the configured one are ignored.

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, warn};

use super::notifier::TelegramConfig;

/// Supported bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCommand {
    Start,
    Help,
    Status,
}

/// Parse error for bot command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a chat message into a bot command.
///
/// Handles the `@bot_name` suffix Telegram appends in group chats.
pub fn parse_command(text: &str) -> Result<RelayCommand, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(RelayCommand::Start),
        "/help" => Ok(RelayCommand::Help),
        "/status" => Ok(RelayCommand::Status),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Static response for a parsed command.
#[must_use]
pub const fn command_response(command: RelayCommand) -> &'static str {
    match command {
        RelayCommand::Start => {
            "👋 TradingView Alert Relay\n\n\
            This bot forwards TradingView webhook alerts to this chat.\n\
            Point your alert webhook at POST /webhook and signals will \
            appear here.\n\n\
            Send /help for the available commands."
        }
        RelayCommand::Help => command_help(),
        RelayCommand::Status => {
            "📡 Status\n\n\
            ✅ Relay online and forwarding alerts."
        }
    }
}

/// Help text returned by `/help` and appended to invalid-command replies.
#[must_use]
pub const fn command_help() -> &'static str {
    "📋 Commands\n\n\
    /start - 👋 What this bot does\n\
    /help - 📋 Show all commands\n\
    /status - 📡 Relay status"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "What this bot does"),
        ("help", "Show all commands"),
        ("status", "Relay status"),
    ]
}

/// Process a message and return a response if it's an authorized command.
///
/// Returns `None` for messages from unauthorized chats and for plain text
/// that is not a command. Unknown commands get an error reply with help.
pub fn command_response_for_message(
    text: &str,
    incoming_chat: ChatId,
    allowed_chat: ChatId,
) -> Option<String> {
    if !is_authorized_chat(incoming_chat, allowed_chat) {
        return None;
    }

    match parse_command(text) {
        Ok(command) => Some(command_response(command).to_string()),
        Err(CommandParseError::NotACommand) => None,
        Err(err) => Some(format!("Invalid command: {err}\n\n{}", command_help())),
    }
}

/// Check if a chat is authorized to send commands.
fn is_authorized_chat(incoming_chat: ChatId, allowed_chat: ChatId) -> bool {
    if incoming_chat == allowed_chat {
        return true;
    }

    warn!(
        chat_id = incoming_chat.0,
        "Ignoring Telegram message from unauthorized chat"
    );
    false
}

/// Background worker that answers inbound bot commands.
pub async fn run_command_listener(config: TelegramConfig) {
    let bot = Bot::new(&config.bot_token);
    let allowed_chat = ChatId(config.chat_id);

    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!(chat_id = config.chat_id, "Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| async move {
        let Some(text) = msg.text() else {
            return respond(());
        };

        if let Some(response) = command_response_for_message(text, msg.chat.id, allowed_chat) {
            if let Err(e) = bot.send_message(msg.chat.id, response).await {
                error!(error = %e, "Failed to send Telegram command response");
            }
        }

        respond(())
    })
    .await;
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
