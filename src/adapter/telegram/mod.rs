//! Telegram delivery and bot command handling.
//!
//! Requires the `telegram` feature to be enabled.

pub mod command;
pub mod notifier;

pub use notifier::{TelegramConfig, TelegramNotifier};
