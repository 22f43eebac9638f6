//! Chartalert - TradingView alert relay for Telegram.
//!
//! This crate receives alert webhooks from TradingView, normalizes the
//! heterogeneous alert fields into a readable HTML message, and forwards
//! the message to a Telegram chat.
//!
//! # Architecture
//!
//! The crate separates the pure formatting core from its I/O adapters:
//!
//! - **`domain`** - Pure alert processing: payload model, signal
//!   classification, and message formatting. Total functions, no I/O.
//! - **`port`** - The [`port::notifier::AlertNotifier`] delivery seam.
//! - **`adapter::http`** - The warp webhook server.
//! - **`adapter::telegram`** - Telegram delivery and bot commands
//!   (requires the `telegram` feature).
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and environment
//! - [`domain`] - Payload model, signal classifier, message formatter
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for delivery implementations
//! - [`adapter`] - HTTP inbound and Telegram outbound adapters
//!
//! # Features
//!
//! - `telegram` - Enable Telegram delivery and the bot command listener
//!
//! # Example
//!
//! ```
//! use chartalert::domain::{format_alert_message, AlertPayload};
//!
//! let payload: AlertPayload = serde_json::from_str(
//!     r#"{"symbol": "BTCUSDT", "signal": "BULLISH", "price": "42150.00"}"#,
//! ).unwrap();
//!
//! let message = format_alert_message(&payload);
//! assert!(message.contains("BTCUSDT"));
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
