//! Notifier port for alert delivery.
//!
//! This module defines the trait for transmitting a formatted alert
//! message to its destination chat.

use async_trait::async_trait;
use tracing::info;

/// Trait for alert delivery implementations.
///
/// Delivery is best-effort: a single attempt whose outcome is reported
/// as a boolean. Implementations must be thread-safe (`Send + Sync`)
/// since the webhook handler runs on arbitrary runtime tasks.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Deliver one formatted message. Returns `true` on success.
    async fn deliver(&self, message: &str) -> bool;
}

/// A no-op notifier for testing or when delivery is disabled.
pub struct NullNotifier;

#[async_trait]
impl AlertNotifier for NullNotifier {
    async fn deliver(&self, _message: &str) -> bool {
        true
    }
}

/// A notifier that logs messages via tracing instead of delivering them.
///
/// Used when Telegram delivery is disabled in the configuration.
pub struct LogNotifier;

#[async_trait]
impl AlertNotifier for LogNotifier {
    async fn deliver(&self, message: &str) -> bool {
        info!(%message, "Alert (delivery disabled)");
        true
    }
}
