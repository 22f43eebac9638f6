//! Inbound and outbound adapters around the formatting core.

pub mod http;

#[cfg(feature = "telegram")]
pub mod telegram;
