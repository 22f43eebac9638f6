//! Webhook HTTP server.

pub mod server;

pub use server::{routes, WebhookServer};
