//! Trait definitions at the seams between the core and its adapters.

pub mod notifier;

pub use notifier::{AlertNotifier, LogNotifier, NullNotifier};
