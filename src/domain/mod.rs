//! Pure alert processing: payload model, signal classification, and
//! message formatting. No I/O and no shared state; everything in this
//! module is a total function over arbitrary payloads.

pub mod alert;
pub mod format;
pub mod signal;

pub use alert::AlertPayload;
pub use format::format_alert_message;
pub use signal::SignalKind;
