//! Signal classification.
//!
//! TradingView substitutes template variables like `{{strategy.order.action}}`
//! only for strategy alerts; indicator alerts deliver the literal placeholder
//! text instead. The classifier detects that case and degrades to a default
//! signal rather than surfacing garbage to the chat.

use super::alert::AlertPayload;

/// Substrings that identify an unresolved template variable in the
/// uppercased signal field.
const PLACEHOLDER_MARKERS: [&str; 5] = ["{{", "}}", "STRATEGY", "ORDER", "ACTION"];

/// Signal assumed when the payload carries no usable signal field.
const FALLBACK_TOKEN: &str = "REVERSAL";

/// Canonical classification of an alert's signal field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalKind {
    Bullish,
    Bearish,
    Reversal,
    Oversold,
    Overbought,
    /// Unrecognized signal token, kept verbatim (uppercased).
    Unknown(String),
}

impl SignalKind {
    /// Classify the signal field of a payload.
    ///
    /// Never fails: an empty or placeholder-shaped field classifies as
    /// [`SignalKind::Reversal`].
    #[must_use]
    pub fn classify(payload: &AlertPayload) -> Self {
        match signal_token(payload).as_str() {
            "BULLISH" | "BUY" | "LONG" | "GREEN" => Self::Bullish,
            "BEARISH" | "SELL" | "SHORT" | "RED" => Self::Bearish,
            "REVERSAL" => Self::Reversal,
            "OVERSOLD" => Self::Oversold,
            "OVERBOUGHT" => Self::Overbought,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Emoji prefix for the chat message.
    #[must_use]
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Bullish | Self::Oversold => "🟢",
            Self::Bearish | Self::Overbought => "🔴",
            Self::Reversal => "🔄",
            Self::Unknown(_) => "⚪",
        }
    }

    /// Display text for the chat message.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
            Self::Reversal => "REVERSAL",
            Self::Oversold => "RSI OVERSOLD (possible upward reversal)",
            Self::Overbought => "RSI OVERBOUGHT (possible downward reversal)",
            Self::Unknown(raw) => raw,
        }
    }
}

/// Extract the signal token from a payload.
///
/// The field is uppercased; a non-empty value that is not an unresolved
/// placeholder is returned verbatim, anything else falls back to
/// `REVERSAL`.
#[must_use]
pub fn signal_token(payload: &AlertPayload) -> String {
    let signal = payload.signal().to_uppercase();

    if !signal.is_empty() && !is_unresolved_placeholder(&signal) {
        signal
    } else {
        FALLBACK_TOKEN.to_string()
    }
}

/// Whether an uppercased signal value looks like template text the
/// upstream platform failed to substitute.
#[must_use]
pub fn is_unresolved_placeholder(signal: &str) -> bool {
    PLACEHOLDER_MARKERS.iter().any(|m| signal.contains(m))
}
