//! Alert payload model.
//!
//! TradingView webhook bodies are loosely structured: every field is
//! optional and values arrive as strings or numbers depending on how the
//! alert template was written. The payload is therefore deserialized
//! leniently and exposed through accessors that apply the documented
//! fallbacks.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Placeholder shown for absent display fields.
pub const MISSING_FIELD: &str = "N/A";

/// One alert event as posted by the charting platform.
///
/// Unknown keys are ignored; recognized keys are all optional. Numeric
/// JSON values (a `{{close}}` substitution often produces a bare number)
/// are stringified during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    secret: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    timeframe: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    indicator: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    signal: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    time: Option<String>,
}

impl AlertPayload {
    /// Shared secret carried in the payload, empty when absent.
    #[must_use]
    pub fn secret(&self) -> &str {
        self.secret.as_deref().unwrap_or("")
    }

    /// Ticker symbol, `"N/A"` when absent.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(MISSING_FIELD)
    }

    /// Raw timeframe code, `"N/A"` when absent.
    #[must_use]
    pub fn timeframe(&self) -> &str {
        self.timeframe.as_deref().unwrap_or(MISSING_FIELD)
    }

    /// Indicator name, `"N/A"` when absent.
    #[must_use]
    pub fn indicator(&self) -> &str {
        self.indicator.as_deref().unwrap_or(MISSING_FIELD)
    }

    /// Raw signal field, empty when absent.
    #[must_use]
    pub fn signal(&self) -> &str {
        self.signal.as_deref().unwrap_or("")
    }

    /// Raw price field, `"N/A"` when absent.
    #[must_use]
    pub fn price(&self) -> &str {
        self.price.as_deref().unwrap_or(MISSING_FIELD)
    }

    /// Raw timestamp field, empty when absent.
    #[must_use]
    pub fn time(&self) -> &str {
        self.time.as_deref().unwrap_or("")
    }
}

/// Accept strings, numbers, and booleans; treat null and structured
/// values as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
