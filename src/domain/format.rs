//! Alert message formatting.
//!
//! Turns a raw webhook payload into the HTML message posted to the chat.
//! Every normalization step is fault-tolerant: unparseable timestamps or
//! prices keep their raw value, so a malformed alert still produces a
//! degraded-but-deliverable message instead of an error.

use chrono::{FixedOffset, NaiveDateTime, Utc};

use super::alert::AlertPayload;
use super::signal::SignalKind;

/// Display timezone offset (UTC+7).
const DISPLAY_OFFSET_SECS: i32 = 7 * 3600;

/// strftime pattern for normalized timestamps.
const TIME_FORMAT: &str = "%d/%m/%Y %H:%M (GMT+7)";

/// Format an alert payload into the chat message.
///
/// Total function: any payload yields a message.
#[must_use]
pub fn format_alert_message(payload: &AlertPayload) -> String {
    let kind = SignalKind::classify(payload);

    format!(
        "{emoji} <b>{signal}</b>\n\
        \n\
        📊 <b>Crypto:</b> {symbol}\n\
        ⏱️ <b>Timeframe:</b> {timeframe}\n\
        📈 <b>Indicator:</b> {indicator}\n\
        💰 <b>Price:</b> {price}\n\
        🕐 <b>Time:</b> {time}",
        emoji = kind.emoji(),
        signal = kind.display(),
        symbol = payload.symbol(),
        timeframe = timeframe_label(payload.timeframe()),
        indicator = payload.indicator(),
        price = format_price(payload.price()),
        time = format_time(payload.time()),
    )
}

/// Translate a TradingView timeframe code into its display label.
///
/// Unrecognized codes pass through unchanged.
#[must_use]
pub fn timeframe_label(code: &str) -> &str {
    match code {
        "1" => "1m",
        "5" => "5m",
        "15" => "15m",
        "30" => "30m",
        "60" | "1H" => "H1",
        "240" | "4H" => "H4",
        "D" | "1D" => "Daily",
        "W" | "1W" => "Weekly",
        "M" | "1M" => "Monthly",
        other => other,
    }
}

/// Format a raw price field for display.
///
/// Numeric values get a `$` prefix: thousands separators with 2 decimals
/// from 1000 up, 4 decimals below. Non-numeric input is kept unchanged.
#[must_use]
pub fn format_price(raw: &str) -> String {
    match raw.parse::<f64>() {
        Ok(value) if value >= 1000.0 => format!("${}", thousands(value)),
        Ok(value) => format!("${value:.4}"),
        Err(_) => raw.to_string(),
    }
}

/// Render a float with 2 decimals and comma-grouped integer digits.
fn thousands(value: f64) -> String {
    let rendered = format!("{value:.2}");
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && c.is_ascii_digit() && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{grouped}.{frac_part}")
}

/// Normalize a raw timestamp field to GMT+7 display time.
///
/// ISO-shaped input (contains `T`) is parsed as naive UTC after stripping
/// a trailing `Z`; an empty field substitutes the current time. Anything
/// else, including parse failures, is kept unchanged.
#[must_use]
pub fn format_time(raw: &str) -> String {
    let Some(display_tz) = FixedOffset::east_opt(DISPLAY_OFFSET_SECS) else {
        return raw.to_string();
    };

    if raw.is_empty() {
        return Utc::now().with_timezone(&display_tz).format(TIME_FORMAT).to_string();
    }

    if !raw.contains('T') {
        return raw.to_string();
    }

    match raw.trim_end_matches('Z').parse::<NaiveDateTime>() {
        Ok(naive_utc) => naive_utc
            .and_utc()
            .with_timezone(&display_tz)
            .format(TIME_FORMAT)
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Price formatting
    // -------------------------------------------------------------------------

    #[test]
    fn price_large_value_gets_separators_and_two_decimals() {
        assert_eq!(format_price("42150.00"), "$42,150.00");
        assert_eq!(format_price("1000"), "$1,000.00");
        assert_eq!(format_price("1234567.891"), "$1,234,567.89");
    }

    #[test]
    fn price_small_value_gets_four_decimals() {
        assert_eq!(format_price("0.5234"), "$0.5234");
        assert_eq!(format_price("999.99"), "$999.9900");
        assert_eq!(format_price("0.5"), "$0.5000");
    }

    #[test]
    fn price_non_numeric_kept_unchanged() {
        assert_eq!(format_price("abc"), "abc");
        assert_eq!(format_price("N/A"), "N/A");
        assert_eq!(format_price(""), "");
    }

    #[test]
    fn price_negative_value_uses_four_decimals() {
        assert_eq!(format_price("-12.5"), "$-12.5000");
    }

    // -------------------------------------------------------------------------
    // Timeframe translation
    // -------------------------------------------------------------------------

    #[test]
    fn timeframe_known_codes() {
        assert_eq!(timeframe_label("1"), "1m");
        assert_eq!(timeframe_label("5"), "5m");
        assert_eq!(timeframe_label("15"), "15m");
        assert_eq!(timeframe_label("30"), "30m");
        assert_eq!(timeframe_label("60"), "H1");
        assert_eq!(timeframe_label("1H"), "H1");
        assert_eq!(timeframe_label("240"), "H4");
        assert_eq!(timeframe_label("4H"), "H4");
        assert_eq!(timeframe_label("D"), "Daily");
        assert_eq!(timeframe_label("1D"), "Daily");
        assert_eq!(timeframe_label("W"), "Weekly");
        assert_eq!(timeframe_label("1W"), "Weekly");
        assert_eq!(timeframe_label("M"), "Monthly");
        assert_eq!(timeframe_label("1M"), "Monthly");
    }

    #[test]
    fn timeframe_unknown_codes_pass_through() {
        assert_eq!(timeframe_label("unknown"), "unknown");
        assert_eq!(timeframe_label("45"), "45");
        assert_eq!(timeframe_label("N/A"), "N/A");
    }

    // -------------------------------------------------------------------------
    // Timestamp normalization
    // -------------------------------------------------------------------------

    #[test]
    fn time_iso_input_converts_to_gmt7() {
        assert_eq!(
            format_time("2026-02-06T13:25:00Z"),
            "06/02/2026 20:25 (GMT+7)"
        );
    }

    #[test]
    fn time_conversion_crosses_day_boundary() {
        assert_eq!(
            format_time("2026-02-06T18:00:00Z"),
            "07/02/2026 01:00 (GMT+7)"
        );
    }

    #[test]
    fn time_without_trailing_z_still_parses() {
        assert_eq!(
            format_time("2026-02-06T13:25:00"),
            "06/02/2026 20:25 (GMT+7)"
        );
    }

    #[test]
    fn time_non_iso_kept_unchanged() {
        assert_eq!(format_time("2026-02-02 21:00"), "2026-02-02 21:00");
        assert_eq!(format_time("Test Time"), "Test Time");
    }

    #[test]
    fn time_unparseable_iso_kept_unchanged() {
        assert_eq!(format_time("TOMORROW"), "TOMORROW");
        assert_eq!(format_time("2026-13-99T99:99:99Z"), "2026-13-99T99:99:99Z");
    }

    #[test]
    fn time_empty_uses_current_time() {
        // Exact value depends on the wall clock; check shape only.
        let now = format_time("");
        assert!(now.ends_with("(GMT+7)"), "got {now}");
        assert_eq!(now.len(), "06/02/2026 20:25 (GMT+7)".len());
    }

    // -------------------------------------------------------------------------
    // Full message assembly
    // -------------------------------------------------------------------------

    fn sample_payload() -> AlertPayload {
        serde_json::from_str(
            r#"{
                "symbol": "BTCUSDT",
                "timeframe": "60",
                "indicator": "Reversal Pro 3.0",
                "signal": "BULLISH",
                "price": "42150.00",
                "time": "2026-02-06T13:25:00Z"
            }"#,
        )
        .expect("valid payload json")
    }

    #[test]
    fn message_contains_all_normalized_fields() {
        let message = format_alert_message(&sample_payload());

        assert!(message.contains("🟢"));
        assert!(message.contains("<b>BULLISH</b>"));
        assert!(message.contains("BTCUSDT"));
        assert!(message.contains("H1"));
        assert!(message.contains("Reversal Pro 3.0"));
        assert!(message.contains("$42,150.00"));
        assert!(message.contains("06/02/2026 20:25 (GMT+7)"));
    }

    #[test]
    fn message_has_no_surrounding_whitespace() {
        let message = format_alert_message(&sample_payload());
        assert_eq!(message, message.trim());
    }

    #[test]
    fn message_for_empty_payload_uses_fallbacks() {
        let payload: AlertPayload = serde_json::from_str("{}").unwrap();
        let message = format_alert_message(&payload);

        assert!(message.contains("🔄"));
        assert!(message.contains("<b>REVERSAL</b>"));
        assert!(message.contains("<b>Crypto:</b> N/A"));
        assert!(message.contains("<b>Price:</b> N/A"));
    }

    #[test]
    fn formatting_is_deterministic_for_fixed_time() {
        let payload = sample_payload();
        assert_eq!(format_alert_message(&payload), format_alert_message(&payload));
    }
}
