//! Warp HTTP server exposing the webhook endpoint.
//!
//! Routes:
//! - `GET /` - health check
//! - `POST /webhook` - receive a TradingView alert and relay it
//! - `GET /help` - HTML setup guide for the TradingView side
//! - `GET /test` - send a canned alert through the live notifier

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::config::Config;
use crate::domain::{format_alert_message, AlertPayload};
use crate::error::{ConfigError, Result};
use crate::port::AlertNotifier;

/// The webhook relay server.
pub struct WebhookServer {
    addr: String,
    secret: String,
    notifier: Arc<dyn AlertNotifier>,
}

impl WebhookServer {
    /// Create a server from the application config and a delivery notifier.
    #[must_use]
    pub fn new(config: &Config, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self {
            addr: config.server_addr(),
            secret: config.webhook_secret(),
            notifier,
        }
    }

    /// Bind and serve until the task is cancelled.
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr =
            self.addr
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                    field: "server.bind_address",
                    reason: e.to_string(),
                })?;

        info!(%addr, "Webhook server listening");
        warp::serve(routes(self.secret, self.notifier)).run(addr).await;

        Ok(())
    }
}

/// Build the route tree. Exposed for request-level tests.
pub fn routes(
    secret: String,
    notifier: Arc<dyn AlertNotifier>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let home = warp::get().and(warp::path::end()).map(|| {
        warp::reply::json(&json!({
            "status": "online",
            "service": "chartalert",
            "endpoints": { "webhook": "POST /webhook" }
        }))
    });

    let webhook = warp::post()
        .and(warp::path("webhook"))
        .and(warp::path::end())
        .and(warp::body::bytes())
        .and(warp::any().map(move || secret.clone()))
        .and(with_notifier(Arc::clone(&notifier)))
        .and_then(handle_webhook);

    let help = warp::get()
        .and(warp::path("help"))
        .and(warp::path::end())
        .map(|| warp::reply::html(SETUP_GUIDE_HTML));

    let test = warp::get()
        .and(warp::path("test"))
        .and(warp::path::end())
        .and(with_notifier(notifier))
        .and_then(handle_test);

    home.or(webhook).or(help).or(test)
}

fn with_notifier(
    notifier: Arc<dyn AlertNotifier>,
) -> impl Filter<Extract = (Arc<dyn AlertNotifier>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&notifier))
}

/// Handle one incoming alert.
///
/// Replies 400 on an empty or malformed body, 401 on a secret mismatch,
/// then 200/500 depending on the delivery outcome.
async fn handle_webhook(
    body: Bytes,
    secret: String,
    notifier: Arc<dyn AlertNotifier>,
) -> std::result::Result<warp::reply::Response, Infallible> {
    if body.is_empty() {
        warn!("Received empty webhook payload");
        return Ok(error_reply(StatusCode::BAD_REQUEST, "Empty payload"));
    }

    let payload: AlertPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Received malformed webhook payload");
            return Ok(error_reply(StatusCode::BAD_REQUEST, "Invalid JSON payload"));
        }
    };

    if payload.secret() != secret {
        warn!("Invalid secret token received");
        return Ok(error_reply(StatusCode::UNAUTHORIZED, "Invalid secret"));
    }

    info!(
        symbol = payload.symbol(),
        signal = payload.signal(),
        "Received webhook alert"
    );

    let message = format_alert_message(&payload);

    if notifier.deliver(&message).await {
        info!("Alert sent successfully");
        Ok(status_reply(
            StatusCode::OK,
            json!({ "status": "success", "message": "Alert delivered" }),
        ))
    } else {
        error!("Failed to deliver alert");
        Ok(error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to deliver alert",
        ))
    }
}

/// Send a canned alert to verify the delivery path end to end.
async fn handle_test(
    notifier: Arc<dyn AlertNotifier>,
) -> std::result::Result<warp::reply::Response, Infallible> {
    let payload: AlertPayload = serde_json::from_value(json!({
        "symbol": "BTCUSDT",
        "timeframe": "H1",
        "indicator": "Test Alert",
        "signal": "BULLISH",
        "price": "42150.00",
        "time": "Test Time"
    }))
    .unwrap_or_default();

    let message = format_alert_message(&payload);

    if notifier.deliver(&message).await {
        Ok(status_reply(
            StatusCode::OK,
            json!({ "status": "success", "message": "Test alert sent" }),
        ))
    } else {
        Ok(error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send test alert",
        ))
    }
}

/// Setup guide served at `GET /help`: how to wire a TradingView alert to
/// this relay, including the alert-template JSON.
const SETUP_GUIDE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>TradingView Webhook Setup Guide</title>
    <meta charset="UTF-8">
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; background: #1a1a2e; color: #eee; }
        h1 { color: #00d4ff; }
        h2 { color: #ff6b6b; margin-top: 30px; }
        code { background: #16213e; padding: 2px 8px; border-radius: 4px; color: #00ff88; }
        pre { background: #16213e; padding: 15px; border-radius: 8px; overflow-x: auto; color: #00ff88; }
        .step { background: #16213e; padding: 15px; margin: 10px 0; border-radius: 8px; border-left: 4px solid #00d4ff; }
        .warning { background: #3d1a1a; border-left-color: #ff6b6b; }
        a { color: #00d4ff; }
    </style>
</head>
<body>
    <h1>📡 TradingView Webhook Setup Guide</h1>

    <h2>🔧 Step 1: Open a chart and add your indicator</h2>
    <div class="step">
        <p>1. Open <a href="https://www.tradingview.com" target="_blank">TradingView</a></p>
        <p>2. Pick the symbol to watch (e.g. BTCUSDT, ETHUSD...)</p>
        <p>3. Add your indicator to the chart</p>
    </div>

    <h2>⚡ Step 2: Create the alert</h2>
    <div class="step">
        <p>1. Right-click the chart → <strong>Add Alert</strong> (or press Alt+A)</p>
        <p>2. In the <strong>Settings</strong> tab pick the indicator condition
           and trigger <strong>Once per bar close</strong></p>
        <p>3. In the <strong>Message</strong> tab, paste:</p>
        <pre>{
  "secret": "your_webhook_secret",
  "symbol": "{{ticker}}",
  "timeframe": "{{interval}}",
  "indicator": "Reversal Pro 3.0",
  "signal": "BULLISH",
  "price": "{{close}}",
  "time": "{{timenow}}"
}</pre>
        <p>4. In the <strong>Notifications</strong> tab:</p>
        <ul>
            <li>✅ Tick <strong>Webhook URL</strong></li>
            <li>Enter the URL: <code>https://your-server.example.com/webhook</code></li>
        </ul>
        <p>5. Click <strong>Save</strong></p>
    </div>

    <h2>⚡ Step 3: Repeat for the opposite direction</h2>
    <div class="step">
        <p>Create a second alert with the bearish condition and
           <code>"signal": "BEARISH"</code> in the message.</p>
    </div>

    <h2 style="color: #ffd93d;">⚠️ Important notes</h2>
    <div class="step warning">
        <ul>
            <li>Create <strong>two separate alerts</strong> per symbol (1 BULLISH + 1 BEARISH)</li>
            <li>Do NOT use <code>{{strategy.order.action}}</code> - it only resolves for
                strategies, not for indicators</li>
            <li>The URL must end with <code>/webhook</code></li>
        </ul>
    </div>

    <h2>✅ Done!</h2>
    <div class="step">
        <p>Every signal now lands in your Telegram chat! 🎉</p>
    </div>
</body>
</html>
"#;

fn status_reply(status: StatusCode, body: serde_json::Value) -> warp::reply::Response {
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

fn error_reply(status: StatusCode, message: &str) -> warp::reply::Response {
    status_reply(status, json!({ "error": message }))
}
