//! HTML email bodies for signal alerts and summaries

use crate::models::signal::{LatestSignals, SignalDirection, SignalEvent};
use crate::reports::escape_markup;
use crate::reports::status::MarketStatus;
use crate::services::notifier::EmailContent;
use chrono::{DateTime, Utc};
use std::fmt;

fn fmt_value(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

fn label<T>(value: Option<T>, f: impl Fn(&T) -> &'static str) -> &'static str {
    value.as_ref().map(f).unwrap_or("n/a")
}

fn direction_color(direction: SignalDirection) -> &'static str {
    match direction {
        SignalDirection::Bullish => "#2e7d32",
        SignalDirection::Bearish => "#c62828",
    }
}

fn direction_title(direction: SignalDirection) -> &'static str {
    match direction {
        SignalDirection::Bullish => "Buy signal",
        SignalDirection::Bearish => "Sell signal",
    }
}

fn status_table(status: &MarketStatus) -> String {
    let rows = [
        ("Price", fmt_value(Some(status.price), 2)),
        ("MA short", fmt_value(status.ma_short, 2)),
        ("MA long", fmt_value(status.ma_long, 2)),
        ("RSI", fmt_value(status.rsi, 2)),
        ("RSI long", fmt_value(status.rsi_long, 2)),
        ("MACD", fmt_value(status.macd, 4)),
        ("MACD signal", fmt_value(status.macd_signal, 4)),
        ("MACD histogram", fmt_value(status.macd_histogram, 4)),
        ("Bollinger upper", fmt_value(status.bb_upper, 2)),
        ("Bollinger lower", fmt_value(status.bb_lower, 2)),
    ];
    let body: String = rows
        .iter()
        .map(|(name, value)| format!("<tr><td>{}</td><td style=\"text-align:right\">{}</td></tr>", name, value))
        .collect();

    format!(
        "<h3>Market status on {date}</h3>\
         <p>Trend: <b>{trend}</b> &middot; Strength: <b>{strength}</b> &middot; Momentum: <b>{momentum}</b></p>\
         <table border=\"1\" cellpadding=\"4\" cellspacing=\"0\">\
         <tr><th>Indicator</th><th>Value</th></tr>{body}</table>",
        date = status.date.format("%Y-%m-%d"),
        trend = label(status.trend, |t| t.label()),
        strength = label(status.strength, |s| s.label()),
        momentum = label(status.momentum, |m| m.label()),
        body = body,
    )
}

fn signal_box(event: &SignalEvent) -> String {
    let direction = event.direction();
    let reasons: String = event
        .confirming_indicators()
        .iter()
        .map(|k| format!("<li>{}: {}</li>", k.name(), k.describe(direction.is_bullish())))
        .collect();
    format!(
        "<div style=\"border-left:4px solid {color};padding:8px;margin:8px 0\">\
         <b style=\"color:{color}\">{title}</b> on {date} at {price:.2} \
         ({count} indicators confirming)<ul>{reasons}</ul></div>",
        color = direction_color(direction),
        title = direction_title(direction),
        date = event.timestamp().format("%Y-%m-%d"),
        price = event.price(),
        count = event.confidence_count(),
        reasons = reasons,
    )
}

fn empty_box(direction: SignalDirection, lookback: usize) -> String {
    format!(
        "<div style=\"border-left:4px solid #9e9e9e;padding:8px;margin:8px 0\">\
         No {} in the last {} bars</div>",
        direction_title(direction).to_lowercase(),
        lookback
    )
}

fn wrap(heading: &str, content: &str) -> String {
    format!(
        "<html><body style=\"font-family:sans-serif\"><h2>{}</h2>{}\
         <p style=\"color:#757575;font-size:12px\">Technical indicators are not investment advice.</p>\
         </body></html>",
        escape_markup(heading),
        content
    )
}

/// Alert for one confirmed signal
pub fn signal_alert(ticker: &str, event: &SignalEvent, status: Option<&MarketStatus>) -> EmailContent {
    let title = direction_title(event.direction());
    let subject = format!(
        "[{}] {} at {:.2} ({})",
        ticker,
        title,
        event.price(),
        event.timestamp().format("%Y-%m-%d")
    );
    let mut content = signal_box(event);
    if let Some(status) = status {
        content.push_str(&status_table(status));
    }

    EmailContent {
        subject,
        html: wrap(&format!("{} {}", ticker, title), &content),
        attachment: None,
    }
}

/// Market summary with the latest signal of each direction
pub fn summary(
    ticker: &str,
    status: Option<&MarketStatus>,
    latest: &LatestSignals,
    weekly: bool,
) -> EmailContent {
    let kind = if weekly { "Weekly summary" } else { "Market summary" };
    let date = status
        .map(|s| s.date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "n/a".to_string());

    let mut content = String::new();
    match status {
        Some(status) => content.push_str(&status_table(status)),
        None => content.push_str("<p>No market data available.</p>"),
    }
    content.push_str("<h3>Latest signals</h3>");
    for (direction, event) in [
        (SignalDirection::Bullish, &latest.latest_bullish),
        (SignalDirection::Bearish, &latest.latest_bearish),
    ] {
        match event {
            Some(event) => content.push_str(&signal_box(event)),
            None => content.push_str(&empty_box(direction, latest.lookback)),
        }
    }

    EmailContent {
        subject: format!("[{}] {} ({})", ticker, kind, date),
        html: wrap(&format!("{} {}", ticker, kind), &content),
        attachment: None,
    }
}

/// Error report sent when the price history could not be fetched
pub fn fetch_failure(ticker: &str, error: &dyn fmt::Display, now: DateTime<Utc>) -> EmailContent {
    let date = now.format("%Y-%m-%d");
    let content = format!(
        "<p>Data retrieval failed: {}</p>\
         <p>The monitor will try again on the next scheduled run.</p>",
        escape_markup(&error.to_string())
    );
    EmailContent {
        subject: format!("[{}] Monitor error ({})", ticker, date),
        html: wrap(&format!("{} monitor error", ticker), &content),
        attachment: None,
    }
}
