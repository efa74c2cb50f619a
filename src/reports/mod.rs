//! Run artifacts: market status, JSON report, signal table, chart and emails.

pub mod chart;
pub mod email;
pub mod report;
pub mod status;

pub use chart::{render_svg, ChartWriter};
pub use report::{Report, ReportWriter};
pub use status::{MarketStatus, Momentum, Strength, Trend};

/// Escape text for HTML and SVG bodies and attribute values
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
