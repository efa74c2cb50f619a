//! Three-panel technical analysis chart rendered as SVG.
//!
//! Price with moving averages, Bollinger bands and signal markers on top,
//! RSI with its thresholds in the middle, MACD with histogram at the bottom.

use crate::config::RsiSettings;
use crate::error::ArtifactError;
use crate::models::indicators::{IndicatorSeries, IndicatorSet};
use crate::models::signal::SignalEvent;
use crate::reports::escape_markup;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const LATEST_CHART: &str = "latest_technical_analysis.svg";

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 800.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 20.0;

const COLOR_PRICE: &str = "#1f77b4";
const COLOR_MA_SHORT: &str = "#2ca02c";
const COLOR_MA_LONG: &str = "#d62728";
const COLOR_BANDS: &str = "#7f7f7f";
const COLOR_RSI: &str = "#9467bd";
const COLOR_SIGNAL: &str = "#ff7f0e";
const COLOR_UP: &str = "#2ca02c";
const COLOR_DOWN: &str = "#d62728";

/// Vertical placement of a panel and its value range
struct Panel {
    top: f64,
    height: f64,
    min: f64,
    max: f64,
}

impl Panel {
    fn new(top: f64, height: f64, values: impl Iterator<Item = f64>) -> Self {
        let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        }
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }
        let pad = (max - min) * 0.05;
        Self {
            top,
            height,
            min: min - pad,
            max: max + pad,
        }
    }

    fn with_range(top: f64, height: f64, min: f64, max: f64) -> Self {
        Self {
            top,
            height,
            min,
            max,
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.top + self.height * (self.max - value) / (self.max - self.min)
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Horizontal mapping of the visible bars
struct XAxis {
    start: usize,
    count: usize,
}

impl XAxis {
    fn x(&self, index: usize) -> f64 {
        let span = (self.count.saturating_sub(1)).max(1) as f64;
        LEFT + (WIDTH - LEFT - RIGHT) * (index - self.start) as f64 / span
    }

    fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.count
    }
}

fn polyline(series: &IndicatorSeries, axis: &XAxis, panel: &Panel, color: &str, dashed: bool) -> String {
    let mut d = String::new();
    let mut pen_down = false;
    for i in axis.indices() {
        match series.get(i) {
            Some(v) => {
                let cmd = if pen_down { 'L' } else { 'M' };
                d.push_str(&format!("{}{:.1},{:.1} ", cmd, axis.x(i), panel.y(v)));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    let dash = if dashed { r#" stroke-dasharray="4,3""# } else { "" };
    format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="1.5"{}/>"#,
        d.trim_end(),
        color,
        dash
    )
}

fn close_line(closes: &[f64], axis: &XAxis, panel: &Panel) -> String {
    let points = axis
        .indices()
        .map(|i| format!("{:.1},{:.1}", axis.x(i), panel.y(closes[i])))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.8"/>"#,
        points, COLOR_PRICE
    )
}

fn hline(panel: &Panel, value: f64, color: &str) -> String {
    let y = panel.y(value);
    format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-dasharray="5,4"/>"#,
        LEFT,
        y,
        WIDTH - RIGHT,
        y,
        color
    )
}

fn text(x: f64, y: f64, size: u32, anchor: &str, content: &str) -> String {
    format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="{}" text-anchor="{}" font-family="sans-serif">{}</text>"#,
        x,
        y,
        size,
        anchor,
        escape_markup(content)
    )
}

fn frame(panel: &Panel, title: &str) -> String {
    let mut out = format!(
        r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="#cccccc"/>"##,
        LEFT,
        panel.top,
        WIDTH - LEFT - RIGHT,
        panel.height
    );
    out.push_str(&text(LEFT, panel.top - 6.0, 13, "start", title));
    out.push_str(&text(LEFT - 6.0, panel.top + 10.0, 10, "end", &format!("{:.2}", panel.max)));
    out.push_str(&text(LEFT - 6.0, panel.bottom(), 10, "end", &format!("{:.2}", panel.min)));
    out
}

fn defined(series: &[&IndicatorSeries], axis: &XAxis) -> Vec<f64> {
    series
        .iter()
        .flat_map(|s| axis.indices().filter_map(move |i| s.get(i)))
        .collect()
}

/// Render the chart over the last `chart_days` bars of `set`
pub fn render_svg(
    ticker: &str,
    set: &IndicatorSet,
    events: &[SignalEvent],
    rsi: &RsiSettings,
    chart_days: usize,
) -> String {
    let count = set.len().min(chart_days.max(1));
    let axis = XAxis {
        start: set.len() - count,
        count,
    };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
    if count == 0 {
        svg.push_str("</svg>");
        return svg;
    }

    // price panel
    let mut price_values = defined(
        &[
            &set.ma_short,
            &set.ma_long,
            &set.bollinger.upper,
            &set.bollinger.lower,
        ],
        &axis,
    );
    price_values.extend(axis.indices().map(|i| set.closes[i]));
    let price = Panel::new(40.0, 360.0, price_values.into_iter());
    svg.push_str(&frame(&price, &format!("{} price, moving averages and Bollinger bands", ticker)));
    svg.push_str(&polyline(&set.bollinger.upper, &axis, &price, COLOR_BANDS, true));
    svg.push_str(&polyline(&set.bollinger.lower, &axis, &price, COLOR_BANDS, true));
    svg.push_str(&polyline(&set.ma_short, &axis, &price, COLOR_MA_SHORT, false));
    svg.push_str(&polyline(&set.ma_long, &axis, &price, COLOR_MA_LONG, false));
    svg.push_str(&close_line(&set.closes, &axis, &price));

    for event in events.iter().filter(|e| axis.indices().contains(&e.bar_index())) {
        let color = if event.direction().is_bullish() { COLOR_UP } else { COLOR_DOWN };
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="5" fill="{}"><title>{} {:.2}</title></circle>"#,
            axis.x(event.bar_index()),
            price.y(event.price()),
            color,
            event.direction(),
            event.price()
        ));
    }

    // RSI panel
    let rsi_panel = Panel::with_range(440.0, 140.0, 0.0, 100.0);
    svg.push_str(&frame(&rsi_panel, &format!("{} (overbought {}, oversold {})", set.rsi_short.name, rsi.overbought, rsi.oversold)));
    svg.push_str(&hline(&rsi_panel, rsi.overbought, COLOR_DOWN));
    svg.push_str(&hline(&rsi_panel, rsi.oversold, COLOR_UP));
    svg.push_str(&polyline(&set.rsi_short, &axis, &rsi_panel, COLOR_RSI, false));

    // MACD panel
    let macd_values = defined(&[&set.macd.line, &set.macd.signal, &set.macd.histogram], &axis);
    let macd = Panel::new(620.0, 140.0, macd_values.into_iter().chain(std::iter::once(0.0)));
    svg.push_str(&frame(&macd, "MACD"));
    let bar_width = ((WIDTH - LEFT - RIGHT) / count as f64 * 0.8).max(1.0);
    let zero = macd.y(0.0);
    for i in axis.indices() {
        if let Some(h) = set.macd.histogram.get(i) {
            let y = macd.y(h);
            let color = if h >= 0.0 { COLOR_UP } else { COLOR_DOWN };
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" opacity="0.6"/>"#,
                axis.x(i) - bar_width / 2.0,
                y.min(zero),
                bar_width,
                (y - zero).abs(),
                color
            ));
        }
    }
    svg.push_str(&polyline(&set.macd.line, &axis, &macd, COLOR_PRICE, false));
    svg.push_str(&polyline(&set.macd.signal, &axis, &macd, COLOR_SIGNAL, false));

    // date labels
    let first = set.timestamps[axis.start].format("%Y-%m-%d").to_string();
    let last = set.timestamps[axis.start + count - 1].format("%Y-%m-%d").to_string();
    svg.push_str(&text(LEFT, HEIGHT - 12.0, 11, "start", &first));
    svg.push_str(&text(WIDTH - RIGHT, HEIGHT - 12.0, 11, "end", &last));

    svg.push_str("</svg>");
    svg
}

/// Writes timestamped and latest chart files
#[derive(Debug, Clone)]
pub struct ChartWriter {
    dir: PathBuf,
}

impl ChartWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_name(now: DateTime<Utc>) -> String {
        format!("technical_analysis_{}.svg", now.format("%Y%m%d_%H%M%S"))
    }

    /// Returns the path of the latest chart
    pub fn write(&self, svg: &str, now: DateTime<Utc>) -> Result<PathBuf, ArtifactError> {
        fs::create_dir_all(&self.dir).map_err(|e| ArtifactError::io(&self.dir, e))?;
        let stamped = self.dir.join(Self::file_name(now));
        let latest = self.dir.join(LATEST_CHART);
        for path in [&stamped, &latest] {
            write_file(path, svg)?;
        }
        info!(path = %stamped.display(), "Chart: rendered");
        Ok(latest)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ArtifactError> {
    fs::write(path, content).map_err(|e| ArtifactError::io(path, e))
}
