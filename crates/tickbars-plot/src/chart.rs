//! Plotly HTML chart rendering.

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tickbars_format::{PriceRow, read_price_rows_from_path};

use crate::{PlotError, ema};

/// Span of the fast moving average.
pub const FAST_SPAN: usize = 50;

/// Span of the slow moving average.
pub const SLOW_SPAN: usize = 200;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Returns the chart title for a data file.
#[must_use]
pub fn chart_title(data: &Path) -> String {
    let name = data
        .file_name()
        .map_or_else(|| data.display().to_string(), |n| n.to_string_lossy().into_owned());
    format!("Price Chart with EMA{FAST_SPAN} & EMA{SLOW_SPAN} - {name}")
}

/// Returns where the chart for `data` is written: same path, `.html` extension.
#[must_use]
pub fn chart_path(data: &Path) -> PathBuf {
    data.with_extension("html")
}

/// Renders rows as a standalone HTML page with candlesticks and two EMAs.
///
/// Rows without timestamps are plotted against their index.
///
/// # Errors
///
/// Returns an error if an EMA cannot be computed.
pub fn render_html(rows: &[PriceRow], title: &str) -> Result<String, PlotError> {
    let x: Vec<Value> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| match row.timestamp {
            Some(ts) => json!(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => json!(i),
        })
        .collect();
    let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();
    let fast = ema(&closes, FAST_SPAN)?;
    let slow = ema(&closes, SLOW_SPAN)?;

    let traces = json!([
        {
            "type": "candlestick",
            "name": "OHLC",
            "x": x,
            "open": rows.iter().map(|r| r.open).collect::<Vec<_>>(),
            "high": rows.iter().map(|r| r.high).collect::<Vec<_>>(),
            "low": rows.iter().map(|r| r.low).collect::<Vec<_>>(),
            "close": closes,
        },
        {
            "type": "scatter",
            "mode": "lines",
            "name": format!("EMA {FAST_SPAN}"),
            "x": x,
            "y": fast,
            "line": { "color": "orange", "width": 1.5 },
        },
        {
            "type": "scatter",
            "mode": "lines",
            "name": format!("EMA {SLOW_SPAN}"),
            "x": x,
            "y": slow,
            "line": { "color": "blue", "width": 2 },
        },
    ]);
    let layout = layout(title);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:95vh;"></div>
<script>
Plotly.newPlot("chart", {}, {});
</script>
</body>
</html>
"#,
        escape_html(title),
        script_json(&traces),
        script_json(&layout)
    ))
}

/// Reads a bar CSV and writes its chart next to it.
///
/// Returns the path of the written HTML file.
///
/// # Errors
///
/// Returns [`PlotError::NotFound`] when `data` does not exist, a format error
/// when it lacks a `close` column, and [`PlotError::Empty`] without rows.
pub fn plot_csv(data: &Path) -> Result<PathBuf, PlotError> {
    if !data.exists() {
        return Err(PlotError::NotFound(data.to_path_buf()));
    }

    let rows = read_price_rows_from_path(data)?;
    if rows.is_empty() {
        return Err(PlotError::Empty(data.to_path_buf()));
    }
    tracing::debug!(rows = rows.len(), path = %data.display(), "Loaded bars");

    let html = render_html(&rows, &chart_title(data))?;
    let out = chart_path(data);
    fs::write(&out, html)?;

    tracing::info!(path = %out.display(), "Chart saved");
    Ok(out)
}

/// Chart layout with a dark template and no range slider.
fn layout(title: &str) -> Value {
    json!({
        "title": { "text": title },
        "template": dark_template(),
        "xaxis": { "title": { "text": "Time" }, "rangeslider": { "visible": false } },
        "yaxis": { "title": { "text": "Price" } },
    })
}

/// Template object with the colors of plotly's `plotly_dark` theme.
fn dark_template() -> Value {
    json!({
        "layout": {
            "paper_bgcolor": "rgb(17,17,17)",
            "plot_bgcolor": "rgb(17,17,17)",
            "font": { "color": "#f2f5fa" },
            "xaxis": { "gridcolor": "#283442", "zerolinecolor": "#283442" },
            "yaxis": { "gridcolor": "#283442", "zerolinecolor": "#283442" },
        }
    })
}

/// Serializes JSON for inline `<script>` use; `</` cannot close the tag.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
