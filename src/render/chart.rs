//! Chart figures
//!
//! Builds figure descriptions (traces + layout) for the page's charting
//! library from column-oriented history payloads. Figures are emitted into
//! a chart container as a `data-figure` JSON attribute and drawn client-side.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{DashboardError, Result};
use crate::surface::{Document, Element};
use crate::types::{
    Breakdown, OhlcHistory, PerformanceSeries, PriceHistory, RenderingTarget, ValueHistory,
};

/// Shown instead of the leaderboard chart until there are two data points
pub const NO_HISTORY: &str = "No history available yet!";

/// Colours shared by every figure
#[derive(Debug, Clone)]
pub struct ChartTheme {
    pub font_color: String,
    pub line_color: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            font_color: "#FFFFFF".to_string(),
            line_color: "#17BECF".to_string(),
        }
    }
}

/// A figure handed to the charting library
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

/// Parse `%Y-%m-%d` or `%Y-%m-%d %H:%M` date text
pub fn parse_date(text: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DashboardError::InvalidDate(text.to_string()))
}

fn check_dates(dates: &[String]) -> Result<()> {
    dates.iter().try_for_each(|d| parse_date(d).map(|_| ()))
}

/// Every column must be as long as the first one
fn check_columns(series: usize, columns: &[(&str, usize)]) -> Result<()> {
    let Some(&(first_name, expected)) = columns.first() else {
        return Ok(());
    };
    match columns.iter().find(|(_, len)| *len != expected) {
        Some((name, len)) => Err(DashboardError::ShapeMismatch {
            row: series,
            expected: format!("{expected} values (as '{first_name}')"),
            found: format!("{len} values in '{name}'"),
        }),
        None => Ok(()),
    }
}

fn base_layout(theme: &ChartTheme, font_size: u32) -> Value {
    json!({
        "plot_bgcolor": "rgba(0, 0, 0, 0)",
        "paper_bgcolor": "rgba(0, 0, 0, 0)",
        "font": { "size": font_size, "color": theme.font_color },
        "margin": { "l": 30, "r": 30, "b": 50, "t": 80, "pad": 0 },
        "yaxis": {
            "autorange": true,
            "fixedrange": false,
            "type": "linear",
            "tickangle": -45,
            "showgrid": false
        }
    })
}

fn range_selector() -> Value {
    json!({
        "bgcolor": "black",
        "buttons": [
            { "count": 1, "label": "1m", "step": "month", "stepmode": "backward" },
            { "count": 6, "label": "6m", "step": "month", "stepmode": "backward" },
            { "count": 1, "label": "YTD", "step": "year", "stepmode": "todate" },
            { "count": 1, "label": "1y", "step": "year", "stepmode": "backward" },
            { "step": "all" }
        ]
    })
}

fn with_range_axis(mut layout: Value, dates: &[String]) -> Value {
    let range = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => json!([first, last]),
        _ => json!([]),
    };
    layout["xaxis"] = json!({
        "autorange": true,
        "rangeselector": range_selector(),
        "rangeslider": { "range": range }
    });
    layout
}

/// Closing price line with range selector (search page)
pub fn price_chart(history: &PriceHistory, theme: &ChartTheme) -> Result<Figure> {
    check_columns(0, &[("date", history.date.len()), ("price", history.price.len())])?;
    check_dates(&history.date)?;

    let trace = json!({
        "x": history.date,
        "y": history.price,
        "type": "scatter",
        "mode": "lines",
        "marker": { "color": "blue" },
        "line": { "color": theme.line_color }
    });

    Ok(Figure {
        data: vec![trace],
        layout: with_range_axis(base_layout(theme, 12), &history.date),
    })
}

/// Portfolio value line (dashboard)
pub fn value_chart(history: &ValueHistory, theme: &ChartTheme) -> Result<Figure> {
    check_columns(0, &[("date", history.date.len()), ("value", history.value.len())])?;
    check_dates(&history.date)?;

    let trace = json!({
        "x": history.date,
        "y": history.value,
        "type": "scatter",
        "mode": "lines",
        "fill": "tozeroy",
        "line": { "color": theme.line_color }
    });

    let mut layout = with_range_axis(base_layout(theme, 12), &history.date);
    layout["title"] = json!("Portfolio Value");
    Ok(Figure { data: vec![trace], layout })
}

/// Open/high/low/close candles (buy page)
pub fn candlestick_chart(history: &OhlcHistory, theme: &ChartTheme) -> Result<Figure> {
    check_columns(
        0,
        &[
            ("date", history.date.len()),
            ("open", history.open.len()),
            ("high", history.high.len()),
            ("low", history.low.len()),
            ("close", history.close.len()),
        ],
    )?;
    check_dates(&history.date)?;

    let trace = json!({
        "x": history.date,
        "open": history.open,
        "high": history.high,
        "low": history.low,
        "close": history.close,
        "type": "candlestick",
        "increasing": { "line": { "color": theme.line_color } },
        "decreasing": { "line": { "color": "#7F7F7F" } }
    });

    let mut layout = with_range_axis(base_layout(theme, 12), &history.date);
    layout["showlegend"] = json!(false);
    Ok(Figure { data: vec![trace], layout })
}

/// Every portfolio's value over time (leaderboard).
///
/// Dates are replaced by point indexes so gaps (weekends, closed hours)
/// do not stretch the axis; the first series' dates become the tick text.
/// Returns `None` when the first series has fewer than two points.
pub fn performance_chart(
    series: &[PerformanceSeries],
    theme: &ChartTheme,
) -> Result<Option<Figure>> {
    let Some(first) = series.first() else {
        return Ok(None);
    };
    if first.x.len() <= 1 {
        return Ok(None);
    }

    let mut data = Vec::with_capacity(series.len());
    for (i, s) in series.iter().enumerate() {
        check_columns(i, &[("x", s.x.len()), ("y", s.y.len())])?;
        check_dates(&s.x)?;
        let indexes: Vec<usize> = (0..s.x.len()).collect();
        data.push(json!({
            "x": indexes,
            "y": s.y,
            "name": s.name,
            "type": "scatter",
            "mode": "lines"
        }));
    }

    let tickvals: Vec<usize> = (0..first.x.len()).collect();
    let mut layout = base_layout(theme, 10);
    layout["title"] = json!("Portfolio Performance");
    layout["showlegend"] = json!(true);
    layout["margin"] = json!({ "l": 30, "r": 30, "t": 80, "pad": 0 });
    layout["legend"] = json!({
        "x": 0,
        "y": 0,
        "traceorder": "normal",
        "font": { "family": "sans-serif", "size": 10, "color": theme.font_color },
        "bgcolor": "#000",
        "borderwidth": 1,
        "orientation": "h"
    });
    layout["xaxis"] = json!({
        "autorange": true,
        "tickvals": tickvals,
        "ticktext": first.x,
        "tickmode": "array",
        "showgrid": false,
        "showticklabels": false
    });

    Ok(Some(Figure { data, layout }))
}

/// Weight breakdown pie (dashboard)
pub fn pie_chart(breakdown: &Breakdown, title: &str, theme: &ChartTheme) -> Result<Figure> {
    check_columns(
        0,
        &[("labels", breakdown.labels.len()), ("values", breakdown.values.len())],
    )?;

    let trace = json!({
        "labels": breakdown.labels,
        "values": breakdown.values,
        "type": "pie",
        "hole": 0.4,
        "textinfo": "label+percent"
    });

    let mut layout = base_layout(theme, 12);
    layout["title"] = json!(title);
    layout["showlegend"] = json!(false);
    Ok(Figure { data: vec![trace], layout })
}

/// Replace `target`'s content with a chart container for `figure`
pub fn render_chart(doc: &mut Document, target: &RenderingTarget, figure: &Figure) -> Result<()> {
    let encoded = serde_json::to_string(figure)?;
    doc.clear(target);
    doc.append(
        target,
        Element::new("div")
            .attr("class", "chart")
            .attr("data-figure", encoded),
    );
    Ok(())
}

/// Replace `target`'s content with a centred notice
pub fn render_placeholder(doc: &mut Document, target: &RenderingTarget, text: &str) {
    doc.clear(target);
    doc.append(
        target,
        Element::new("h3").attr("class", "text-center my-5").text(text),
    );
}
