//! Common types for the portfolio pages
//!
//! Records, rendering targets, trade actions and the per-page payloads.
//! Each page owns its payload schema; keys are not shared or aliased
//! between pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat mapping from column name to display value, in payload key order
pub type Record = Map<String, Value>;

/// Field holding the ticker symbol in holding records
pub const TICKER_FIELD: &str = "Ticker";

/// Field holding the share count in holding records
pub const SHARES_FIELD: &str = "Shares Owned";

/// Field holding the latest price in holding records
pub const PRICE_FIELD: &str = "Current Price";

/// Opaque handle to a presentation surface (an element id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderingTarget(String);

impl RenderingTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RenderingTarget {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for RenderingTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text shown in a table cell or option for a record value
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Ticker symbol of a holding, if present and non-empty
pub fn ticker(holding: &Record) -> Option<&str> {
    holding
        .get(TICKER_FIELD)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Trade side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "buy"),
            TradeAction::Sell => write!(f, "sell"),
        }
    }
}

/// Column-oriented closing price history (search page)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    pub date: Vec<String>,
    pub price: Vec<f64>,
}

/// Column-oriented open/high/low/close history (buy page)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OhlcHistory {
    pub date: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

/// Column-oriented portfolio value history (dashboard)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueHistory {
    pub date: Vec<String>,
    pub value: Vec<f64>,
}

/// One portfolio's value series (leaderboard)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSeries {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
}

/// Pie chart breakdown (sector or holding weights)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Breakdown {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Related news article (search page)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub name: String,
    pub url: String,
}

/// Dashboard page payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardPayload {
    #[serde(default)]
    pub transactions: Vec<Record>,
    #[serde(default)]
    pub holdings: Vec<Record>,
    #[serde(default)]
    pub history: ValueHistory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sectors: Option<Breakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
}

/// Buy page payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyPayload {
    pub ticker: String,
    pub price: f64,
    /// Most shares the available cash can pay for
    pub max_shares: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<OhlcHistory>,
}

/// Sell page payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellPayload {
    #[serde(default)]
    pub holdings: Vec<Record>,
    /// Preselected holding, if the page was opened for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default)]
    pub price: f64,
    /// Shares owned of the preselected holding
    #[serde(default)]
    pub max_shares: i64,
}

/// Search page payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPayload {
    pub ticker: String,
    #[serde(default)]
    pub history: PriceHistory,
    #[serde(default)]
    pub news: Vec<NewsArticle>,
}

/// Leaderboard page payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardPayload {
    #[serde(default)]
    pub top_performers: Vec<Record>,
    #[serde(default)]
    pub daily_performers: Vec<Record>,
    #[serde(default)]
    pub history: Vec<PerformanceSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Trade validation request (`POST /api/validate-trade`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    pub action: TradeAction,
    /// Raw share field text as typed into the form
    pub shares: String,
    pub max_shares: i64,
    pub ticker: String,
    pub price: f64,
}

/// Query string accepted by the page routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Quote or holding the page was opened for
    #[serde(default)]
    pub ticker: Option<String>,
}

impl PageQuery {
    pub fn ticker(&self) -> Option<&str> {
        self.ticker.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
}
