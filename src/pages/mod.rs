//! Portfolio simulator pages
//!
//! Each page parses its own payload, drives the renderers into a fresh
//! `Document` and fills its template. The shell wraps every page with the
//! shared navigation, alert container, styles and client script.
//!
//! # Architecture
//! - `css.rs`: styling with CSS custom properties
//! - `js.rs`: alert dismissal, modals, chart drawing, table sorting, trade checks
//! - one module per page: `dashboard`, `buy`, `sell`, `search`, `leaderboard`
//! - `submit.rs`: server-side check of a submitted buy/sell form

mod css;
mod js;

pub mod buy;
pub mod dashboard;
pub mod leaderboard;
pub mod search;
pub mod sell;
pub mod submit;

use std::future::Future;
use std::str::FromStr;

use futures::future::join_all;
use serde::Serialize;

use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::render::chart::{self, ChartTheme, Figure};
use crate::render::flash::{ALERT_TARGET, FlashMessage, flash_message};
use crate::render::table::{TableOptions, render_table};
use crate::surface::{Document, escape};
use crate::types::{
    BuyPayload, DashboardPayload, LeaderboardPayload, Record, RenderingTarget, SearchPayload,
    SellPayload, TradeAction,
};

/// Target holding every modal of a page
pub const POPUPS: &str = "popups";

/// Shown in place of a chart whose data failed validation
pub const CHART_UNAVAILABLE: &str = "Chart unavailable";

const NO_DATA: &str = "No data available yet";

/// The pages served by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Dashboard,
    Buy,
    Sell,
    Search,
    Leaderboard,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::Dashboard,
        PageKind::Buy,
        PageKind::Sell,
        PageKind::Search,
        PageKind::Leaderboard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Dashboard => "dashboard",
            PageKind::Buy => "buy",
            PageKind::Sell => "sell",
            PageKind::Search => "search",
            PageKind::Leaderboard => "leaderboard",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageKind::Dashboard => "Dashboard",
            PageKind::Buy => "Buy Stock",
            PageKind::Sell => "Sell Stock",
            PageKind::Search => "Stock Search",
            PageKind::Leaderboard => "Leaderboard",
        }
    }

    /// KV key the page's payload is stored under
    pub fn storage_key(self) -> String {
        format!("page:{}", self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        PageKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DashboardError::UnknownPage(s.to_string()))
    }
}

/// A rendered page
#[derive(Debug)]
pub struct Page {
    pub kind: PageKind,
    pub html: String,
    /// Rows, options and charts that were dropped while rendering
    pub issues: Vec<DashboardError>,
}

/// What the page was requested with, beyond its stored payload
#[derive(Debug, Default)]
pub struct PageRequest<'a> {
    /// Ticker from the query string; quote pages only show a matching payload
    pub ticker: Option<&'a str>,
    /// Alerts shown above the page content
    pub flashes: Vec<FlashMessage>,
}

impl PageRequest<'_> {
    fn shows(&self, ticker: &str) -> bool {
        self.ticker.is_none_or(|wanted| wanted.eq_ignore_ascii_case(ticker.trim()))
    }
}

/// Render `kind` from its stored payload JSON; `None` renders the empty page
pub fn render_page(kind: PageKind, payload: Option<&str>, config: &Config) -> Result<Page> {
    render_request(kind, payload, &PageRequest::default(), config)
}

/// Render `kind` for a specific request.
///
/// The buy and search pages are quotes for one ticker: when the request
/// names a different ticker than the stored payload, the empty page is
/// shown rather than someone else's quote.
pub fn render_request(
    kind: PageKind,
    payload: Option<&str>,
    request: &PageRequest<'_>,
    config: &Config,
) -> Result<Page> {
    let mut builder = PageBuilder::new(config);
    for flash in &request.flashes {
        builder.flash(flash);
    }
    let Some(json) = payload else {
        return Ok(empty_page(builder, kind));
    };

    let page = match kind {
        PageKind::Dashboard => {
            dashboard::build(&serde_json::from_str::<DashboardPayload>(json)?, builder)
        }
        PageKind::Buy => {
            let payload = serde_json::from_str::<BuyPayload>(json)?;
            if request.shows(&payload.ticker) {
                buy::build(&payload, builder)
            } else {
                empty_page(builder, kind)
            }
        }
        PageKind::Sell => sell::build(&serde_json::from_str::<SellPayload>(json)?, builder),
        PageKind::Search => {
            let payload = serde_json::from_str::<SearchPayload>(json)?;
            if request.shows(&payload.ticker) {
                search::build(&payload, builder)
            } else {
                empty_page(builder, kind)
            }
        }
        PageKind::Leaderboard => {
            leaderboard::build(&serde_json::from_str::<LeaderboardPayload>(json)?, builder)
        }
    };
    Ok(page)
}

/// Check that `json` deserializes as `kind`'s payload
pub fn validate_payload(kind: PageKind, json: &str) -> Result<()> {
    match kind {
        PageKind::Dashboard => serde_json::from_str::<DashboardPayload>(json).map(|_| ()),
        PageKind::Buy => serde_json::from_str::<BuyPayload>(json).map(|_| ()),
        PageKind::Sell => serde_json::from_str::<SellPayload>(json).map(|_| ()),
        PageKind::Search => serde_json::from_str::<SearchPayload>(json).map(|_| ()),
        PageKind::Leaderboard => serde_json::from_str::<LeaderboardPayload>(json).map(|_| ()),
    }
    .map_err(DashboardError::from)
}

/// Whether a page has a stored payload and whether it is still valid
#[derive(Debug, Clone, Serialize)]
pub struct PageStatus {
    pub page: &'static str,
    pub stored: bool,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Load every page's payload concurrently and report its status
pub async fn payload_status<F, Fut>(load: F) -> Vec<PageStatus>
where
    F: Fn(PageKind) -> Fut,
    Fut: Future<Output = Result<Option<String>>>,
{
    let checks = PageKind::ALL.into_iter().map(|kind| {
        let pending = load(kind);
        async move {
            let (stored, result) = match pending.await {
                Ok(Some(json)) => (true, validate_payload(kind, &json)),
                Ok(None) => (false, Ok(())),
                Err(e) => (false, Err(e)),
            };
            PageStatus {
                page: kind.as_str(),
                stored,
                valid: stored && result.is_ok(),
                error: result.err().map(|e| e.to_string()),
            }
        }
    });
    join_all(checks).await
}

/// Shared state while one page is being rendered
pub(crate) struct PageBuilder<'a> {
    pub doc: Document,
    pub issues: Vec<DashboardError>,
    pub config: &'a Config,
    pub theme: ChartTheme,
}

impl<'a> PageBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            doc: Document::new(),
            issues: Vec::new(),
            config,
            theme: ChartTheme {
                font_color: config.chart_font_color.clone(),
                line_color: config.chart_line_color.clone(),
            },
        }
    }

    pub fn table(&mut self, records: &[Record], id: &str, options: TableOptions) {
        let options = options.clear(self.config.clear_before_render);
        let report = render_table(records, &RenderingTarget::new(id), &options, &mut self.doc);
        self.issues.extend(report.issues);
    }

    /// Draw `figure`, or note the failure and show a placeholder instead
    pub fn chart(&mut self, id: &str, figure: Result<Figure>) {
        let target = RenderingTarget::new(id);
        match figure.and_then(|f| chart::render_chart(&mut self.doc, &target, &f)) {
            Ok(()) => {}
            Err(e) => {
                self.issues.push(e);
                chart::render_placeholder(&mut self.doc, &target, CHART_UNAVAILABLE);
            }
        }
    }

    pub fn flash(&mut self, flash: &FlashMessage) {
        flash_message(&mut self.doc, flash, self.config.flash_dismiss_ms);
    }

    /// Inner HTML of a target, or a muted notice when nothing was rendered
    pub fn html_or(&self, id: &str, empty: &str) -> String {
        let html = self.doc.html_of(id);
        if html.is_empty() {
            format!(r#"<p class="empty">{}</p>"#, escape(empty))
        } else {
            html
        }
    }

    pub fn finish(self, kind: PageKind, body: &str) -> Page {
        let shell = Shell {
            kind,
            alerts: &self.doc.html_of(ALERT_TARGET),
            dismiss_ms: self.config.flash_dismiss_ms,
            popups: &self.doc.html_of(POPUPS),
        };
        let html = shell.wrap(body);
        Page {
            kind,
            html,
            issues: self.issues,
        }
    }
}

fn empty_page(mut builder: PageBuilder<'_>, kind: PageKind) -> Page {
    builder.flash(&FlashMessage::info(NO_DATA));
    let body = format!(
        r#"<div class="card wide"><p class="empty">{NO_DATA}</p></div>"#
    );
    builder.finish(kind, &body)
}

/// Buy/sell form; `ticker_control` is the markup of the ticker field
pub(crate) fn trade_form_html(
    action: TradeAction,
    form_id: &str,
    ticker_control: &str,
    price: f64,
    max_shares: i64,
) -> String {
    let label = match action {
        TradeAction::Buy => "Buy",
        TradeAction::Sell => "Sell",
    };
    format!(
        r#"<form id="{form_id}" class="trade-form" method="post" action="/{path}"
                  data-max-shares="{max_shares}" data-action="{action_code}">
                {ticker_control}
                <input type="hidden" id="price" name="price" value="{price}">
                <label for="shares">Shares</label>
                <input type="number" id="shares" name="shares"
                       min="1" max="{max_shares}" step="1" value="1">
                <button type="button" class="btn btn-primary"
                        data-validate="{form_id}">{label}</button>
            </form>"#,
        path = label.to_lowercase(),
        action_code = label.to_uppercase(),
    )
}

/// The parts every page shares around its body
struct Shell<'a> {
    kind: PageKind,
    alerts: &'a str,
    dismiss_ms: u32,
    popups: &'a str,
}

impl Shell<'_> {
    fn wrap(&self, body: &str) -> String {
        let kind = self.kind;
        let nav: String = PageKind::ALL
            .into_iter()
            .map(|k| {
                let class = if k == kind { "nav-link active" } else { "nav-link" };
                format!(r#"<a class="{class}" href="/{}">{}</a>"#, k.as_str(), k.title())
            })
            .collect::<Vec<_>>()
            .join("\n                ");

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Portfolio Simulator</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
{css}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{title}</h1>
            <nav class="header-controls">
                {nav}
            </nav>
        </header>
        <div id="{ALERT_TARGET}" data-dismiss-after="{dismiss_ms}">{alerts}</div>
{body}
        <div id="{POPUPS}">{popups}</div>
    </div>
    <script>
{js}
    </script>
</body>
</html>"#,
            title = kind.title(),
            alerts = self.alerts,
            dismiss_ms = self.dismiss_ms,
            popups = self.popups,
            css = css::STYLES,
            js = js::SCRIPT
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;

    #[test]
    fn test_page_kind_round_trip_names() {
        for kind in PageKind::ALL {
            assert_eq!(kind.as_str().parse::<PageKind>().unwrap(), kind);
        }
        assert!(matches!(
            "portfolio".parse::<PageKind>(),
            Err(DashboardError::UnknownPage(_))
        ));
        assert_eq!(PageKind::Sell.storage_key(), "page:sell");
    }

    #[test]
    fn test_missing_payload_renders_empty_page() {
        let page = render_page(PageKind::Leaderboard, None, &Config::default()).unwrap();

        assert!(page.html.contains("<!DOCTYPE html>"));
        assert!(page.html.contains(r#"class="alert alert-info"#));
        assert!(page.html.contains(NO_DATA));
        assert!(page.issues.is_empty());
    }

    #[test]
    fn test_invalid_payload_is_an_error() {
        let result = render_page(PageKind::Buy, Some(r#"{"ticker": 5}"#), &Config::default());
        assert!(matches!(result, Err(DashboardError::Json(_))));

        let buy = r#"{"ticker":"AAPL","price":1.0,"max_shares":2}"#;
        assert!(validate_payload(PageKind::Buy, buy).is_ok());
        assert!(validate_payload(PageKind::Search, "[]").is_err());
    }

    #[test]
    fn test_shell_marks_active_page() {
        let page = render_page(PageKind::Search, None, &Config::default()).unwrap();
        assert!(page.html.contains(r#"<a class="nav-link active" href="/search">"#));
        assert!(page.html.contains(r#"<a class="nav-link" href="/dashboard">"#));
    }

    #[test]
    fn test_shell_carries_dismiss_delay() {
        let config = Config {
            flash_dismiss_ms: 5000,
            ..Config::default()
        };
        let page = render_page(PageKind::Dashboard, None, &config).unwrap();

        assert!(page.html.contains(r#"<div id="alertMessage" data-dismiss-after="5000">"#));
        assert!(page.html.contains("container.dataset.dismissAfter"));
    }

    #[test]
    fn test_quote_pages_follow_requested_ticker() {
        let config = Config::default();
        let buy = r#"{"ticker": "AAPL", "price": 190.1, "max_shares": 3}"#;
        let request = |ticker| PageRequest {
            ticker,
            ..PageRequest::default()
        };

        let page = render_request(PageKind::Buy, Some(buy), &request(Some("aapl")), &config);
        assert!(page.unwrap().html.contains(r#"data-max-shares="3""#));

        let page = render_request(PageKind::Buy, Some(buy), &request(Some("MSFT")), &config);
        let html = page.unwrap().html;
        assert!(html.contains(NO_DATA));
        assert!(!html.contains("AAPL"));

        let search = r#"{"ticker": "NVDA"}"#;
        let page = render_request(PageKind::Search, Some(search), &request(Some("TSLA")), &config);
        assert!(page.unwrap().html.contains(NO_DATA));

        let page = render_request(PageKind::Search, Some(search), &request(None), &config);
        assert!(!page.unwrap().html.contains(NO_DATA));
    }

    #[test]
    fn test_request_flashes_are_shown() {
        let request = PageRequest {
            ticker: None,
            flashes: vec![FlashMessage::danger("You do not own 4 shares of AAPL!")],
        };
        let page = render_request(PageKind::Sell, Some("{}"), &request, &Config::default());
        let html = page.unwrap().html;

        assert!(html.contains(r#"class="alert alert-danger"#));
        assert!(html.contains("You do not own 4 shares of AAPL!"));
    }

    #[test]
    fn test_trade_form_markup() {
        let html = trade_form_html(TradeAction::Sell, "sellForm", "<select></select>", 12.5, 4);
        assert!(html.contains(r#"data-max-shares="4""#));
        assert!(html.contains(r#"data-action="SELL""#));
        assert!(html.contains(r#"action="/sell""#));
        assert!(html.contains(r#"value="12.5""#));
    }

    #[tokio::test]
    async fn test_payload_status() {
        let statuses = payload_status(|kind| {
            ready(match kind {
                PageKind::Dashboard => Ok(Some("{}".to_string())),
                PageKind::Buy => Ok(Some("{}".to_string())),
                PageKind::Search => Err(DashboardError::Storage("kv down".to_string())),
                _ => Ok(None),
            })
        })
        .await;

        assert_eq!(statuses.len(), 5);
        assert!(statuses[0].stored && statuses[0].valid);
        // buy requires ticker/price/max_shares
        assert!(statuses[1].stored && !statuses[1].valid);
        assert!(!statuses[2].stored);
        assert!(statuses[3].error.as_deref().unwrap().contains("kv down"));
        assert!(!statuses[4].stored && statuses[4].error.is_none());
    }
}
