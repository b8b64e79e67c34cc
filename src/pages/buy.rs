//! Buy page
//!
//! Candles for the quoted ticker and the buy form. The form's share limit is
//! what the available cash can pay for; the client checks it against
//! `/api/validate-trade` before the confirmation opens.

use crate::config::Config;
use crate::render::chart;
use crate::render::popup::confirm_popup;
use crate::surface::escape;
use crate::types::{BuyPayload, RenderingTarget, TradeAction};

use super::{POPUPS, Page, PageBuilder, PageKind, trade_form_html};

pub const STOCK_PLOT: &str = "stockPlot";
pub const BUY_FORM: &str = "buyForm";

pub fn render(payload: &BuyPayload, config: &Config) -> Page {
    build(payload, PageBuilder::new(config))
}

pub(crate) fn build(payload: &BuyPayload, mut page: PageBuilder<'_>) -> Page {
    if let Some(history) = payload.history.as_ref().filter(|h| !h.date.is_empty()) {
        let figure = chart::candlestick_chart(history, &page.theme);
        page.chart(STOCK_PLOT, figure);
    }

    let ticker = escape(&payload.ticker);
    let ticker_control = format!(
        r#"<input type="hidden" id="ticker" name="ticker" value="{ticker}">"#
    );
    let form = trade_form_html(
        TradeAction::Buy,
        BUY_FORM,
        &ticker_control,
        payload.price,
        payload.max_shares,
    );
    confirm_popup(
        &mut page.doc,
        &RenderingTarget::new(POPUPS),
        TradeAction::Buy,
        BUY_FORM,
        None,
    );

    let body = format!(
        r#"        <div class="grid">
            <div class="card wide">
                <div class="card-header">
                    <span class="card-title">{ticker}</span>
                    <span class="card-value">${price:.2}</span>
                </div>
                <div id="{STOCK_PLOT}">{history}</div>
            </div>
            <div class="card">
                <div class="card-header"><span class="card-title">Buy {ticker}</span></div>
                <p class="empty">You can afford up to {max_shares} shares</p>
                {form}
            </div>
        </div>"#,
        price = payload.price,
        max_shares = payload.max_shares,
        history = page.html_or(STOCK_PLOT, "No price history available"),
    );

    page.finish(PageKind::Buy, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> BuyPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_buy_page_form_and_chart() {
        let page = render(
            &payload(json!({
                "ticker": "AAPL",
                "price": 190.1,
                "max_shares": 52,
                "history": {
                    "date": ["2024-01-02", "2024-01-03"],
                    "open": [187.0, 184.2],
                    "high": [188.4, 185.9],
                    "low": [183.9, 183.4],
                    "close": [185.6, 184.3]
                }
            })),
            &Config::default(),
        );

        assert!(page.issues.is_empty());
        assert!(page.html.contains(r#"data-max-shares="52""#));
        assert!(page.html.contains(r#"data-action="BUY""#));
        let ticker = r#"<input type="hidden" id="ticker" name="ticker" value="AAPL">"#;
        assert!(page.html.contains(ticker));
        assert!(page.html.contains("$190.10"));
        assert!(page.html.contains("You can afford up to 52 shares"));
        assert!(page.html.contains("candlestick"));
        assert!(page.html.contains(r#"id="confirmPopup" class="modal""#));
    }

    #[test]
    fn test_buy_page_without_history() {
        let page = render(
            &payload(json!({"ticker": "MSFT", "price": 410.0, "max_shares": 0})),
            &Config::default(),
        );

        assert!(page.issues.is_empty());
        assert!(page.html.contains("No price history available"));
        assert!(!page.html.contains("data-figure="));
    }

    #[test]
    fn test_ticker_is_escaped() {
        let page = render(
            &payload(json!({"ticker": "<b>X</b>", "price": 1.0, "max_shares": 1})),
            &Config::default(),
        );

        assert!(!page.html.contains("<b>X</b>"));
        assert!(page.html.contains("&lt;b&gt;X&lt;/b&gt;"));
    }

    #[test]
    fn test_ragged_candles_show_placeholder() {
        let page = render(
            &payload(json!({
                "ticker": "AAPL",
                "price": 190.1,
                "max_shares": 1,
                "history": {
                    "date": ["2024-01-02"],
                    "open": [1.0],
                    "high": [],
                    "low": [1.0],
                    "close": [1.0]
                }
            })),
            &Config::default(),
        );

        assert_eq!(page.issues.len(), 1);
        assert!(page.html.contains(crate::pages::CHART_UNAVAILABLE));
    }
}
