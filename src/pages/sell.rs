//! Sell page
//!
//! Ticker dropdown built from the current holdings plus the sell form.

use crate::config::Config;
use crate::render::dropdown::{DropdownOptions, populate_dropdown_with};
use crate::render::popup::confirm_popup;
use crate::types::{PRICE_FIELD, RenderingTarget, SHARES_FIELD, SellPayload, TradeAction};

use super::{POPUPS, Page, PageBuilder, PageKind, trade_form_html};

pub const TICKER_SELECT: &str = "ticker";
pub const SELL_FORM: &str = "sellForm";

pub fn render(payload: &SellPayload, config: &Config) -> Page {
    build(payload, PageBuilder::new(config))
}

pub(crate) fn build(payload: &SellPayload, mut page: PageBuilder<'_>) -> Page {
    let config = page.config;

    let options = DropdownOptions {
        placeholder: &config.dropdown_placeholder,
        selected: payload.ticker.as_deref(),
        data: &[("max-shares", SHARES_FIELD), ("price", PRICE_FIELD)],
    };
    let report = populate_dropdown_with(
        &payload.holdings,
        &RenderingTarget::new(TICKER_SELECT),
        &options,
        &mut page.doc,
    );
    page.issues.extend(report.issues);

    let ticker_control = format!(
        r#"<label for="{TICKER_SELECT}">Ticker</label>
                <select id="{TICKER_SELECT}" name="ticker">{options}</select>"#,
        options = page.doc.html_of(TICKER_SELECT),
    );
    let form = trade_form_html(
        TradeAction::Sell,
        SELL_FORM,
        &ticker_control,
        payload.price,
        payload.max_shares,
    );
    confirm_popup(
        &mut page.doc,
        &RenderingTarget::new(POPUPS),
        TradeAction::Sell,
        SELL_FORM,
        None,
    );

    let summary = if payload.holdings.is_empty() {
        "You have no holdings to sell".to_string()
    } else {
        format!("Holdings available to sell: {}", report.values.len() - 1)
    };

    let body = format!(
        r#"        <div class="grid">
            <div class="card">
                <div class="card-header"><span class="card-title">Sell Stock</span></div>
                <p class="empty">{summary}</p>
                {form}
            </div>
        </div>"#
    );

    page.finish(PageKind::Sell, &body)
}
